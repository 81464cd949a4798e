//! # Rangealloc - pluggable allocator for enumerable identifier ranges
//!
//! This library tracks which identifiers of a bounded resource range are in
//! use: IP addresses in a subnet window, TCP/UDP ports in a numeric band, or
//! any other finite, ordered space a caller describes.
//!
//! ## Overview
//!
//! A caller builds a concrete [`range::Range`], wraps it in an
//! [`allocator::Allocator`] and then drives four operations:
//!
//! - **assign**: reserve a specific identifier
//! - **allocate**: reserve the first free identifier (first-fit, in the
//!   range's natural order)
//! - **release**: free an identifier again (idempotent)
//! - **has**: check whether an identifier is held
//!
//! ## Architecture
//!
//! - `range`: the range/cursor contract plus the port and IP implementations
//! - `allocator`: the allocation core and its error type
//! - `config`: YAML pool descriptions
//! - `config_loader`: configuration file loading and validation
//! - `utils`: address arithmetic helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use rangealloc::allocator::{Allocator, ResourceAllocator};
//! use rangealloc::range::IpRange;
//!
//! let range = IpRange::from_subnet("192.168.10.0/24".parse()?, None, None, None)?;
//! let mut addresses = Allocator::new(range);
//!
//! // 192.168.10.1 is the default gateway and never handed out
//! let (id, lease) = addresses.allocate()?;
//! assert_eq!(id.as_str(), "192.168.10.2");
//! assert_eq!(lease.address.to_string(), "192.168.10.2/24");
//! assert_eq!(lease.gateway.to_string(), "192.168.10.1");
//!
//! addresses.release(id.as_str())?;
//! assert!(!addresses.has("192.168.10.2"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Adding a Resource Kind
//!
//! Implement [`range::Range`] (membership and a cursor factory) and
//! [`range::RangeIterator`] (get/next/in_range) for the new kind; the
//! allocator needs nothing else.
//!
//! ## Error Handling
//!
//! Library operations return typed `thiserror` enums
//! ([`allocator::AllocatorError`], [`range::PortRangeError`],
//! [`range::IpRangeError`], [`config::ValidationError`]). The configuration
//! loader and the binary use `color_eyre` reports with context.

pub mod allocator;
pub mod config;
pub mod config_loader;
pub mod range;
pub mod utils;
