//! First-fit allocation over a pluggable [`Range`](crate::range::Range).
//!
//! An [`Allocator`] pairs one range with an in-memory allocation set. Each
//! identifier is either free or assigned:
//!
//! - [`ResourceAllocator::assign`] reserves a specific identifier
//! - [`ResourceAllocator::allocate`] reserves the first free identifier in
//!   the range's natural order
//! - [`ResourceAllocator::release`] frees an identifier (idempotent)
//! - [`ResourceAllocator::has`] reports whether an identifier is held
//!
//! `allocate` goes through `assign` for every candidate, so there is a single
//! admission path into the allocation set.
//!
//! The allocator does no locking. Callers sharing one across threads must
//! serialize access to it as a whole, e.g. behind a `Mutex`.

pub mod error;
pub mod store;

pub use error::AllocatorError;
pub use store::Allocator;

use crate::range::RangeId;

/// Capability set of an identifier allocator
pub trait ResourceAllocator {
    /// Payload returned alongside an allocated identifier
    type Value;

    /// Reserve a specific identifier.
    ///
    /// Fails with [`AllocatorError::OutOfRange`] if the identifier is not part
    /// of the range and with [`AllocatorError::AlreadyAllocated`] if it is
    /// already held.
    fn assign(&mut self, id: &str) -> Result<(), AllocatorError>;

    /// Reserve the first free identifier, failing with
    /// [`AllocatorError::Full`] when none is left.
    fn allocate(&mut self) -> Result<(RangeId, Self::Value), AllocatorError>;

    /// Free an identifier. Releasing an identifier that is not held is a no-op.
    fn release(&mut self, id: &str) -> Result<(), AllocatorError>;

    /// Whether the identifier is currently held
    fn has(&self, id: &str) -> bool;
}
