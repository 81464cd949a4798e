//! Allocatable ranges and the cursors that walk them.
//!
//! A [`Range`] describes a finite, ordered space of identifiers: it answers
//! membership questions and hands out fresh [`RangeIterator`] cursors that
//! traverse the space in its natural order. The allocator core only ever talks
//! to these two traits, so new resource kinds plug in by implementing them.
//!
//! Two implementations ship with the crate:
//!
//! - [`port::PortRange`]: an inclusive band of TCP/UDP ports
//! - [`ip::IpRange`]: an address window inside a subnet, with gateway exclusion
//!
//! ## Contract
//!
//! Membership and iteration must agree: every identifier a cursor yields while
//! [`RangeIterator::in_range`] is true satisfies [`Range::contains`], and every
//! identifier `contains` accepts is reached by a full traversal.
//!
//! Identifiers use one canonical text encoding per range (the form the cursor
//! yields). Other spellings of the same unit, such as `"080"` for port 80, are
//! treated as malformed.

pub mod ip;
pub mod port;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

pub use ip::{IpAllocation, IpIterator, IpRange, IpRangeError};
pub use port::{PortIterator, PortRange, PortRangeError};

/// Identifier naming one allocatable unit within a [`Range`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeId(String);

impl RangeId {
    pub fn new(id: impl Into<String>) -> Self {
        RangeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RangeId {
    fn from(id: &str) -> Self {
        RangeId(id.to_string())
    }
}

impl From<String> for RangeId {
    fn from(id: String) -> Self {
        RangeId(id)
    }
}

impl AsRef<str> for RangeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets the allocation set be probed with a plain `&str`.
impl Borrow<str> for RangeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A finite, ordered space of allocatable identifiers
pub trait Range {
    /// Range-specific payload describing one unit (a port number, an address...)
    type Value;
    /// Cursor type returned by [`Range::first`]
    type Iter: RangeIterator<Value = Self::Value>;

    /// Check whether `id` is a well-formed, in-bounds, non-excluded identifier.
    ///
    /// Never fails: malformed identifiers are simply not contained.
    fn contains(&self, id: &str) -> bool;

    /// Create a fresh cursor positioned at the first candidate identifier.
    ///
    /// Every call returns an independent cursor.
    fn first(&self) -> Self::Iter;

    /// Walk the whole range as a standard iterator.
    ///
    /// ```
    /// use rangealloc::range::{PortRange, Range};
    ///
    /// let range = PortRange::new(8080, 8082)?;
    /// let ids: Vec<String> = range.iter().map(|(id, _)| id.into_string()).collect();
    /// assert_eq!(ids, ["8080", "8081", "8082"]);
    /// # Ok::<(), rangealloc::range::PortRangeError>(())
    /// ```
    fn iter(&self) -> Cursor<Self::Iter> {
        Cursor::new(self.first())
    }
}

/// Forward-only traversal over the identifiers of one [`Range`]
pub trait RangeIterator {
    type Value;

    /// Identifier and payload at the current position. Has no side effects.
    ///
    /// Only meaningful while [`RangeIterator::in_range`] reports `true`.
    fn get(&self) -> (RangeId, Self::Value);

    /// Advance by exactly one unit. Never wraps around and never fails.
    fn next(&mut self);

    /// Whether the cursor denotes a usable identifier.
    ///
    /// Implementations with excluded identifiers advance past them here, so a
    /// caller driving the scan through `in_range`/`next` never observes one.
    fn in_range(&mut self) -> bool;
}

/// Adapter exposing a [`RangeIterator`] as a [`std::iter::Iterator`]
#[derive(Debug, Clone)]
pub struct Cursor<I> {
    inner: I,
}

impl<I: RangeIterator> Cursor<I> {
    pub fn new(inner: I) -> Self {
        Cursor { inner }
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: RangeIterator> Iterator for Cursor<I> {
    type Item = (RangeId, I::Value);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.inner.in_range() {
            return None;
        }
        let item = self.inner.get();
        RangeIterator::next(&mut self.inner);
        Some(item)
    }
}
