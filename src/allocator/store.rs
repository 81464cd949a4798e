//! In-memory allocator bound to one range.

use super::{AllocatorError, ResourceAllocator};
use crate::range::{Range, RangeId, RangeIterator};
use log::{debug, trace};
use std::collections::HashSet;

/// Allocator holding one [`Range`] and the set of identifiers assigned from it
///
/// ```
/// use rangealloc::allocator::{Allocator, AllocatorError, ResourceAllocator};
/// use rangealloc::range::PortRange;
///
/// let mut ports = Allocator::new(PortRange::new(8000, 8001)?);
/// ports.assign("8000")?;
///
/// let (id, port) = ports.allocate()?;
/// assert_eq!((id.as_str(), port), ("8001", 8001));
/// assert_eq!(ports.allocate(), Err(AllocatorError::Full));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Allocator<R> {
    range: R,
    /// Identifiers currently assigned
    store: HashSet<RangeId>,
}

impl<R: Range> Allocator<R> {
    /// Create an allocator with every identifier of `range` free
    pub fn new(range: R) -> Self {
        Allocator {
            range,
            store: HashSet::new(),
        }
    }

    pub fn range(&self) -> &R {
        &self.range
    }

    /// Number of identifiers currently assigned
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Identifiers currently assigned, in no particular order
    pub fn allocated(&self) -> impl Iterator<Item = &RangeId> {
        self.store.iter()
    }
}

impl<R: Range> ResourceAllocator for Allocator<R> {
    type Value = R::Value;

    fn assign(&mut self, id: &str) -> Result<(), AllocatorError> {
        if !self.range.contains(id) {
            return Err(AllocatorError::OutOfRange { id: id.into() });
        }
        if self.has(id) {
            return Err(AllocatorError::AlreadyAllocated { id: id.into() });
        }

        self.store.insert(id.into());
        debug!("Assigned {}", id);
        Ok(())
    }

    fn allocate(&mut self) -> Result<(RangeId, R::Value), AllocatorError> {
        let mut it = self.range.first();
        while it.in_range() {
            let (id, value) = it.get();
            match self.assign(id.as_str()) {
                Ok(()) => return Ok((id, value)),
                Err(err) => trace!("Skipping candidate {}: {}", id, err),
            }
            it.next();
        }

        debug!("No free identifier left ({} assigned)", self.store.len());
        Err(AllocatorError::Full)
    }

    fn release(&mut self, id: &str) -> Result<(), AllocatorError> {
        if self.store.remove(id) {
            debug!("Released {}", id);
        } else {
            trace!("Release of unassigned {} ignored", id);
        }
        Ok(())
    }

    fn has(&self, id: &str) -> bool {
        self.store.contains(id)
    }
}
