use crate::range::RangeId;

/// Errors returned by allocator operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocatorError {
    #[error("{id} is out of range")]
    OutOfRange { id: RangeId },

    #[error("{id} is already allocated")]
    AlreadyAllocated { id: RangeId },

    #[error("range is full")]
    Full,
}
