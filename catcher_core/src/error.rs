//! Setup errors.
//!
//! The tokenizer has a single fatal condition: the record storage cannot be
//! provided at setup. Everything else (overrun, malformed records, a full
//! listener registry) degrades into a well-defined buffer state.

use thiserror::Error;

/// Reasons why [`CommandCatcher::setup`](crate::CommandCatcher::setup) left the
/// instance inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// The capacity leaves no room for a payload byte next to the reserved
    /// terminator slot.
    #[error("record capacity {requested} is below the minimum of {minimum}")]
    CapacityTooSmall { requested: usize, minimum: usize },

    /// The capacity is larger than the storage the buffer was compiled with.
    #[error("record capacity {requested} exceeds the {available} bytes of storage")]
    CapacityExceedsStorage { requested: usize, available: usize },

    /// The heap refused the storage allocation.
    #[error("failed to allocate {requested} bytes of record storage")]
    AllocationFailed { requested: usize },
}

// ==================== TESTS =======================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_capacity() {
        let err = SetupError::CapacityExceedsStorage {
            requested: 64,
            available: 32,
        };
        assert_eq!(
            err.to_string(),
            "record capacity 64 exceeds the 32 bytes of storage"
        );

        let err = SetupError::CapacityTooSmall {
            requested: 1,
            minimum: 2,
        };
        assert!(err.to_string().contains("below the minimum of 2"));
    }
}
