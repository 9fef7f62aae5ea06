//! Errors reported by [`PositionIndex`](crate::PositionIndex).
//!
//! Absent keys are not errors: lookups return `None` and removals return
//! `Ok(None)`.

/// Shorthand for results produced by this crate.
pub type Result<T> = core::result::Result<T, IndexError>;

/// Everything that can go wrong when building or mutating an index.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// The requested fanout cannot hold a separator key.
    #[error("index order must be at least 2, got {0}")]
    InvalidOrder(usize),

    /// A leaf-only mutation reached an internal node.
    #[error("`{operation}` can only be applied to a leaf node")]
    NotALeaf {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn error_messages() {
        assert_eq!(IndexError::InvalidOrder(1).to_string(), "index order must be at least 2, got 1");
        assert_eq!(
            IndexError::NotALeaf { operation: "add_index_key" }.to_string(),
            "`add_index_key` can only be applied to a leaf node"
        );
    }
}
