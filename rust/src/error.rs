//! Error handling and result types for tree operations.
//!
//! Absence of a key is never an error here: lookups return `bool` and removals
//! are no-ops. `TreeError` covers rejected configuration, out-of-range indices
//! on the checked segment tree calls, and invariant violations reported by the
//! validation module.

use thiserror::Error;

/// Error type for tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Invalid minimum degree specified for a B+ tree.
    #[error("Invalid minimum degree: {0}")]
    InvalidDegree(String),
    /// Position outside the backing sequence of a segment tree.
    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),
    /// Internal data structure integrity violation.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),
    /// Arena operation failed.
    #[error("Arena error: {0}")]
    ArenaError(String),
    /// Tree corruption detected.
    #[error("Corrupted tree: {0}")]
    CorruptedTree(String),
}

impl TreeError {
    /// Create an InvalidDegree error with context
    pub fn invalid_degree(degree: usize, min_required: usize) -> Self {
        Self::InvalidDegree(format!(
            "Minimum degree {} is invalid (minimum required: {})",
            degree, min_required
        ))
    }

    /// Create an IndexOutOfRange error with context
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange(format!("index {} but length is {}", index, len))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create an ArenaError with context
    pub fn arena_error(operation: &str, details: &str) -> Self {
        Self::ArenaError(format!("{} failed: {}", operation, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Check if this error reports a broken tree invariant
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::DataIntegrityError(_) | Self::CorruptedTree(_) | Self::ArenaError(_)
        )
    }
}

/// Result type for tree operations that may fail
pub type TreeResult<T> = Result<T, TreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, TreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, TreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, TreeError>;

/// Result extension trait for attaching context to tree errors
pub trait TreeResultExt<T> {
    /// Prefix the error message with the operation that was running
    fn with_operation(self, operation: &str) -> TreeResult<T>;
}

impl<T> TreeResultExt<T> for Result<T, TreeError> {
    fn with_operation(self, operation: &str) -> TreeResult<T> {
        let context = format!("Operation '{}'", operation);
        self.map_err(|e| match e {
            TreeError::InvalidDegree(msg) => {
                TreeError::InvalidDegree(format!("{}: {}", context, msg))
            }
            TreeError::IndexOutOfRange(msg) => {
                TreeError::IndexOutOfRange(format!("{}: {}", context, msg))
            }
            TreeError::DataIntegrityError(msg) => TreeError::data_integrity(&context, &msg),
            TreeError::ArenaError(msg) => TreeError::arena_error(&context, &msg),
            TreeError::CorruptedTree(msg) => TreeError::corrupted_tree(&context, &msg),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_prefixed() {
        let err: TreeResult<()> = Err(TreeError::corrupted_tree("AVL", "height mismatch"));
        let err = err.with_operation("insert").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Corrupted tree: Operation 'insert' corruption: AVL corruption: height mismatch"
        );
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_ok_passes_through_context() {
        let ok: KeyResult<i64> = Ok(7);
        assert_eq!(ok.with_operation("query"), Ok(7));

        let err: KeyResult<i64> = Err(TreeError::index_out_of_range(9, 3));
        assert_eq!(
            err.with_operation("query").unwrap_err().to_string(),
            "Index out of range: Operation 'query': index 9 but length is 3"
        );
    }

    #[test]
    fn test_invalid_degree_message() {
        let err = TreeError::invalid_degree(1, 2);
        assert_eq!(
            err.to_string(),
            "Invalid minimum degree: Minimum degree 1 is invalid (minimum required: 2)"
        );
        assert!(!err.is_invariant_violation());
    }
}
