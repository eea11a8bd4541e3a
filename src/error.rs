//! Diagnostic error types.
//!
//! The editing and codec operations never fail the caller: their infallible
//! forms fall back to the original or empty graph. These errors are what the
//! `try_*` forms report instead, so a caller can tell a no-op from a rejection.

/// Why a graph edit was not applied
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no label supplied")]
    EmptyLabel,

    #[error("no connection spec supplied")]
    EmptySpec,

    #[error("expected `source,target,label`, got {fields} field(s)")]
    MalformedSpec { fields: usize },

    #[error("no edit text supplied")]
    EmptyEditText,

    #[error("nothing is selected")]
    NothingSelected,

    #[error("Node {0} not found")]
    NodeNotFound(String),

    #[error("Edge {0} not found")]
    EdgeNotFound(String),

    #[error("One or both nodes not found ({from} -> {to})")]
    MissingNodes { from: String, to: String },

    #[error("Unknown operation type: {0}")]
    UnknownOperation(String),

    #[error("No {0} information provided")]
    MissingField(&'static str),

    #[error("malformed operation: {0}")]
    InvalidOperation(String),
}

impl StoreError {
    /// True when the input was malformed or pointed at nothing, false when
    /// there was simply nothing to do.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            StoreError::EmptyLabel
                | StoreError::EmptySpec
                | StoreError::EmptyEditText
                | StoreError::NothingSelected
        )
    }
}

/// Why a payload could not be turned into a graph (or back)
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid graph JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("value has neither `nodes` nor `edges`")]
    NotGraphShaped,

    #[error("graph could not be encoded: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_split() {
        assert!(!StoreError::EmptyLabel.is_rejection());
        assert!(!StoreError::NothingSelected.is_rejection());
        assert!(StoreError::MalformedSpec { fields: 2 }.is_rejection());
        assert!(StoreError::NodeNotFound("9".into()).is_rejection());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            StoreError::MalformedSpec { fields: 4 }.to_string(),
            "expected `source,target,label`, got 4 field(s)"
        );
        assert_eq!(StoreError::NodeNotFound("3".into()).to_string(), "Node 3 not found");
    }
}
