use crate::{ast::document::OperationKind, response::path::ResponsePath};

/// Failures that abort the whole execution.
///
/// They signal a broken contract of a collaborator or an engine bug, never a query-time
/// condition. Query-time failures are reported as field errors in the response instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Batch resolver for field \"{field}\" returned {actual} results for {expected} sources")]
    BatchSizeMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("Zipper does not share the common root of the batch")]
    StaleZipper,
    #[error("Position {0} does not exist in the node")]
    InvalidChildPosition(String),
    #[error("Conflicting replacements at position {0}")]
    ConflictingReplacement(String),
    #[error("Unresolved node reached result flattening at \"{0}\"")]
    UnresolvedNodeInResult(ResponsePath),
    #[error("Field \"{field}\" is not defined on type \"{parent_type}\"")]
    UnknownField { parent_type: String, field: String },
    #[error("Type \"{0}\" is not a known output type")]
    UnknownType(String),
    #[error("Unresolved object at \"{0}\" has no sub-selection")]
    MissingSubSelection(ResponsePath),
    #[error("Field \"{0}\" has no field nodes")]
    EmptyFieldNodes(String),
    #[error("Schema does not define a root type for {0} operations")]
    MissingRootType(OperationKind),
    #[error("Resolution did not complete within {0} rounds")]
    IterationLimitExceeded(usize),
    #[error("Invalid operation: {0}")]
    Document(String),
}
