use thiserror::Error;

/// Errors raised while importing a tree from JSON.
///
/// `path` is a JSON Pointer to the offending node (`""` for the root).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("expected node object at `{path}`")]
    NotAnObject { path: String },
    #[error("node at `{path}` has no string `type` field")]
    MissingType { path: String },
    #[error("`children` of node at `{path}` must be an array")]
    InvalidChildren { path: String },
}
