use thiserror::Error;

/// Invalid test specification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TestError {
    #[error("expected null, string, object, or array as test, found {found}")]
    InvalidTest { found: &'static str },
}

/// Inconsistent position arguments passed to [`crate::is`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IsError {
    #[error("expected parent node when an index is given")]
    MissingParent,
    #[error("expected index when a parent node is given")]
    MissingIndex,
    #[error("index {index} is out of bounds for parent with {len} children")]
    IndexOutOfBounds { index: usize, len: usize },
}
