//! unist-util-is - check whether a node passes a test.
//!
//! A [`Test`] describes which nodes match (everything, a node type, a set of
//! field values, a predicate, or any of several tests). [`Test::compile`]
//! resolves it once into a [`Check`] that walks and indexes call per node.

mod convert;
mod error;

pub use convert::{Check, Predicate, Test};
pub use error::{IsError, TestError};

use unist_node::Node;

/// Check whether `node`, found at `index` in `parent`, passes `test`.
///
/// `index` and `parent` must be given together, and `index` must point into
/// the parent's children.
pub fn is(
    node: &Node,
    index: Option<usize>,
    parent: Option<&Node>,
    test: &Test,
) -> Result<bool, IsError> {
    match (index, parent) {
        (Some(_), None) => return Err(IsError::MissingParent),
        (None, Some(_)) => return Err(IsError::MissingIndex),
        (Some(index), Some(parent)) => {
            let len = parent.child_count();
            if index >= len {
                return Err(IsError::IndexOutOfBounds { index, len });
            }
        }
        (None, None) => {}
    }
    Ok(test.compile().matches(node, index, parent))
}
