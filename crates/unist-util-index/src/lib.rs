//! unist-util-index - index nodes by a field or computed key.
//!
//! [`NodeIndex`] maps keys to the nodes that have them so repeated lookups do
//! not walk the tree again. Build it from a tree with [`NodeIndex::from_tree`]
//! (optionally filtered by a [`Test`]) and keep it in sync with later tree
//! edits through [`NodeIndex::add`] and [`NodeIndex::remove`].
//!
//! ```
//! use serde_json::json;
//! use unist_node::Node;
//! use unist_util_index::{NodeIndex, Test};
//!
//! let tree = Node::from_json(&json!({
//!     "type": "root",
//!     "children": [
//!         {"type": "definition", "identifier": "alpha"},
//!         {"type": "definition", "identifier": "bravo"}
//!     ]
//! }))
//! .unwrap();
//!
//! let index = NodeIndex::from_tree("identifier", &tree, "definition");
//! assert_eq!(index.get("alpha"), &[tree.child(0).unwrap()]);
//! assert!(index.get("charlie").is_empty());
//! ```

mod index;
mod key;

pub use index::NodeIndex;
pub use key::{Key, KeyFn, KeySpec};
pub use unist_node::{Node, Prop, Shared};
pub use unist_util_is::Test;
