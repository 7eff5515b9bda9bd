//! unist-node - tree model shared by the unist utility crates.
//!
//! A [`Node`] is a handle with identity semantics over a unist node: a `type`
//! ([`Node::kind`]), named fields ([`Prop`]), and optional ordered children.
//! Trees can be built with [`Node::leaf`] / [`Node::parent`] or imported from
//! JSON with [`Node::from_json`].

mod error;
mod node;
mod prop;

pub use error::NodeError;
pub use node::{Node, NodeData};
pub use prop::{Prop, Shared};
