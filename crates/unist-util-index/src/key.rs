//! Index keys and how they are derived from nodes.

use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use unist_node::{Node, Prop, Shared};

/// Key a node is indexed under.
///
/// Primitive values compare by value; [`Shared`] objects and nodes compare by
/// identity. Every string is an ordinary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A plucked field was absent. Nodes without the field share this key.
    Missing,
    Value(Prop),
    Node(Node),
}

impl Key {
    pub fn is_missing(&self) -> bool {
        matches!(self, Key::Missing)
    }

    pub fn as_prop(&self) -> Option<&Prop> {
        match self {
            Key::Value(prop) => Some(prop),
            _ => None,
        }
    }
}

impl From<Prop> for Key {
    fn from(value: Prop) -> Self {
        Key::Value(value)
    }
}

impl From<Option<Prop>> for Key {
    fn from(value: Option<Prop>) -> Self {
        value.map_or(Key::Missing, Key::Value)
    }
}

impl From<Node> for Key {
    fn from(value: Node) -> Self {
        Key::Node(value)
    }
}

impl From<&Node> for Key {
    fn from(value: &Node) -> Self {
        Key::Node(value.clone())
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

macro_rules! key_from_prop {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(value: $t) -> Self {
                    Key::Value(Prop::from(value))
                }
            }
        )*
    };
}

key_from_prop!(
    &str, String, bool, f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, Shared,
    Value
);

/// Function computing a node's key.
pub type KeyFn = dyn Fn(&Node) -> Key;

/// How to derive a key from a node.
#[derive(Clone)]
pub enum KeySpec {
    /// Pluck the named field; absent fields give [`Key::Missing`].
    ///
    /// `"type"` plucks the node's kind. `"children"` is not a field: every
    /// node, parent or not, keys as [`Key::Missing`] under it. To group
    /// parents by child list, use [`KeySpec::function`].
    Field(String),
    Function(Rc<KeyFn>),
}

impl KeySpec {
    pub fn field(name: impl Into<String>) -> Self {
        KeySpec::Field(name.into())
    }

    pub fn function<F, K>(f: F) -> Self
    where
        F: Fn(&Node) -> K + 'static,
        K: Into<Key>,
    {
        KeySpec::Function(Rc::new(move |node: &Node| f(node).into()))
    }

    pub(crate) fn compile(self) -> Rc<KeyFn> {
        match self {
            KeySpec::Field(name) => Rc::new(move |node: &Node| Key::from(node.prop(&name))),
            KeySpec::Function(f) => f,
        }
    }
}

impl From<&str> for KeySpec {
    fn from(value: &str) -> Self {
        KeySpec::Field(value.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(value: String) -> Self {
        KeySpec::Field(value)
    }
}

impl fmt::Debug for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySpec::Field(name) => f.debug_tuple("Field").field(name).finish(),
            KeySpec::Function(_) => f.write_str("Function(..)"),
        }
    }
}
