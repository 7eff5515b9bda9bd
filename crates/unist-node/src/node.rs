//! Shared node handles.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::NodeError;
use crate::prop::Prop;

/// Data behind a [`Node`] handle.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The unist `type` discriminant.
    pub kind: String,
    pub props: IndexMap<String, Prop>,
    /// `None` for leaves without a `children` field.
    pub children: Option<Vec<Node>>,
}

impl NodeData {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: IndexMap::new(),
            children: None,
        }
    }
}

// Unlinks descendants on an explicit stack so dropping a deep tree does not
// recurse once per level.
impl Drop for NodeData {
    fn drop(&mut self) {
        let mut pending = self.children.take().unwrap_or_default();
        while let Some(node) = pending.pop() {
            if let Ok(cell) = Rc::try_unwrap(node.0) {
                let mut data = cell.into_inner();
                if let Some(children) = data.children.take() {
                    pending.extend(children);
                }
            }
        }
    }
}

/// Handle to a tree node.
///
/// Cloning a handle does not copy the node. `==` and `Hash` work on node
/// identity, so two nodes built from the same content are different nodes.
/// Use [`Node::deep_eq`] for structural comparison.
///
/// Trees must be acyclic: a node must not be its own descendant.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    pub fn new(kind: impl Into<String>) -> Self {
        Self::from_data(NodeData::new(kind))
    }

    pub fn from_data(data: NodeData) -> Self {
        Self(Rc::new(RefCell::new(data)))
    }

    /// Leaf node with the given fields, like `u(kind, props)`.
    pub fn leaf<I, K, V>(kind: impl Into<String>, props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Prop>,
    {
        let node = Self::new(kind);
        for (name, value) in props {
            node.set_prop(name, value);
        }
        node
    }

    /// Parent node with the given fields and children, like
    /// `u(kind, props, children)`.
    pub fn parent<I, K, V, C>(kind: impl Into<String>, props: I, children: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Prop>,
        C: IntoIterator<Item = Node>,
    {
        Self::leaf(kind, props).with_children(children)
    }

    pub fn with_prop(self, name: impl Into<String>, value: impl Into<Prop>) -> Self {
        self.set_prop(name, value);
        self
    }

    pub fn with_children(self, children: impl IntoIterator<Item = Node>) -> Self {
        self.set_children(Some(children.into_iter().collect()));
        self
    }

    pub fn kind(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |data| data.kind.as_str())
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.0.borrow().kind == kind
    }

    pub fn set_kind(&self, kind: impl Into<String>) {
        self.0.borrow_mut().kind = kind.into();
    }

    /// Read a field. `"type"` yields the kind; `"children"` is not a field.
    pub fn prop(&self, name: &str) -> Option<Prop> {
        let data = self.0.borrow();
        if name == "type" {
            return Some(Prop::String(data.kind.clone()));
        }
        data.props.get(name).cloned()
    }

    pub fn has_prop(&self, name: &str) -> bool {
        name == "type" || self.0.borrow().props.contains_key(name)
    }

    /// Set a field, returning the previous value.
    ///
    /// Setting `"type"` changes the kind and returns the old kind. A
    /// non-string `"type"` is rejected: the node is left unchanged and `None`
    /// is returned.
    pub fn set_prop(&self, name: impl Into<String>, value: impl Into<Prop>) -> Option<Prop> {
        let name = name.into();
        let value = value.into();
        let mut data = self.0.borrow_mut();
        if name == "type" {
            let Prop::String(kind) = value else {
                return None;
            };
            let previous = std::mem::replace(&mut data.kind, kind);
            return Some(Prop::String(previous));
        }
        data.props.insert(name, value)
    }

    pub fn remove_prop(&self, name: &str) -> Option<Prop> {
        self.0.borrow_mut().props.shift_remove(name)
    }

    /// Snapshot of the field names and values, in insertion order.
    pub fn props(&self) -> IndexMap<String, Prop> {
        self.0.borrow().props.clone()
    }

    /// Whether the node carries a `children` field (possibly empty).
    pub fn is_parent(&self) -> bool {
        self.0.borrow().children.is_some()
    }

    /// Snapshot of the child handles. Empty for leaves.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone().unwrap_or_default()
    }

    pub fn child(&self, index: usize) -> Option<Node> {
        self.0
            .borrow()
            .children
            .as_ref()
            .and_then(|children| children.get(index).cloned())
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.as_ref().map_or(0, Vec::len)
    }

    pub fn push_child(&self, child: Node) {
        self.0
            .borrow_mut()
            .children
            .get_or_insert_with(Vec::new)
            .push(child);
    }

    /// Insert `child` at `index`, or append it when `index` is past the end.
    pub fn insert_child(&self, index: usize, child: Node) {
        let mut data = self.0.borrow_mut();
        let children = data.children.get_or_insert_with(Vec::new);
        let index = index.min(children.len());
        children.insert(index, child);
    }

    pub fn remove_child(&self, index: usize) -> Option<Node> {
        let mut data = self.0.borrow_mut();
        let children = data.children.as_mut()?;
        if index < children.len() {
            Some(children.remove(index))
        } else {
            None
        }
    }

    pub fn set_children(&self, children: Option<Vec<Node>>) {
        self.0.borrow_mut().children = children;
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Structural comparison of two subtrees.
    pub fn deep_eq(&self, other: &Node) -> bool {
        let mut pending = vec![(self.clone(), other.clone())];
        while let Some((left, right)) = pending.pop() {
            if left.ptr_eq(&right) {
                continue;
            }
            let a = left.0.borrow();
            let b = right.0.borrow();
            if a.kind != b.kind || a.props.len() != b.props.len() {
                return false;
            }
            let props_equal = a.props.iter().all(|(name, value)| {
                b.props
                    .get(name)
                    .is_some_and(|other_value| value.deep_eq(other_value))
            });
            if !props_equal {
                return false;
            }
            match (&a.children, &b.children) {
                (None, None) => {}
                (Some(l), Some(r)) if l.len() == r.len() => {
                    pending.extend(l.iter().cloned().zip(r.iter().cloned()));
                }
                _ => return false,
            }
        }
        true
    }

    /// Import a unist tree from JSON.
    ///
    /// Array and object fields become [`Prop::Object`] values, each with its
    /// own identity.
    pub fn from_json(value: &Value) -> Result<Node, NodeError> {
        node_from_json(value, String::new())
    }

    pub fn to_json(&self) -> Value {
        // Pre-order list; walking it backwards finishes every child before
        // its parent, leaving the leftmost child on top of `built`.
        let mut order = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            order.push(node);
        }

        let mut built: Vec<Value> = Vec::with_capacity(order.len());
        for node in order.iter().rev() {
            let data = node.0.borrow();
            let mut out = Map::new();
            out.insert("type".to_string(), Value::String(data.kind.clone()));
            for (name, value) in &data.props {
                out.insert(name.clone(), value.to_json());
            }
            if let Some(children) = &data.children {
                let split = built.len() - children.len();
                let mut values = built.split_off(split);
                values.reverse();
                out.insert("children".to_string(), Value::Array(values));
            }
            built.push(Value::Object(out));
        }
        built.pop().unwrap_or(Value::Null)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

fn node_from_json(value: &Value, path: String) -> Result<Node, NodeError> {
    let Value::Object(object) = value else {
        return Err(NodeError::NotAnObject { path });
    };
    let Some(Value::String(kind)) = object.get("type") else {
        return Err(NodeError::MissingType { path });
    };

    let mut data = NodeData::new(kind.clone());

    for (name, field) in object {
        match name.as_str() {
            "type" => {}
            "children" => {
                let Value::Array(items) = field else {
                    return Err(NodeError::InvalidChildren { path });
                };
                let mut children = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    children.push(node_from_json(item, format!("{path}/children/{index}"))?);
                }
                data.children = Some(children);
            }
            _ => {
                data.props.insert(name.clone(), Prop::from_json(field));
            }
        }
    }

    Ok(Node::from_data(data))
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => {
                let mut out = f.debug_struct("Node");
                out.field("kind", &data.kind);
                for (name, value) in &data.props {
                    out.field(name, value);
                }
                // A count only; printing subtrees grows with depth.
                if let Some(children) = &data.children {
                    out.field("children", &children.len());
                }
                out.finish()
            }
            Err(_) => write!(f, "Node(<borrowed>)"),
        }
    }
}
