use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};
use unist_node::Node;
use unist_util_is::{Check, Test};
use unist_util_visit::{PreOrder, Traverse, VisitAction};

use crate::key::{Key, KeyFn, KeySpec};

/// Mutable index from keys to the nodes that have them.
///
/// Each bucket keeps nodes in insertion order and holds a node (by identity)
/// at most once. Keys are computed when a node is added or removed; editing a
/// node afterwards does not move it to another bucket.
///
/// Membership checks scan the bucket, so `add` and `remove` are linear in
/// the number of nodes sharing a key.
#[derive(Clone)]
pub struct NodeIndex {
    key: Rc<KeyFn>,
    table: HashMap<Key, Vec<Node>>,
}

impl NodeIndex {
    /// Empty index keyed by `key`.
    pub fn new(key: impl Into<KeySpec>) -> Self {
        Self {
            key: key.into().compile(),
            table: HashMap::new(),
        }
    }

    /// Index keyed by `key`, filled with every node of `tree` that passes
    /// `test`, in pre-order.
    ///
    /// Without a tree the index starts empty.
    pub fn from_tree<'a>(
        key: impl Into<KeySpec>,
        tree: impl Into<Option<&'a Node>>,
        test: impl Into<Test>,
    ) -> Self {
        Self::from_tree_with(key, tree, test, &PreOrder::new())
    }

    /// Like [`NodeIndex::from_tree`], walking the tree with `traversal`.
    pub fn from_tree_with<'a, T>(
        key: impl Into<KeySpec>,
        tree: impl Into<Option<&'a Node>>,
        test: impl Into<Test>,
        traversal: &T,
    ) -> Self
    where
        T: Traverse + ?Sized,
    {
        let mut index = Self::new(key);
        let tree: Option<&Node> = tree.into();
        let Some(tree) = tree else {
            return index;
        };

        let test: Test = test.into();
        let check = test.compile();
        // The walk sees every node so the summary can count them; the test
        // is applied here with the same position the walk reports.
        let (mut visited, mut matched) = (0usize, 0usize);
        traversal.traverse(tree, &Check::always(), &mut |node, position, parent| {
            visited += 1;
            if check.matches(node, position, parent) {
                index.add(node);
                matched += 1;
            }
            VisitAction::Continue
        });
        debug!(visited, matched, keys = index.len(), "indexed tree");
        index
    }

    /// Nodes indexed under `key`, in insertion order. Unknown keys give an
    /// empty slice.
    pub fn get(&self, key: impl Into<Key>) -> &[Node] {
        let key: Key = key.into();
        self.table
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Add `node` under its current key, unless it is already there.
    pub fn add(&mut self, node: &Node) -> &mut Self {
        let key = self.key_of(node);
        let nodes = self.table.entry(key).or_default();
        if nodes.contains(node) {
            trace!("node already indexed");
        } else {
            nodes.push(node.clone());
        }
        self
    }

    /// Remove `node` from the bucket of its current key, if it is there.
    pub fn remove(&mut self, node: &Node) -> &mut Self {
        let key = self.key_of(node);
        let Some(nodes) = self.table.get_mut(&key) else {
            trace!("no bucket for removed node");
            return self;
        };
        match nodes.iter().position(|indexed| indexed == node) {
            Some(pos) => {
                nodes.remove(pos);
            }
            None => trace!("node not indexed under its key"),
        }
        if nodes.is_empty() {
            self.table.remove(&key);
        }
        self
    }

    /// Key `node` would be indexed under now.
    pub fn key_of(&self, node: &Node) -> Key {
        (self.key)(node)
    }

    /// Whether `node` is indexed under its current key.
    pub fn contains(&self, node: &Node) -> bool {
        self.get(self.key_of(node)).contains(node)
    }

    /// Keys with at least one node, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.table.keys()
    }

    /// Buckets with at least one node, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &[Node])> + '_ {
        self.table
            .iter()
            .map(|(key, nodes)| (key, nodes.as_slice()))
    }

    /// Number of keys with at least one node.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeIndex")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
