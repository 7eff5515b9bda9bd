//! unist-util-visit - recursive tree visitor.
//!
//! Walks a tree depth-first in pre-order: a node is visited before its
//! children, children left to right, and a node's whole subtree before its
//! next sibling. Only nodes passing the [`Test`] reach the visitor, but every
//! node is descended into unless the visitor prunes it with
//! [`VisitAction::Skip`].

use tracing::trace;
use unist_node::Node;
use unist_util_is::{Check, Test};

/// What the walk should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitAction {
    #[default]
    Continue,
    /// Do not descend into this node's children.
    Skip,
    /// Stop the walk.
    Exit,
}

impl From<()> for VisitAction {
    fn from(_: ()) -> Self {
        VisitAction::Continue
    }
}

/// `true` continues, `false` exits.
impl From<bool> for VisitAction {
    fn from(value: bool) -> Self {
        if value {
            VisitAction::Continue
        } else {
            VisitAction::Exit
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VisitOptions {
    /// Visit children right to left.
    pub reverse: bool,
}

/// Visitor called with `(node, index in parent, parent)`.
pub type Visitor<'a> = dyn FnMut(&Node, Option<usize>, Option<&Node>) -> VisitAction + 'a;

/// Tree walking capability.
pub trait Traverse {
    /// Call `visitor` for every node of `tree` that passes `check`.
    fn traverse(&self, tree: &Node, check: &Check, visitor: &mut Visitor<'_>);
}

/// Depth-first pre-order walk on an explicit stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreOrder {
    reverse: bool,
}

impl PreOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reversed() -> Self {
        Self { reverse: true }
    }
}

impl From<VisitOptions> for PreOrder {
    fn from(options: VisitOptions) -> Self {
        Self {
            reverse: options.reverse,
        }
    }
}

struct Frame {
    node: Node,
    index: Option<usize>,
    parent: Option<Node>,
}

impl Traverse for PreOrder {
    fn traverse(&self, tree: &Node, check: &Check, visitor: &mut Visitor<'_>) {
        let mut stack = vec![Frame {
            node: tree.clone(),
            index: None,
            parent: None,
        }];

        while let Some(frame) = stack.pop() {
            let parent = frame.parent.as_ref();
            if check.matches(&frame.node, frame.index, parent) {
                match visitor(&frame.node, frame.index, parent) {
                    VisitAction::Continue => {}
                    VisitAction::Skip => continue,
                    VisitAction::Exit => {
                        trace!(pending = stack.len(), "walk exited early");
                        return;
                    }
                }
            }

            // Children are read after the visitor ran so it may edit them.
            let children = frame.node.children().into_iter().enumerate();
            let frames = children.map(|(index, child)| Frame {
                node: child,
                index: Some(index),
                parent: Some(frame.node.clone()),
            });
            // The stack pops the last pushed frame first.
            if self.reverse {
                stack.extend(frames);
            } else {
                stack.extend(frames.rev());
            }
        }
    }
}

/// Visit every node of `tree` that passes `test`, in pre-order.
pub fn visit<F, R>(tree: &Node, test: &Test, visitor: F)
where
    F: FnMut(&Node, Option<usize>, Option<&Node>) -> R,
    R: Into<VisitAction>,
{
    visit_with(tree, test, VisitOptions::default(), visitor);
}

pub fn visit_with<F, R>(tree: &Node, test: &Test, options: VisitOptions, mut visitor: F)
where
    F: FnMut(&Node, Option<usize>, Option<&Node>) -> R,
    R: Into<VisitAction>,
{
    let check = test.compile();
    PreOrder::from(options).traverse(tree, &check, &mut |node, index, parent| {
        visitor(node, index, parent).into()
    });
}
