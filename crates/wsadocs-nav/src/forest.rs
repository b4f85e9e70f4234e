//! The route forest and its depth-first traversal.
//!
//! Every consumer of the tree (active-path resolution, menu projection,
//! route flattening) walks it through [`RouteForest::walk`], so they agree
//! on pre-order and on declaration-order tie-breaks.

use std::ops::ControlFlow;

use crate::node::{NodeId, RouteNode};

/// What the walk does after [`NodeVisitor::enter`] returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkControl {
    /// Visit the node's children next.
    Descend,
    /// Continue with the next sibling, skipping this subtree.
    SkipChildren,
    /// End the walk immediately; no further `enter` or `leave` calls.
    Stop,
}

/// A node as seen during the walk.
#[derive(Debug)]
pub struct Visit<'v, 'a> {
    /// The visited node.
    pub node: &'a RouteNode,
    /// Structural identity of the node.
    pub id: &'v NodeId,
    /// Ancestors from root to parent.
    pub ancestors: &'v [&'a RouteNode],
}

impl Visit<'_, '_> {
    /// Nesting level; roots are at level 0.
    #[must_use]
    pub fn level(&self) -> usize {
        self.ancestors.len()
    }
}

/// Per-node callbacks for [`RouteForest::walk`].
pub trait NodeVisitor<'a> {
    /// Called in pre-order, before any child.
    fn enter(&mut self, visit: &Visit<'_, 'a>) -> WalkControl;

    /// Called after the node's subtree was walked or skipped.
    fn leave(&mut self, _visit: &Visit<'_, 'a>) {}
}

/// Ordered sequence of root nodes, immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteForest {
    roots: Vec<RouteNode>,
}

impl RouteForest {
    /// Forest from root nodes.
    #[must_use]
    pub fn new(roots: Vec<RouteNode>) -> Self {
        Self { roots }
    }

    /// Forest with no nodes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Root nodes in declaration order.
    #[must_use]
    pub fn roots(&self) -> &[RouteNode] {
        &self.roots
    }

    /// True if there are no root nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    #[must_use]
    pub fn node_count(&self) -> usize {
        struct Counter(usize);
        impl<'a> NodeVisitor<'a> for Counter {
            fn enter(&mut self, _visit: &Visit<'_, 'a>) -> WalkControl {
                self.0 += 1;
                WalkControl::Descend
            }
        }

        let mut counter = Counter(0);
        self.walk(&mut counter);
        counter.0
    }

    /// Walk every node depth-first in pre-order.
    ///
    /// Siblings are visited in declaration order. The visitor decides per
    /// node whether to descend, skip the subtree, or stop the walk.
    pub fn walk<'a, V: NodeVisitor<'a>>(&'a self, visitor: &mut V) {
        let mut indices = Vec::new();
        let mut ancestors = Vec::new();
        let _ = walk_level(&self.roots, &mut indices, &mut ancestors, visitor);
    }
}

fn walk_level<'a, V: NodeVisitor<'a>>(
    nodes: &'a [RouteNode],
    indices: &mut Vec<usize>,
    ancestors: &mut Vec<&'a RouteNode>,
    visitor: &mut V,
) -> ControlFlow<()> {
    for (index, node) in nodes.iter().enumerate() {
        indices.push(index);
        let id = NodeId::new(indices.clone());

        let control = visitor.enter(&Visit {
            node,
            id: &id,
            ancestors: ancestors.as_slice(),
        });

        match control {
            WalkControl::Stop => return ControlFlow::Break(()),
            WalkControl::Descend if node.is_group() => {
                ancestors.push(node);
                let flow = walk_level(&node.children, indices, ancestors, visitor);
                ancestors.pop();
                flow?;
            }
            WalkControl::Descend | WalkControl::SkipChildren => {}
        }

        visitor.leave(&Visit {
            node,
            id: &id,
            ancestors: ancestors.as_slice(),
        });
        indices.pop();
    }
    ControlFlow::Continue(())
}
