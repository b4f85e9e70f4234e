//! Active-path resolution and active marking.

use serde::Serialize;

use crate::forest::{NodeVisitor, RouteForest, Visit, WalkControl};
use crate::node::{NodeId, RouteNode};

/// One node on an [`ActiveTrail`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrailStep {
    /// Node identity.
    pub id: NodeId,
    /// Node title.
    pub title: String,
}

/// Nodes from a root down to the node matching a location, inclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActiveTrail {
    steps: Vec<TrailStep>,
}

impl ActiveTrail {
    /// All steps, root first.
    #[must_use]
    pub fn steps(&self) -> &[TrailStep] {
        &self.steps
    }

    /// Titles along the trail, root first, matched node last.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.title.as_str()).collect()
    }

    /// The matched node.
    #[must_use]
    pub fn target(&self) -> &TrailStep {
        // A trail is only built from a match, so it has at least one step
        &self.steps[self.steps.len() - 1]
    }

    /// Every step except the matched node.
    #[must_use]
    pub fn ancestors(&self) -> &[TrailStep] {
        &self.steps[..self.steps.len() - 1]
    }
}

struct PathFinder<'l> {
    target: &'l str,
    found: Option<ActiveTrail>,
}

impl<'a> NodeVisitor<'a> for PathFinder<'_> {
    fn enter(&mut self, visit: &Visit<'_, 'a>) -> WalkControl {
        if visit.node.path.as_deref() != Some(self.target) {
            return WalkControl::Descend;
        }

        let steps = visit
            .id
            .ancestors()
            .into_iter()
            .zip(visit.ancestors)
            .chain(std::iter::once((visit.id.clone(), &visit.node)))
            .map(|(id, node)| TrailStep {
                id,
                title: node.title.clone(),
            })
            .collect();
        self.found = Some(ActiveTrail { steps });
        WalkControl::Stop
    }
}

/// Find the trail to the first node whose path equals `location`.
///
/// Depth-first pre-order over the forest; the earliest match in declaration
/// order wins and the walk stops there. `location` must already be
/// normalized (see [`normalize_location`](crate::normalize_location)).
/// Returns `None` when no node matches.
#[must_use]
pub fn resolve_active_path(forest: &RouteForest, location: &str) -> Option<ActiveTrail> {
    let mut finder = PathFinder {
        target: location,
        found: None,
    };
    forest.walk(&mut finder);
    finder.found
}

/// True if the node's own path equals `location`.
#[must_use]
pub fn is_active(node: &RouteNode, location: &str) -> bool {
    node.path.as_deref() == Some(location)
}

/// True if a direct child of the node is active.
///
/// Only one level is checked: a grandchild matching `location` does not
/// make this node ancestor-active.
#[must_use]
pub fn is_ancestor_active(node: &RouteNode, location: &str) -> bool {
    node.children.iter().any(|child| is_active(child, location))
}
