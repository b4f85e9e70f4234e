//! Route projection: the flat list of navigable endpoints.

use std::collections::HashMap;

use serde::Serialize;

use crate::forest::{NodeVisitor, RouteForest, Visit, WalkControl};
use crate::node::NodeId;

/// One navigable endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// Route path (`""` is the landing page).
    pub path: String,
    /// Page identifier used to fetch content; the node's path verbatim.
    pub page: String,
    /// Title of the node that declared the route.
    pub title: String,
    /// Identity of the node that declared the route.
    pub node: NodeId,
}

struct Flattener {
    entries: Vec<RouteEntry>,
}

impl<'a> NodeVisitor<'a> for Flattener {
    fn enter(&mut self, visit: &Visit<'_, 'a>) -> WalkControl {
        if let Some(path) = &visit.node.path {
            self.entries.push(RouteEntry {
                path: path.clone(),
                page: path.clone(),
                title: visit.node.title.clone(),
                node: visit.id.clone(),
            });
        }
        WalkControl::Descend
    }
}

/// Every node carrying a path, in depth-first declaration order.
///
/// Groups that also carry a path emit their own entry. The empty path is
/// a valid entry. Duplicate paths are all emitted; [`RouteTable`] serves
/// the first.
#[must_use]
pub fn flatten(forest: &RouteForest) -> Vec<RouteEntry> {
    let mut flattener = Flattener {
        entries: Vec::new(),
    };
    forest.walk(&mut flattener);
    flattener.entries
}

/// Outcome of routing a location.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch<'t> {
    /// A manifest route.
    Page(&'t RouteEntry),
    /// No route matched; the static welcome view applies.
    Fallback,
}

/// Lookup table over the flattened routes.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    /// Table over `entries`; the first entry wins for duplicate paths.
    #[must_use]
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.path.clone()).or_insert(i);
        }
        Self { entries, index }
    }

    /// Table over the flattened forest.
    #[must_use]
    pub fn from_forest(forest: &RouteForest) -> Self {
        Self::new(flatten(forest))
    }

    /// Route a normalized location.
    #[must_use]
    pub fn resolve(&self, location: &str) -> RouteMatch<'_> {
        self.index
            .get(location)
            .map_or(RouteMatch::Fallback, |&i| RouteMatch::Page(&self.entries[i]))
    }

    /// All entries in declaration order, duplicates included.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
