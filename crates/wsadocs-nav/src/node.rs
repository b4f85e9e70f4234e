//! Route nodes and their structural identity.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// One entry in the navigation forest.
///
/// A node with non-empty `children` is a group. A node with a `path` is
/// navigable. A node can be both: the menu shows it as a group while the
/// route table still serves its path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    /// Display label, unique only among siblings.
    pub title: String,
    /// Route path without leading or trailing slash (`""` is the landing page).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Symbolic icon name from the manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Child nodes in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// Navigable leaf.
    #[must_use]
    pub fn leaf(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: Some(path.into()),
            icon: None,
            children: Vec::new(),
        }
    }

    /// Pure group without a path.
    #[must_use]
    pub fn group(title: impl Into<String>, children: Vec<RouteNode>) -> Self {
        Self {
            title: title.into(),
            path: None,
            icon: None,
            children,
        }
    }

    /// Non-navigable label.
    #[must_use]
    pub fn label(title: impl Into<String>) -> Self {
        Self::group(title, Vec::new())
    }

    /// Set the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the route path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// True if the node has children.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Structural identity of a node: its index path from the root list.
///
/// `0.2.1` is the second child of the third child of the first root. Ids
/// are stable for the lifetime of a loaded forest and distinguish nodes
/// that share a title in different branches.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Vec<usize>);

impl NodeId {
    /// Id from raw indices.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Parse a comma-separated id list, skipping malformed entries.
    #[must_use]
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .filter(|part| !part.trim().is_empty())
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Error parsing a [`NodeId`] from text.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id: {0:?}")]
pub struct ParseNodeIdError(String);

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseNodeIdError(s.to_owned()));
        }
        s.split('.')
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| ParseNodeIdError(s.to_owned()))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
