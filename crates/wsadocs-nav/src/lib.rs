//! Route tree model for WSADOCS.
//!
//! The navigation manifest describes an ordered forest of [`RouteNode`]s.
//! This crate owns everything computed from that forest:
//!
//! - [`parse_manifest`]: lenient manifest parsing into a [`RouteForest`]
//! - [`RouteForest::walk`]: the single depth-first traversal every consumer
//!   builds on, so ordering and tie-breaks agree everywhere
//! - [`resolve_active_path`]: the trail from a root to the node matching a
//!   location, plus [`is_active`] / [`is_ancestor_active`] marking
//! - [`ExpansionState`]: which groups are open, keyed by [`NodeId`]
//! - [`project_menu`] / [`project_full_menu`]: the nested sidebar structure
//! - [`flatten`] and [`RouteTable`]: the navigable endpoints
//! - [`IconRegistry`]: typed icon lookup with a default
//!
//! Nothing here performs I/O.

mod expansion;
mod forest;
mod icon;
mod location;
mod manifest;
mod menu;
mod node;
mod resolve;
mod routes;

pub use expansion::ExpansionState;
pub use forest::{NodeVisitor, RouteForest, Visit, WalkControl};
pub use icon::{Icon, IconRegistry};
pub use location::{normalize_location, route_href};
pub use manifest::{ManifestError, ParsedManifest, parse_manifest};
pub use menu::{Menu, MenuItem, MenuKind, project_full_menu, project_menu};
pub use node::{NodeId, ParseNodeIdError, RouteNode};
pub use resolve::{ActiveTrail, TrailStep, is_active, is_ancestor_active, resolve_active_path};
pub use routes::{RouteEntry, RouteMatch, RouteTable, flatten};
