//! Sidebar expansion state.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::node::NodeId;
use crate::resolve::ActiveTrail;

/// Set of expanded groups, keyed by structural identity.
///
/// Two groups with the same title in different branches have different
/// ids and expand independently.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpansionState {
    open: BTreeSet<NodeId>,
}

impl ExpansionState {
    /// Empty state: every group collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State from a comma-separated id list, e.g. `0,2.1`.
    ///
    /// Malformed ids are ignored.
    #[must_use]
    pub fn from_query(list: &str) -> Self {
        NodeId::parse_list(list).into_iter().collect()
    }

    /// Comma-separated id list, the inverse of [`from_query`](Self::from_query).
    #[must_use]
    pub fn to_query(&self) -> String {
        self.open
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// True if the group is expanded.
    #[must_use]
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.open.contains(id)
    }

    /// Flip membership of `id`. Returns the new membership.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        if self.open.remove(id) {
            false
        } else {
            self.open.insert(id.clone());
            true
        }
    }

    /// Copy with `id` toggled.
    #[must_use]
    pub fn toggled(&self, id: &NodeId) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    /// Recompute after the active location changed.
    ///
    /// A resolved trail replaces the state with the trail's ancestors. When
    /// nothing matched (`None`) the state is left as it is, so manual
    /// expansions survive visits to unknown locations. Returns true if the
    /// state was replaced.
    pub fn sync_to(&mut self, trail: Option<&ActiveTrail>) -> bool {
        let Some(trail) = trail else {
            return false;
        };
        self.open = trail.ancestors().iter().map(|step| step.id.clone()).collect();
        true
    }

    /// Expanded ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.open.iter()
    }

    /// Number of expanded groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// True if no group is expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

impl FromIterator<NodeId> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            open: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::forest::RouteForest;
    use crate::node::RouteNode;
    use crate::resolve::resolve_active_path;

    fn id(s: &str) -> NodeId {
        s.parse().unwrap()
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut state = ExpansionState::from_query("1");
        let before = state.clone();

        assert!(state.toggle(&id("0")));
        assert!(state.is_expanded(&id("0")));
        assert!(!state.toggle(&id("0")));
        assert_eq!(state, before);

        assert!(!state.toggle(&id("1")));
        assert!(state.toggle(&id("1")));
        assert_eq!(state, before);
    }

    #[test]
    fn test_query_round_trip_is_sorted() {
        let state = ExpansionState::from_query("2.1,0,x,1");
        assert_eq!(state.to_query(), "0,1,2.1");
        assert_eq!(ExpansionState::from_query(&state.to_query()), state);
        assert!(ExpansionState::from_query("").is_empty());
    }

    #[test]
    fn test_sync_replaces_with_ancestors() {
        let forest = RouteForest::new(vec![RouteNode::group(
            "Guides",
            vec![RouteNode::leaf("Intro", "intro")],
        )]);
        let mut state = ExpansionState::from_query("3,4");

        let trail = resolve_active_path(&forest, "intro");
        assert!(state.sync_to(trail.as_ref()));

        assert_eq!(state.iter().cloned().collect::<Vec<_>>(), vec![id("0")]);
    }

    #[test]
    fn test_sync_without_match_leaves_state() {
        let mut state = ExpansionState::from_query("3,4");
        assert!(!state.sync_to(None));
        assert_eq!(state.to_query(), "3,4");
    }

    #[test]
    fn test_duplicate_titles_expand_independently() {
        let forest = RouteForest::new(vec![
            RouteNode::group("Setup", vec![RouteNode::leaf("Linux", "a/linux")]),
            RouteNode::group("Setup", vec![RouteNode::leaf("Linux", "b/linux")]),
        ]);
        let mut state = ExpansionState::new();
        state.sync_to(resolve_active_path(&forest, "b/linux").as_ref());

        assert!(!state.is_expanded(&id("0")));
        assert!(state.is_expanded(&id("1")));
    }

    #[test]
    fn test_toggled_leaves_original() {
        let state = ExpansionState::new();
        let next = state.toggled(&id("0"));
        assert!(state.is_empty());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_serializes_as_id_list() {
        let state = ExpansionState::from_query("1,0.2");
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"["0.2","1"]"#);
    }
}
