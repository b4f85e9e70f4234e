//! Per-visit UI state.
//!
//! A [`Session`] tracks the current location and the sidebar expansion.
//! Each request rebuilds it from the link that was followed, and the page
//! for that location is rendered within the same request, so a response
//! can never belong to a location the visitor already left.

use wsadocs_nav::{ExpansionState, NodeId, RouteForest, resolve_active_path};

/// UI state for one visitor.
#[derive(Clone, Debug, Default)]
pub struct Session {
    location: Option<String>,
    expansion: ExpansionState,
}

impl Session {
    /// Rebuild a session from request parameters.
    ///
    /// `open` is the serialized expansion state carried by the link and `at`
    /// the location the link was generated from. When `at` equals
    /// `location` the request is a toggle and `open` is used as given;
    /// otherwise it is a navigation and the expansion is recomputed.
    #[must_use]
    pub fn restore(
        forest: &RouteForest,
        location: &str,
        open: Option<&str>,
        at: Option<&str>,
    ) -> Self {
        let expansion = open.map(ExpansionState::from_query).unwrap_or_default();
        let mut session = Self {
            location: at.map(str::to_owned),
            expansion,
        };
        session.navigate(forest, location);
        session
    }

    /// Current location, if any navigation happened.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Sidebar expansion state.
    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Move to `location` (normalized).
    ///
    /// Returns false without touching the expansion when the location is
    /// unchanged. Otherwise the expansion follows the active trail; when no
    /// node matches, manual expansions are kept.
    pub fn navigate(&mut self, forest: &RouteForest, location: &str) -> bool {
        if self.location.as_deref() == Some(location) {
            return false;
        }
        self.location = Some(location.to_owned());
        self.expansion
            .sync_to(resolve_active_path(forest, location).as_ref());
        true
    }

    /// Flip a group open or closed. Returns the new state.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        self.expansion.toggle(id)
    }
}
