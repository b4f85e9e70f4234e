//! Typed icon registry.
//!
//! Manifest nodes name their icon with a string such as `FaInfoCircle`.
//! Names resolve through an [`IconRegistry`] to an [`Icon`]; unknown or
//! missing names resolve to the registry default, never to an error.

use std::collections::HashMap;

use serde::Serialize;

/// Icons available to navigation nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    InfoCircle,
    Download,
    Toolbox,
    Chrome,
    PlayCircle,
    Cogs,
    NetworkWired,
    Edit,
    PlusCircle,
    Tasks,
    ChevronDown,
    ChevronRight,
    #[default]
    QuestionCircle,
}

impl Icon {
    /// Every icon, in registry order.
    pub const ALL: [Icon; 13] = [
        Icon::InfoCircle,
        Icon::Download,
        Icon::Toolbox,
        Icon::Chrome,
        Icon::PlayCircle,
        Icon::Cogs,
        Icon::NetworkWired,
        Icon::Edit,
        Icon::PlusCircle,
        Icon::Tasks,
        Icon::ChevronDown,
        Icon::ChevronRight,
        Icon::QuestionCircle,
    ];

    /// Manifest name of the icon.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Icon::InfoCircle => "FaInfoCircle",
            Icon::Download => "FaDownload",
            Icon::Toolbox => "FaToolbox",
            Icon::Chrome => "FaChrome",
            Icon::PlayCircle => "FaPlayCircle",
            Icon::Cogs => "FaCogs",
            Icon::NetworkWired => "FaNetworkWired",
            Icon::Edit => "FaEdit",
            Icon::PlusCircle => "FaPlusCircle",
            Icon::Tasks => "FaTasks",
            Icon::ChevronDown => "FaChevronDown",
            Icon::ChevronRight => "FaChevronRight",
            Icon::QuestionCircle => "FaQuestionCircle",
        }
    }

    /// Inline SVG markup, sized by CSS through the `icon` class.
    #[must_use]
    pub fn svg(self) -> &'static str {
        match self {
            Icon::InfoCircle => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<circle cx="8" cy="8" r="7" fill="none" stroke="currentColor" stroke-width="1.5"/>"#,
                r#"<rect x="7.25" y="7" width="1.5" height="5" fill="currentColor"/>"#,
                r#"<circle cx="8" cy="4.75" r="1" fill="currentColor"/></svg>"#
            ),
            Icon::Download => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<path d="M8 1v9M4 6l4 4 4-4M2 13h12" fill="none" stroke="currentColor" stroke-width="1.5"/></svg>"#
            ),
            Icon::Toolbox => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<path d="M1 6h14v8H1zM5 6V3h6v3M1 9h14" fill="none" stroke="currentColor" stroke-width="1.5"/></svg>"#
            ),
            Icon::Chrome => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<circle cx="8" cy="8" r="7" fill="none" stroke="currentColor" stroke-width="1.5"/>"#,
                r#"<circle cx="8" cy="8" r="2.5" fill="none" stroke="currentColor" stroke-width="1.5"/></svg>"#
            ),
            Icon::PlayCircle => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<circle cx="8" cy="8" r="7" fill="none" stroke="currentColor" stroke-width="1.5"/>"#,
                r#"<path d="M6.5 5v6l5-3z" fill="currentColor"/></svg>"#
            ),
            Icon::Cogs => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<circle cx="8" cy="8" r="2.5" fill="none" stroke="currentColor" stroke-width="1.5"/>"#,
                r#"<path d="M8 1v3M8 12v3M1 8h3M12 8h3M3 3l2 2M11 11l2 2M3 13l2-2M11 5l2-2" "#,
                r#"stroke="currentColor" stroke-width="1.5"/></svg>"#
            ),
            Icon::NetworkWired => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<path d="M6 1h4v3H6zM1 12h4v3H1zM11 12h4v3h-4zM8 4v4M3 12V8h10v4" "#,
                r#"fill="none" stroke="currentColor" stroke-width="1.5"/></svg>"#
            ),
            Icon::Edit => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<path d="M11 2l3 3-8 8H3v-3zM2 15h12" fill="none" stroke="currentColor" stroke-width="1.5"/></svg>"#
            ),
            Icon::PlusCircle => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<circle cx="8" cy="8" r="7" fill="none" stroke="currentColor" stroke-width="1.5"/>"#,
                r#"<path d="M8 4.5v7M4.5 8h7" stroke="currentColor" stroke-width="1.5"/></svg>"#
            ),
            Icon::Tasks => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<path d="M1 3l1.5 1.5L5 2M1 8l1.5 1.5L5 7M1 13l1.5 1.5L5 12M7 3h8M7 8h8M7 13h8" "#,
                r#"fill="none" stroke="currentColor" stroke-width="1.5"/></svg>"#
            ),
            Icon::ChevronDown => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<path d="M3 6l5 5 5-5" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#
            ),
            Icon::ChevronRight => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<path d="M6 3l5 5-5 5" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#
            ),
            Icon::QuestionCircle => concat!(
                r#"<svg class="icon" viewBox="0 0 16 16" aria-hidden="true">"#,
                r#"<circle cx="8" cy="8" r="7" fill="none" stroke="currentColor" stroke-width="1.5"/>"#,
                r#"<path d="M5.75 6a2.25 2.25 0 1 1 3 2.1c-.5.2-.75.6-.75 1.1V10" "#,
                r#"fill="none" stroke="currentColor" stroke-width="1.5"/>"#,
                r#"<circle cx="8" cy="12.25" r="1" fill="currentColor"/></svg>"#
            ),
        }
    }
}

/// Maps manifest icon names to [`Icon`]s with an explicit default.
#[derive(Clone, Debug)]
pub struct IconRegistry {
    entries: HashMap<String, Icon>,
    default: Icon,
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self {
            entries: Icon::ALL
                .iter()
                .map(|icon| (icon.name().to_owned(), *icon))
                .collect(),
            default: Icon::default(),
        }
    }
}

impl IconRegistry {
    /// Registry with every built-in icon under its manifest name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a manifest name; missing or unknown names give the default.
    #[must_use]
    pub fn resolve(&self, name: Option<&str>) -> Icon {
        name.and_then(|name| self.entries.get(name))
            .copied()
            .unwrap_or(self.default)
    }
}
