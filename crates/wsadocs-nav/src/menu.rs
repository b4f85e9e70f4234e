//! Sidebar menu projection.

use serde::Serialize;

use crate::expansion::ExpansionState;
use crate::forest::{NodeVisitor, RouteForest, Visit, WalkControl};
use crate::icon::{Icon, IconRegistry};
use crate::node::NodeId;
use crate::resolve::{is_active, is_ancestor_active};

/// One entry of the projected sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Identity of the source node; toggles refer to it.
    pub id: NodeId,
    /// Display title.
    pub title: String,
    /// Resolved icon.
    pub icon: Icon,
    /// Indentation level; roots are at level 0.
    pub level: usize,
    /// Group, link or label specifics.
    #[serde(flatten)]
    pub kind: MenuKind,
}

/// What a menu entry does when selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuKind {
    /// Toggle header for a node with children.
    ///
    /// A group node's own path is not a click target here even when the
    /// manifest sets one; the route table still serves it.
    Group {
        /// Member of the expansion state.
        open: bool,
        /// A direct child is active.
        ancestor_active: bool,
        /// Children are shown (`open || ancestor_active`).
        expanded: bool,
        /// Projected children; empty while collapsed unless projected
        /// with [`project_full_menu`].
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<MenuItem>,
    },
    /// Navigation link to a route path.
    Link {
        /// Route path.
        path: String,
        /// The path equals the current location.
        active: bool,
    },
    /// Node without path or children.
    Label,
}

/// Projected sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Menu {
    /// Root entries in declaration order.
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

struct MenuBuilder<'p> {
    expansion: &'p ExpansionState,
    location: &'p str,
    icons: &'p IconRegistry,
    /// Descend into collapsed groups too.
    include_collapsed: bool,
    /// Item lists under construction; the last one receives new items.
    levels: Vec<Vec<MenuItem>>,
    /// Group items waiting for their children.
    groups: Vec<MenuItem>,
}

impl MenuBuilder<'_> {
    fn push(&mut self, item: MenuItem) {
        if let Some(level) = self.levels.last_mut() {
            level.push(item);
        }
    }
}

impl<'a> NodeVisitor<'a> for MenuBuilder<'_> {
    fn enter(&mut self, visit: &Visit<'_, 'a>) -> WalkControl {
        let node = visit.node;
        let mut item = MenuItem {
            id: visit.id.clone(),
            title: node.title.clone(),
            icon: self.icons.resolve(node.icon.as_deref()),
            level: visit.level(),
            kind: MenuKind::Label,
        };

        if node.is_group() {
            let open = self.expansion.is_expanded(visit.id);
            let ancestor_active = is_ancestor_active(node, self.location);
            let expanded = open || ancestor_active;
            item.kind = MenuKind::Group {
                open,
                ancestor_active,
                expanded,
                children: Vec::new(),
            };
            self.groups.push(item);
            self.levels.push(Vec::new());
            return if expanded || self.include_collapsed {
                WalkControl::Descend
            } else {
                WalkControl::SkipChildren
            };
        }

        if let Some(path) = &node.path {
            item.kind = MenuKind::Link {
                path: path.clone(),
                active: is_active(node, self.location),
            };
        }
        self.push(item);
        WalkControl::SkipChildren
    }

    fn leave(&mut self, visit: &Visit<'_, 'a>) {
        if !visit.node.is_group() {
            return;
        }
        let collected = self.levels.pop().unwrap_or_default();
        if let Some(mut group) = self.groups.pop() {
            if let MenuKind::Group { children, .. } = &mut group.kind {
                *children = collected;
            }
            self.push(group);
        }
    }
}

/// Project the forest into the sidebar menu.
///
/// Icons resolve through `icons`. A group's children are included when the
/// group is in `expansion` or one of its direct children is active at
/// `location` (normalized). The result depends only on the inputs.
#[must_use]
pub fn project_menu(
    forest: &RouteForest,
    expansion: &ExpansionState,
    location: &str,
    icons: &IconRegistry,
) -> Menu {
    build_menu(forest, expansion, location, icons, false)
}

/// Like [`project_menu`], but every group carries its children.
///
/// `expanded` still reports whether they are shown, so a client can hide
/// collapsed subtrees and open them without another projection.
#[must_use]
pub fn project_full_menu(
    forest: &RouteForest,
    expansion: &ExpansionState,
    location: &str,
    icons: &IconRegistry,
) -> Menu {
    build_menu(forest, expansion, location, icons, true)
}

fn build_menu(
    forest: &RouteForest,
    expansion: &ExpansionState,
    location: &str,
    icons: &IconRegistry,
    include_collapsed: bool,
) -> Menu {
    let mut builder = MenuBuilder {
        expansion,
        location,
        icons,
        include_collapsed,
        levels: vec![Vec::new()],
        groups: Vec::new(),
    };
    forest.walk(&mut builder);
    Menu {
        items: builder.levels.pop().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::RouteNode;
    use crate::resolve::resolve_active_path;

    fn id(s: &str) -> NodeId {
        s.parse().unwrap()
    }

    fn sample() -> RouteForest {
        RouteForest::new(vec![
            RouteNode::leaf("Home", "").with_icon("FaInfoCircle"),
            RouteNode::group(
                "Guides",
                vec![
                    RouteNode::leaf("Intro", "intro").with_icon("FaPlayCircle"),
                    RouteNode::group("Deep", vec![RouteNode::leaf("Setup", "setup")])
                        .with_icon("FaCogs"),
                ],
            )
            .with_icon("FaToolbox"),
            RouteNode::label("Misc").with_icon("FaUnknown"),
        ])
    }

    fn group_state(item: &MenuItem) -> (bool, bool, bool, usize) {
        match &item.kind {
            MenuKind::Group {
                open,
                ancestor_active,
                expanded,
                children,
            } => (*open, *ancestor_active, *expanded, children.len()),
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_collapsed_groups_hide_children() {
        let menu = project_menu(&sample(), &ExpansionState::new(), "", &IconRegistry::new());

        assert_eq!(menu.items.len(), 3);
        assert_eq!(
            menu.items[0].kind,
            MenuKind::Link {
                path: String::new(),
                active: true,
            }
        );
        assert_eq!(group_state(&menu.items[1]), (false, false, false, 0));
        assert_eq!(menu.items[2].kind, MenuKind::Label);
    }

    #[test]
    fn test_icons_resolve_with_default() {
        let menu = project_menu(&sample(), &ExpansionState::new(), "", &IconRegistry::new());

        assert_eq!(menu.items[0].icon, Icon::InfoCircle);
        assert_eq!(menu.items[1].icon, Icon::Toolbox);
        assert_eq!(menu.items[2].icon, Icon::QuestionCircle);
    }

    #[test]
    fn test_open_group_shows_children_with_levels() {
        let expansion = ExpansionState::from_query("1");
        let menu = project_menu(&sample(), &expansion, "", &IconRegistry::new());

        let guides = &menu.items[1];
        assert_eq!(group_state(guides), (true, false, true, 2));
        let MenuKind::Group { children, .. } = &guides.kind else {
            unreachable!()
        };
        assert_eq!(children[0].title, "Intro");
        assert_eq!(children[0].level, 1);
        assert_eq!(children[0].id, id("1.0"));
        assert_eq!(group_state(&children[1]), (false, false, false, 0));
    }

    #[test]
    fn test_ancestor_active_group_shows_children_without_expansion() {
        let menu = project_menu(&sample(), &ExpansionState::new(), "intro", &IconRegistry::new());

        let guides = &menu.items[1];
        assert_eq!(group_state(guides), (false, true, true, 2));
        let MenuKind::Group { children, .. } = &guides.kind else {
            unreachable!()
        };
        assert_eq!(
            children[0].kind,
            MenuKind::Link {
                path: "intro".to_owned(),
                active: true,
            }
        );
    }

    #[test]
    fn test_deep_active_leaf_needs_expansion_above_parent() {
        // "setup" is two levels below Guides: only Deep is ancestor-active
        let forest = sample();
        let collapsed = project_menu(&forest, &ExpansionState::new(), "setup", &IconRegistry::new());
        assert_eq!(group_state(&collapsed.items[1]), (false, false, false, 0));

        let mut expansion = ExpansionState::new();
        expansion.sync_to(resolve_active_path(&forest, "setup").as_ref());
        let menu = project_menu(&forest, &expansion, "setup", &IconRegistry::new());

        let MenuKind::Group { children, .. } = &menu.items[1].kind else {
            unreachable!()
        };
        assert_eq!(group_state(&children[1]), (true, true, true, 1));
    }

    #[test]
    fn test_guides_intro_scenario() {
        let forest = RouteForest::new(vec![RouteNode::group(
            "Guides",
            vec![RouteNode::leaf("Intro", "intro")],
        )]);
        let trail = resolve_active_path(&forest, "intro").unwrap();
        assert_eq!(trail.titles(), vec!["Guides", "Intro"]);

        let mut expansion = ExpansionState::new();
        expansion.sync_to(Some(&trail));
        assert_eq!(expansion.to_query(), "0");

        let menu = project_menu(&forest, &expansion, "intro", &IconRegistry::new());
        assert_eq!(group_state(&menu.items[0]), (true, true, true, 1));
    }

    #[test]
    fn test_group_with_path_renders_as_group() {
        let forest = RouteForest::new(vec![
            RouteNode::group("Setup", vec![RouteNode::leaf("Linux", "setup/linux")])
                .with_path("setup"),
        ]);
        let menu = project_menu(&forest, &ExpansionState::new(), "setup", &IconRegistry::new());
        assert!(matches!(menu.items[0].kind, MenuKind::Group { .. }));
    }

    #[test]
    fn test_full_menu_keeps_collapsed_children() {
        let menu = project_full_menu(&sample(), &ExpansionState::new(), "", &IconRegistry::new());

        let guides = &menu.items[1];
        assert_eq!(group_state(guides), (false, false, false, 2));
        let MenuKind::Group { children, .. } = &guides.kind else {
            unreachable!()
        };
        assert_eq!(
            children[0].kind,
            MenuKind::Link {
                path: "intro".to_owned(),
                active: false,
            }
        );
        assert_eq!(group_state(&children[1]), (false, false, false, 1));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let forest = sample();
        let expansion = ExpansionState::from_query("1,1.1");
        let icons = IconRegistry::new();

        let first = project_menu(&forest, &expansion, "setup", &icons);
        let second = project_menu(&forest, &expansion, "setup", &icons);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_forest_projects_empty_menu() {
        let menu = project_menu(
            &RouteForest::empty(),
            &ExpansionState::new(),
            "",
            &IconRegistry::new(),
        );
        assert!(menu.is_empty());
    }

    #[test]
    fn test_menu_serialization() {
        let forest = RouteForest::new(vec![RouteNode::leaf("Intro", "intro")]);
        let menu = project_menu(&forest, &ExpansionState::new(), "intro", &IconRegistry::new());
        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{
                    "id": "0",
                    "title": "Intro",
                    "icon": "QuestionCircle",
                    "level": 0,
                    "kind": "link",
                    "path": "intro",
                    "active": true
                }]
            })
        );
    }
}
