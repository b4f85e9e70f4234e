//! Navigation manifest parsing.
//!
//! The manifest is a JSON array of nodes:
//!
//! ```json
//! [
//!   {"title": "Home", "path": "", "icon": "FaInfoCircle"},
//!   {"title": "Guides", "children": [{"title": "Intro", "path": "intro"}]}
//! ]
//! ```
//!
//! A document that is not a JSON array is rejected. Individual malformed
//! nodes are not: they degrade to non-navigable labels (or are dropped when
//! nothing usable remains) and a warning is recorded.

use serde_json::{Map, Value};

use crate::forest::RouteForest;
use crate::node::RouteNode;

/// Title given to nodes whose title is missing or not a string.
const UNTITLED: &str = "Untitled";

/// Manifest document could not be used at all.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Not valid JSON.
    #[error("Manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON, but the top level is not an array.
    #[error("Manifest must be a JSON array, found {0}")]
    NotAnArray(&'static str),
}

/// Parsed forest plus degradations applied to malformed nodes.
#[derive(Debug, Default)]
pub struct ParsedManifest {
    /// The route forest.
    pub forest: RouteForest,
    /// One message per degraded node, with its JSON pointer.
    pub warnings: Vec<String>,
}

/// Parse a manifest document.
///
/// Paths are stored without leading or trailing slashes, so `"/intro/"`
/// and `"intro"` route identically.
///
/// # Errors
///
/// Returns [`ManifestError`] if the document is not JSON or not an array.
pub fn parse_manifest(json: &str) -> Result<ParsedManifest, ManifestError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(ManifestError::NotAnArray(kind_name(&other))),
    };

    let mut warnings = Vec::new();
    let roots = parse_nodes(&items, "", &mut warnings);
    Ok(ParsedManifest {
        forest: RouteForest::new(roots),
        warnings,
    })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_nodes(items: &[Value], pointer: &str, warnings: &mut Vec<String>) -> Vec<RouteNode> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| parse_node(item, &format!("{pointer}/{i}"), warnings))
        .collect()
}

fn parse_node(value: &Value, pointer: &str, warnings: &mut Vec<String>) -> Option<RouteNode> {
    match value {
        Value::Object(map) => Some(parse_object(map, pointer, warnings)),
        Value::String(title) => {
            warnings.push(format!("{pointer}: bare string entry treated as a label"));
            Some(RouteNode::label(title.clone()))
        }
        other => {
            warnings.push(format!(
                "{pointer}: expected an object, found {}; entry dropped",
                kind_name(other)
            ));
            None
        }
    }
}

fn parse_object(map: &Map<String, Value>, pointer: &str, warnings: &mut Vec<String>) -> RouteNode {
    let title = match map.get("title") {
        Some(Value::String(title)) => Some(title.clone()),
        Some(other) => {
            warnings.push(format!(
                "{pointer}/title: expected a string, found {}",
                kind_name(other)
            ));
            None
        }
        None => {
            warnings.push(format!("{pointer}: missing title"));
            None
        }
    };

    let path = optional_string(map, "path", pointer, warnings)
        .map(|path| path.trim_matches('/').to_owned());
    let icon = optional_string(map, "icon", pointer, warnings);

    let children = match map.get("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => parse_nodes(items, &format!("{pointer}/children"), warnings),
        Some(other) => {
            warnings.push(format!(
                "{pointer}/children: expected an array, found {}",
                kind_name(other)
            ));
            Vec::new()
        }
    };

    // A node without a usable title is a configuration error: keep it
    // visible but not navigable
    let (title, path) = match title {
        Some(title) => (title, path),
        None => {
            if path.is_some() {
                warnings.push(format!("{pointer}: untitled node is not navigable"));
            }
            (UNTITLED.to_owned(), None)
        }
    };

    RouteNode {
        title,
        path,
        icon,
        children,
    }
}

fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    pointer: &str,
    warnings: &mut Vec<String>,
) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            warnings.push(format!(
                "{pointer}/{key}: expected a string, found {}; ignored",
                kind_name(other)
            ));
            None
        }
    }
}
