//! Bundled fallback data for the two degraded paths.
//!
//! Used only when the live listing cannot be retrieved; the data is
//! immutable and compiled into the binary.

use indexmap::IndexMap;

use tendril_core::{DirectoryNode, NodeKind};

/// Common component names returned when the live component listing is
/// unavailable
pub const FALLBACK_COMPONENTS: &[&str] = &[
    "accordion",
    "alert",
    "alert-dialog",
    "avatar",
    "badge",
    "breadcrumb",
    "button",
    "calendar",
    "card",
    "checkbox",
    "dialog",
    "dropdown-menu",
    "form",
    "input",
    "label",
    "pagination",
    "popover",
    "select",
    "separator",
    "sheet",
    "skeleton",
    "switch",
    "table",
    "tabs",
    "textarea",
    "tooltip",
];

/// Fallback component list as owned names, already sorted
pub fn fallback_components() -> Vec<String> {
    FALLBACK_COMPONENTS.iter().map(|s| s.to_string()).collect()
}

/// Minimal placeholder tree returned when the default-root tree build is
/// rate-limited
pub fn placeholder_tree(root: &str) -> DirectoryNode {
    let mut children = IndexMap::new();
    for dir in ["ui", "examples", "blocks"] {
        children.insert(
            dir.to_string(),
            DirectoryNode::directory(format!("{root}/{dir}")),
        );
    }
    DirectoryNode {
        path: root.to_string(),
        kind: NodeKind::Directory { children },
    }
}
