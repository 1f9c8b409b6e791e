//! Flattening of Doxygen rich text into table-safe strings

use roxmltree::Node;

/// Placeholder for documentation that does not exist at all
pub const NOT_AVAILABLE: &str = "<documentation is not available>";

/// Concatenate every text node below `node`, in document order.
///
/// Inline markup (`<ref>`, `<computeroutput>`, nested `<para>`...) is
/// dropped; its character content is kept.
pub fn flatten_text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Escape text for a double-quoted CSV cell
pub fn escape_cell(text: &str) -> String {
    text.replace('"', "\"\"")
}

/// Flatten and escape a fragment, keeping absence as `None`
pub fn normalize_opt(node: Option<Node>) -> Option<String> {
    node.map(|n| escape_cell(&flatten_text(n)))
}

/// Flatten and escape a fragment; an absent fragment yields [`NOT_AVAILABLE`]
pub fn normalize(node: Option<Node>) -> String {
    normalize_opt(node).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
