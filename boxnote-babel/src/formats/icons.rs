//! Icon mapping for tree visualization

/// Get the Unicode icon for a document model node type
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Paragraph" => "¶",
        "Heading" => "§",
        "Run" => "◦",
        "Hyperlink" => "⊕",
        "Break" => "↵",
        "Table" => "☰",
        "Cell" => "▫",
        "Image" => "▣",
        _ => "○",
    }
}
