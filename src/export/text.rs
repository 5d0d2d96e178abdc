//! Plain-text renderings: keyword list, CSV and outline

use crate::types::KeywordNode;

/// One keyword per line, parent before children
pub fn render_keywords(root: &KeywordNode) -> String {
    root.iter()
        .map(|(node, _)| node.keyword.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

const CSV_HEADER: &str = "Keyword,Intent,Word Count,Title";

/// CSV with one row per node in pre-order. Titles are always quoted; other
/// fields only when they contain a delimiter, quote or line break.
pub fn render_csv(root: &KeywordNode) -> String {
    let mut out = String::from(CSV_HEADER);
    for (node, _) in root.iter() {
        out.push('\n');
        out.push_str(&csv_field(&node.keyword, false));
        out.push(',');
        out.push_str(node.intent.as_str());
        out.push(',');
        out.push_str(&node.word_count.to_string());
        out.push(',');
        out.push_str(&csv_field(&node.title, true));
    }
    out.push('\n');
    out
}

fn csv_field(value: &str, always_quote: bool) -> String {
    if always_quote || value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Indented text view with intent and word count per node
pub fn render_outline(root: &KeywordNode) -> String {
    let mut out = String::new();
    for (node, depth) in root.iter() {
        let indent = "  ".repeat(depth);
        let bullet = if depth == 0 { "#" } else { "-" };
        out.push_str(&format!(
            "{}{} {} [{}, {} words]\n",
            indent, bullet, node.keyword, node.intent, node.word_count
        ));
        out.push_str(&format!("{}  {}\n", indent, node.title));
    }
    out
}
