use console::{StyledObject, style};

use crate::types::{Intent, KeywordNode};

/// Styled terminal output for command results
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn failure(&self, message: &str) {
        println!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Aligned `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<14} {}", style(format!("{}:", label)).dim(), value);
    }

    /// Compact tree view: keyword, coloured intent, word count
    pub fn tree(&self, root: &KeywordNode) {
        for (node, depth) in root.iter() {
            let branch = if depth == 0 { "" } else { "└─ " };
            println!(
                "{}{}{} {} {}",
                "   ".repeat(depth.saturating_sub(1)),
                branch,
                style(&node.keyword).bold(),
                intent_label(node.intent),
                style(format!("{} words", node.word_count)).dim()
            );
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

fn intent_label(intent: Intent) -> StyledObject<String> {
    let label = format!("[{}]", intent);
    match intent {
        Intent::Commercial => style(label).green(),
        Intent::Informational => style(label).blue(),
        Intent::Navigational => style(label).yellow(),
    }
}
