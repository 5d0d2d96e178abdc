//! Node/edge export for graph visualisers

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Intent, KeywordNode};

/// Competitor titles listed in a node tooltip
const TOOLTIP_COMPETITORS: usize = 3;

/// Keyword text turned into a node id (every char outside `[a-zA-Z0-9]`
/// becomes `_`)
pub fn clean_id(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn color(intent: Intent) -> &'static str {
    match intent {
        Intent::Commercial => "#4CAF50",
        Intent::Informational => "#2196F3",
        Intent::Navigational => "#FFC107",
    }
}

fn size(depth: usize) -> u32 {
    match depth {
        0 => 15,
        1 => 12,
        _ => 10,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub size: u32,
    pub color: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphExport {
    /// Flatten a tree into nodes (pre-order) and parent-to-child edges
    pub fn from_tree(root: &KeywordNode) -> Self {
        let mut graph = Self::default();
        let mut used = HashSet::new();
        graph.visit(root, None, 0, &mut used);
        graph
    }

    fn visit(
        &mut self,
        node: &KeywordNode,
        parent: Option<&str>,
        depth: usize,
        used: &mut HashSet<String>,
    ) {
        let id = unique_id(&clean_id(&node.keyword), used);

        self.nodes.push(GraphNode {
            id: id.clone(),
            label: node.keyword.clone(),
            size: size(depth),
            color: color(node.intent).to_string(),
            tooltip: tooltip(node),
        });
        if let Some(parent) = parent {
            self.edges.push(GraphEdge {
                source: parent.to_string(),
                target: id.clone(),
            });
        }

        for child in &node.children {
            self.visit(child, Some(&id), depth + 1, used);
        }
    }
}

/// `base`, or `base_1`, `base_2`, … when already taken
fn unique_id(base: &str, used: &mut HashSet<String>) -> String {
    let mut id = base.to_string();
    let mut counter = 1;
    while used.contains(&id) {
        id = format!("{}_{}", base, counter);
        counter += 1;
    }
    used.insert(id.clone());
    id
}

fn tooltip(node: &KeywordNode) -> String {
    let mut text = format!(
        "Intent: {}\nWord Count: {}\nTitle: {}",
        node.intent, node.word_count, node.title
    );
    if !node.competitors.is_empty() {
        text.push_str("\n\nTop Competitors:");
        for competitor in node.competitors.iter().take(TOOLTIP_COMPETITORS) {
            text.push_str("\n• ");
            text.push_str(&competitor.title);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Competitor;
    use crate::types::keyword::fixtures::{leaf, small_tree};

    #[test]
    fn test_clean_id() {
        assert_eq!(clean_id("seo tools"), "seo_tools");
        assert_eq!(clean_id("what's new?"), "what_s_new_");
        assert_eq!(clean_id("café"), "caf_");
    }

    #[test]
    fn test_nodes_and_edges() {
        let graph = GraphExport::from_tree(&small_tree());

        assert_eq!(graph.nodes.len(), 5);
        assert_eq!(graph.edges.len(), 4);

        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            ["seo", "seo_tools", "best_seo_tools", "seo_tools_login", "what_is_seo"]
        );
        assert_eq!(
            graph.edges[1],
            GraphEdge {
                source: "seo_tools".to_string(),
                target: "best_seo_tools".to_string()
            }
        );

        let sizes: Vec<_> = graph.nodes.iter().map(|n| n.size).collect();
        assert_eq!(sizes, [15, 12, 10, 10, 12]);
        assert_eq!(graph.nodes[1].color, "#4CAF50");
        assert_eq!(graph.nodes[3].color, "#FFC107");
        assert_eq!(graph.nodes[4].color, "#2196F3");
    }

    #[test]
    fn test_colliding_ids_get_suffixes() {
        let mut root = leaf("seo", Intent::Commercial);
        root.children = vec![
            leaf("seo", Intent::Commercial),
            leaf("seo?", Intent::Commercial),
            leaf("seo_1", Intent::Commercial),
        ];

        let graph = GraphExport::from_tree(&root);
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["seo", "seo_1", "seo_", "seo_1_1"]);
    }

    #[test]
    fn test_tooltip_lists_three_competitors() {
        let mut node = leaf("crm", Intent::Navigational);
        node.competitors = (1..=5)
            .map(|i| Competitor::new(format!("Site {}", i), format!("https://s{}.com", i)))
            .collect();

        let tip = tooltip(&node);
        assert!(tip.starts_with("Intent: Navigational\nWord Count: 800\nTitle: All About crm"));
        assert!(tip.contains("\n\nTop Competitors:\n• Site 1\n• Site 2\n• Site 3"));
        assert!(!tip.contains("Site 4"));

        node.competitors.clear();
        assert!(!tooltip(&node).contains("Competitors"));
    }
}
