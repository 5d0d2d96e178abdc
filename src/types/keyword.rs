//! Keyword tree data model
//!
//! A generated taxonomy is a tree of [`KeywordNode`]s. Every node is fully
//! enriched (intent, title, word count, competitors) at construction time and
//! the tree is not mutated afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Presumed purpose behind a search query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Commercial,
    Informational,
    Navigational,
}

impl Intent {
    /// All categories, in declaration order
    pub const ALL: [Intent; 3] = [
        Intent::Commercial,
        Intent::Informational,
        Intent::Navigational,
    ];

    /// Pick a category uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Recommended article length for this intent
    pub fn word_count_range(&self) -> RangeInclusive<u32> {
        match self {
            Intent::Informational => 1500..=2500,
            Intent::Commercial => 1200..=2000,
            Intent::Navigational => 800..=1500,
        }
    }

    /// Recognize a category inside free text (e.g. a model reply).
    ///
    /// Checked in the order commercial, navigational, informational; the first
    /// category name found anywhere in the text wins.
    pub fn from_reply(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("commercial") {
            Some(Intent::Commercial)
        } else if lower.contains("navigational") {
            Some(Intent::Navigational)
        } else if lower.contains("informational") {
            Some(Intent::Informational)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Commercial => "Commercial",
            Intent::Informational => "Informational",
            Intent::Navigational => "Navigational",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "commercial" => Ok(Intent::Commercial),
            "informational" => Ok(Intent::Informational),
            "navigational" => Ok(Intent::Navigational),
            _ => Err(format!(
                "Unknown intent: {}. Valid values: commercial, informational, navigational",
                s
            )),
        }
    }
}

/// A ranking page competing for a keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub title: String,
    pub url: String,
}

impl Competitor {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// One keyword in the generated taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordNode {
    pub keyword: String,
    pub intent: Intent,
    pub title: String,
    pub word_count: u32,
    pub competitors: Vec<Competitor>,
    pub children: Vec<KeywordNode>,
}

impl KeywordNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Number of levels below this node (0 for a leaf)
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Parent-before-children, depth-first traversal
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(self, 0)],
        }
    }
}

/// Pre-order iterator yielding each node with its depth below the start node
pub struct Preorder<'a> {
    stack: Vec<(&'a KeywordNode, usize)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (&'a KeywordNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Reverse so the first child is visited next
        self.stack
            .extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        Some((node, depth))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn leaf(keyword: &str, intent: Intent) -> KeywordNode {
        KeywordNode {
            keyword: keyword.to_string(),
            intent,
            title: format!("All About {}", keyword),
            word_count: *intent.word_count_range().start(),
            competitors: vec![Competitor::new(
                format!("{} guide", keyword),
                format!("https://www.example.com/{}/", keyword.replace(' ', "-")),
            )],
            children: Vec::new(),
        }
    }

    /// root -> [a -> [a1, a2], b]
    pub fn small_tree() -> KeywordNode {
        let mut a = leaf("seo tools", Intent::Commercial);
        a.children.push(leaf("best seo tools", Intent::Commercial));
        a.children.push(leaf("seo tools login", Intent::Navigational));
        let b = leaf("what is seo", Intent::Informational);

        let mut root = leaf("seo", Intent::Informational);
        root.children = vec![a, b];
        root
    }
}
