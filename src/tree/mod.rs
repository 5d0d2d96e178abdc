//! Keyword Tree Builder
//!
//! Expands one seed keyword into a bounded taxonomy:
//!
//! ```text
//! seed ─┬─ up to 5 first-level keywords
//!       │    └─ up to 3 second-level keywords each   (depth ≥ 2)
//!       │         └─ up to 2 third-level keywords each (depth ≥ 3)
//! ```
//!
//! Every node is enriched through the [`FallbackResolver`]. Expansion is a
//! single recursive walk over the fan-out table, run sequentially.

use std::collections::BTreeMap;
use std::time::Instant;

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, info, instrument, warn};

use crate::ai::provider::{FallbackResolver, Source};
use crate::constants::tree::{BRANCHING, MAX_DEPTH, MIN_DEPTH};
use crate::types::{Intent, KeyweaveError, KeywordNode, Result};

// =============================================================================
// Request
// =============================================================================

/// Validated build input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRequest {
    pub seed: String,
    /// Levels below the root, always within 1..=3
    pub depth: u8,
    /// Extra title instruction, never blank
    pub instruction: Option<String>,
}

impl TreeRequest {
    /// Trim inputs and clamp depth. A blank seed is rejected.
    pub fn new(seed: &str, depth: u8, instruction: Option<&str>) -> Result<Self> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(KeyweaveError::missing(
                "keyword",
                "Please enter a main keyword to generate a structure",
            ));
        }

        let clamped = depth.clamp(MIN_DEPTH, MAX_DEPTH);
        if clamped != depth {
            warn!(requested = depth, using = clamped, "Depth out of range, clamped");
        }

        Ok(Self {
            seed: seed.to_string(),
            depth: clamped,
            instruction: instruction
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}

// =============================================================================
// Output
// =============================================================================

/// Build statistics
#[derive(Debug, Clone, Default)]
pub struct TreeStats {
    /// Nodes in the finished tree
    pub nodes: usize,
    /// Resolutions answered per source (provider name or `rules`)
    pub sources: BTreeMap<String, usize>,
    pub elapsed_ms: u64,
}

impl TreeStats {
    fn record(&mut self, source: &Source) {
        *self.sources.entry(source.to_string()).or_default() += 1;
    }

    /// Whether every resolution fell through to the rule engine
    pub fn rules_only(&self) -> bool {
        self.sources.keys().all(|s| s == "rules")
    }
}

/// A finished tree with its build statistics
#[derive(Debug, Clone)]
pub struct TreeOutput {
    pub root: KeywordNode,
    pub stats: TreeStats,
}

// =============================================================================
// Builder
// =============================================================================

pub struct TreeBuilder {
    resolver: FallbackResolver,
}

impl TreeBuilder {
    pub fn new(resolver: FallbackResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &FallbackResolver {
        &self.resolver
    }

    /// Validate raw inputs and build
    pub async fn generate(
        &self,
        seed: &str,
        depth: u8,
        instruction: Option<&str>,
    ) -> Result<TreeOutput> {
        let request = TreeRequest::new(seed, depth, instruction)?;
        Ok(self.build(&request).await)
    }

    /// Build the full tree for a validated request
    #[instrument(skip(self, request), fields(seed = %request.seed, depth = request.depth))]
    pub async fn build(&self, request: &TreeRequest) -> TreeOutput {
        let start = Instant::now();
        info!(
            providers = ?self.resolver.provider_names(),
            "Generating keyword structure"
        );

        let mut expansion = Expansion {
            resolver: &self.resolver,
            depth: usize::from(request.depth),
            instruction: request.instruction.as_deref(),
            stats: TreeStats::default(),
        };

        let mut root = expansion.enrich(&request.seed, true).await;
        root.children = expansion.children(&request.seed, None, 0).await;

        let mut stats = expansion.stats;
        stats.nodes = root.node_count();
        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        info!(
            nodes = stats.nodes,
            levels = root.depth(),
            elapsed_ms = stats.elapsed_ms,
            "Keyword structure complete"
        );
        debug!(sources = ?stats.sources, "Resolution sources");

        TreeOutput { root, stats }
    }
}

/// State threaded through one build
struct Expansion<'r> {
    resolver: &'r FallbackResolver,
    depth: usize,
    instruction: Option<&'r str>,
    stats: TreeStats,
}

impl Expansion<'_> {
    /// Fully enriched childless node. The root's intent is drawn at random
    /// instead of classified.
    async fn enrich(&mut self, keyword: &str, is_root: bool) -> KeywordNode {
        let intent = if is_root {
            self.resolver.random_intent()
        } else {
            let resolved = self.resolver.classify_intent(keyword).await;
            self.stats.record(&resolved.source);
            resolved.value
        };

        let title = self
            .resolver
            .generate_title(keyword, intent, self.instruction)
            .await;
        self.stats.record(&title.source);

        let competitors = self.resolver.competitors(keyword).await;
        self.stats.record(&competitors.source);

        KeywordNode {
            keyword: keyword.to_string(),
            intent,
            title: title.value,
            word_count: self.resolver.recommend_word_count(intent),
            competitors: competitors.value,
            children: Vec::new(),
        }
    }

    /// Children of `parent` at `level` (0 = the root's children).
    ///
    /// The root's own intent is random, so its related keywords are requested
    /// without one and the resolver classifies the seed text instead.
    fn children<'a>(
        &'a mut self,
        parent: &'a str,
        parent_intent: Option<Intent>,
        level: usize,
    ) -> BoxFuture<'a, Vec<KeywordNode>> {
        async move {
            let fan_out = BRANCHING.get(level).copied().unwrap_or(0);
            if level >= self.depth || fan_out == 0 {
                return Vec::new();
            }

            let related = self.resolver.related_keywords(parent, parent_intent).await;
            self.stats.record(&related.source);

            let mut nodes = Vec::with_capacity(fan_out);
            for keyword in related.value.into_iter().take(fan_out) {
                let mut node = self.enrich(&keyword, false).await;
                node.children = self.children(&keyword, Some(node.intent), level + 1).await;
                nodes.push(node);
            }
            nodes
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{MockProvider, ResolverBuilder};
    use crate::rules::RuleEngine;
    use crate::types::Competitor;

    fn rules_builder(seed: u64) -> TreeBuilder {
        TreeBuilder::new(FallbackResolver::rules_only(RuleEngine::seeded(seed)))
    }

    fn assert_branching(node: &KeywordNode, level: usize) {
        assert!(node.children.len() <= BRANCHING.get(level).copied().unwrap_or(0));
        for child in &node.children {
            assert_branching(child, level + 1);
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(matches!(
            TreeRequest::new("   ", 2, None),
            Err(KeyweaveError::Validation(_))
        ));

        let request = TreeRequest::new("  seo  ", 0, Some("   ")).unwrap();
        assert_eq!(request.seed, "seo");
        assert_eq!(request.depth, 1);
        assert_eq!(request.instruction, None);

        let request = TreeRequest::new("seo", 9, Some(" formal tone ")).unwrap();
        assert_eq!(request.depth, 3);
        assert_eq!(request.instruction.as_deref(), Some("formal tone"));
    }

    #[tokio::test]
    async fn test_depth_and_branching_caps() {
        for (depth, expected_nodes) in [(1u8, 6usize), (2, 21), (3, 51)] {
            let output = rules_builder(u64::from(depth))
                .generate("digital marketing", depth, None)
                .await
                .unwrap();

            assert_eq!(output.root.depth(), usize::from(depth));
            assert_branching(&output.root, 0);
            assert_eq!(output.root.node_count(), expected_nodes);
            assert_eq!(output.stats.nodes, expected_nodes);
        }
    }

    #[tokio::test]
    async fn test_every_node_fully_enriched() {
        let output = rules_builder(9).generate("email marketing", 3, None).await.unwrap();

        for (node, _) in output.root.iter() {
            assert!(!node.keyword.is_empty());
            assert!(!node.title.is_empty());
            assert!(node.intent.word_count_range().contains(&node.word_count));
            assert_eq!(node.competitors.len(), 3);
        }
    }

    #[tokio::test]
    async fn test_non_root_intent_follows_keyword_text() {
        let output = rules_builder(4).generate("crm", 2, None).await.unwrap();
        let rules = RuleEngine::seeded(0);

        for (node, depth) in output.root.iter() {
            if depth > 0 {
                assert_eq!(node.intent, rules.classify_intent(&node.keyword), "{}", node.keyword);
            }
        }
    }

    #[tokio::test]
    async fn test_end_to_end_rules_only() {
        let output = rules_builder(2024)
            .generate("digital marketing", 1, None)
            .await
            .unwrap();

        assert_eq!(output.root.keyword, "digital marketing");
        assert!(!output.root.children.is_empty());
        assert!(output.root.children.len() <= 5);
        assert!(output.root.children.iter().all(KeywordNode::is_leaf));
        assert!(output.stats.rules_only());
        assert_eq!(output.stats.sources.keys().collect::<Vec<_>>(), ["rules"]);
    }

    #[tokio::test]
    async fn test_seeded_builds_are_reproducible() {
        let a = rules_builder(77).generate("seo audit", 2, None).await.unwrap();
        let b = rules_builder(77).generate("seo audit", 2, None).await.unwrap();
        assert_eq!(a.root, b.root);
    }

    #[tokio::test]
    async fn test_provider_answers_are_used() {
        let provider = MockProvider::named("mock")
            .with_keywords(&["k1", "k2", "k3", "k4", "k5", "k6", "k7"])
            .with_title("Mock Title")
            .with_intent(Intent::Commercial)
            .with_competitors(vec![Competitor::new("Live", "https://live.example/")]);

        let builder = TreeBuilder::new(ResolverBuilder::new().add_provider(provider).build());
        let output = builder.generate("seed", 2, None).await.unwrap();

        assert_eq!(output.root.children.len(), 5);
        assert_eq!(output.root.children[0].children.len(), 3);
        assert_eq!(output.root.children[0].keyword, "k1");
        for (node, depth) in output.root.iter() {
            assert_eq!(node.title, "Mock Title");
            assert_eq!(node.competitors.len(), 1);
            if depth > 0 {
                assert_eq!(node.intent, Intent::Commercial);
            }
        }
        assert!(!output.stats.rules_only());
        assert!(!output.stats.sources.contains_key("rules"));
    }

    #[tokio::test]
    async fn test_silent_provider_falls_back_to_rules() {
        let builder = TreeBuilder::new(
            ResolverBuilder::new()
                .add_provider(MockProvider::named("silent"))
                .with_rules(RuleEngine::seeded(5))
                .build(),
        );
        let output = builder.generate("keyword research", 1, None).await.unwrap();

        assert_eq!(output.root.node_count(), 6);
        assert!(output.stats.rules_only());
    }

    #[tokio::test]
    async fn test_instruction_reaches_titles() {
        let output = rules_builder(1)
            .generate("crm", 1, Some("use numbers"))
            .await
            .unwrap();
        for (node, _) in output.root.iter() {
            assert!(node.title.chars().any(|c| c.is_ascii_digit()), "{}", node.title);
        }
    }
}
