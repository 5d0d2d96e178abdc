//! Rule Engine
//!
//! Deterministic, network-free generators used as the last stage of every
//! fallback cascade. None of these ever return an empty result.
//!
//! All randomness flows through one seedable RNG so a fixed seed reproduces
//! the same output.

pub mod competitors;
pub mod intent;
pub mod keywords;
pub mod title;

pub use competitors::{DOMAINS, slugify};
pub use title::{TitleStyle, title_case};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

use crate::types::{Competitor, Intent};

/// Template- and table-driven keyword enrichment
pub struct RuleEngine {
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine").finish_non_exhaustive()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Engine seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Engine with reproducible output
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Build from an optional seed
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_default()
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    pub fn classify_intent(&self, keyword: &str) -> Intent {
        intent::classify(keyword)
    }

    /// Uniformly random category, used for the seed keyword
    pub fn random_intent(&self) -> Intent {
        self.with_rng(|rng| Intent::random(rng))
    }

    pub fn generate_title(&self, keyword: &str, intent: Intent, instruction: Option<&str>) -> String {
        self.with_rng(|rng| title::generate(keyword, intent, instruction, rng))
    }

    pub fn recommend_word_count(&self, intent: Intent) -> u32 {
        self.with_rng(|rng| rng.random_range(intent.word_count_range()))
    }

    pub fn generate_competitors(&self, keyword: &str) -> Vec<Competitor> {
        self.with_rng(|rng| competitors::generate(keyword, rng))
    }

    /// Related keywords; without an intent the keyword is classified first
    pub fn generate_related_keywords(&self, keyword: &str, intent: Option<Intent>) -> Vec<String> {
        let intent = intent.unwrap_or_else(|| self.classify_intent(keyword));
        self.with_rng(|rng| keywords::generate(keyword, intent, rng))
    }
}
