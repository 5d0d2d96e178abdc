//! Related keyword expansion from modifier tables

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::HashSet;

use crate::constants::rules::{MAX_RELATED_KEYWORDS, MODIFIER_SAMPLE};
use crate::types::Intent;

pub const INFORMATIONAL_MODIFIERS: &[&str] = &[
    "what is",
    "how to",
    "guide",
    "tutorial",
    "tips for",
    "best practices",
    "examples of",
    "understanding",
    "learn",
    "beginner's guide to",
    "advanced",
    "complete guide",
    "definition",
    "explained",
    "overview",
    "benefits of",
    "history of",
    "types of",
    "comparison",
    "vs",
    "difference between",
];

pub const COMMERCIAL_MODIFIERS: &[&str] = &[
    "best",
    "top",
    "buy",
    "cheap",
    "affordable",
    "premium",
    "review",
    "price",
    "cost of",
    "for sale",
    "deal",
    "discount",
    "professional",
    "services",
    "near me",
    "online",
    "shop",
    "purchase",
    "hire",
    "agency",
    "software",
    "tools",
    "platform",
];

pub const NAVIGATIONAL_MODIFIERS: &[&str] = &[
    "login",
    "sign up",
    "download",
    "app",
    "website",
    "official",
    "customer service",
    "contact",
    "support",
    "dashboard",
    "account",
    "register",
    "free trial",
    "demo",
    "forum",
];

/// Words spliced in front of one token of a multi-word keyword
const RECOMBINATION_PREFIXES: &[&str] = &["best", "top", "online", "professional", "free"];

/// Fixed suffix variants appended to every expansion
const SUFFIXES: &[&str] = &["examples", "tools", "services", "tips", "strategies"];

pub fn modifiers_for(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Informational => INFORMATIONAL_MODIFIERS,
        Intent::Commercial => COMMERCIAL_MODIFIERS,
        Intent::Navigational => NAVIGATIONAL_MODIFIERS,
    }
}

/// Expand a keyword into at most ten related keywords.
///
/// Candidates are modifier prefixes, per-token recombinations (multi-word
/// keywords only) and suffix variants. Duplicates are dropped and the
/// survivors shuffled before truncation, so order varies between calls.
pub fn generate<R: Rng>(keyword: &str, intent: Intent, rng: &mut R) -> Vec<String> {
    let mut candidates = Vec::new();

    for modifier in modifiers_for(intent).choose_multiple(rng, MODIFIER_SAMPLE) {
        candidates.push(format!("{} {}", modifier, keyword));
    }

    let words: Vec<&str> = keyword.split_whitespace().collect();
    if words.len() > 1 {
        for i in 0..words.len() {
            let prefix = RECOMBINATION_PREFIXES.choose(rng).copied().unwrap_or("best");
            let recombined: Vec<String> = words
                .iter()
                .enumerate()
                .map(|(j, w)| {
                    if i == j {
                        format!("{} {}", prefix, w)
                    } else {
                        (*w).to_string()
                    }
                })
                .collect();
            candidates.push(recombined.join(" "));
        }
    }

    candidates.extend(SUFFIXES.iter().map(|s| format!("{} {}", keyword, s)));

    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(c.clone()));
    candidates.shuffle(rng);
    candidates.truncate(MAX_RELATED_KEYWORDS);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_modifier_table_sizes() {
        assert_eq!(INFORMATIONAL_MODIFIERS.len(), 21);
        assert_eq!(COMMERCIAL_MODIFIERS.len(), 23);
        assert_eq!(NAVIGATIONAL_MODIFIERS.len(), 15);
    }

    #[test]
    fn test_single_word_keyword() {
        let mut rng = StdRng::seed_from_u64(3);
        let related = generate("seo", Intent::Informational, &mut rng);

        // 5 modifiers + 5 suffixes, no recombinations
        assert_eq!(related.len(), 10);
        for suffix in SUFFIXES {
            assert!(related.contains(&format!("seo {}", suffix)));
        }
        let prefixed = related
            .iter()
            .filter(|k| k.ends_with(" seo"))
            .count();
        assert_eq!(prefixed, 5);
    }

    #[test]
    fn test_multi_word_keyword_truncates_to_ten() {
        let mut rng = StdRng::seed_from_u64(4);
        let related = generate("email marketing software", Intent::Commercial, &mut rng);
        // 5 + 3 + 5 candidates before truncation
        assert_eq!(related.len(), MAX_RELATED_KEYWORDS);
    }

    #[test]
    fn test_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let related = generate("content marketing", Intent::Navigational, &mut rng);
            let unique: HashSet<_> = related.iter().collect();
            assert_eq!(unique.len(), related.len());
        }
    }

    #[test]
    fn test_modifiers_match_intent() {
        let mut rng = StdRng::seed_from_u64(6);
        let related = generate("crm", Intent::Navigational, &mut rng);
        let prefixed: Vec<_> = related.iter().filter(|k| k.ends_with(" crm")).collect();
        assert!(!prefixed.is_empty());
        for k in prefixed {
            let modifier = k.trim_end_matches(" crm");
            assert!(NAVIGATIONAL_MODIFIERS.contains(&modifier), "{}", k);
        }
    }
}
