//! Article title templates
//!
//! Templates use `{kw}` for the title-cased keyword and `{year}` for the
//! current calendar year.

use chrono::Datelike;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::types::Intent;

/// Instruction terms asking for numbered titles
const NUMBER_TERMS: &[&str] = &["number", "numbered", "use number", "add number"];

/// Instruction terms asking for a formal register
const FORMAL_TERMS: &[&str] = &["formal", "professional", "formal tone"];

/// Template family selected from the custom instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStyle {
    /// No custom instruction
    Standard,
    /// Instruction asks for numbers
    Numbered,
    /// Instruction asks for a formal tone
    Formal,
    /// Instruction present but neither numbered nor formal
    Custom,
}

impl TitleStyle {
    pub fn from_instruction(instruction: Option<&str>) -> Self {
        let Some(instruction) = instruction else {
            return TitleStyle::Standard;
        };
        let lower = instruction.to_lowercase();
        if NUMBER_TERMS.iter().any(|t| lower.contains(t)) {
            TitleStyle::Numbered
        } else if FORMAL_TERMS.iter().any(|t| lower.contains(t)) {
            TitleStyle::Formal
        } else {
            TitleStyle::Custom
        }
    }
}

fn templates(intent: Intent, style: TitleStyle) -> &'static [&'static str] {
    match (intent, style) {
        (Intent::Informational, TitleStyle::Standard) => &[
            "The Complete Guide to {kw}: Everything You Need to Know",
            "How to Master {kw}: Step-by-Step Tutorial",
            "{kw} Explained: A Comprehensive Guide for Beginners",
            "10 Essential {kw} Tips You Should Know",
            "Understanding {kw}: A Detailed Overview",
        ],
        (Intent::Commercial, TitleStyle::Standard) => &[
            "Top 10 Best {kw} Solutions in {year}",
            "The Ultimate Buyer's Guide to {kw}",
            "Best {kw} Products: Reviews and Comparisons",
            "{kw}: Pricing, Features, and Alternatives Compared",
            "How to Choose the Right {kw} for Your Needs",
        ],
        (Intent::Navigational, TitleStyle::Standard) => &[
            "Official {kw} Resources: Where to Find What You Need",
            "How to Access {kw}: A Quick Reference Guide",
            "Navigate {kw} Like a Pro: Essential Links and Resources",
            "Finding the Best {kw} Platforms and Tools",
            "{kw} Directory: Top Sites and Resources",
        ],
        (Intent::Informational, TitleStyle::Numbered) => &[
            "10 Essential {kw} Tips You Should Know",
            "7 Important Facts About {kw} for Beginners",
            "5 Step-by-Step Methods to Master {kw}",
            "8 Key Concepts of {kw} Explained",
        ],
        (Intent::Informational, TitleStyle::Formal) => &[
            "A Comprehensive Analysis of {kw} Methodologies",
            "The Definitive Guide to {kw}: Professional Insights",
            "{kw}: A Thorough Examination of Principles and Applications",
            "Understanding the Fundamentals of {kw}: An In-depth Overview",
        ],
        (Intent::Informational, TitleStyle::Custom) => &[
            "The Ultimate Guide to {kw}: Everything You Need to Know",
            "How to {kw}: A Complete Step-by-Step Guide",
            "{kw} 101: Essential Tips and Techniques",
            "Understanding {kw}: A Comprehensive Overview",
        ],
        (Intent::Commercial, TitleStyle::Numbered) => &[
            "Top 10 {kw} Products to Buy in {year}",
            "5 Best {kw} Options for Every Budget",
            "7 {kw} Products Professional Reviewers Recommend",
            "8 Premium {kw} Solutions Worth Your Investment",
        ],
        (Intent::Commercial, TitleStyle::Formal) => &[
            "A Comparative Analysis of Premium {kw} Products",
            "Professional Review: Selected {kw} Solutions for Discerning Buyers",
            "Investment Considerations: Superior {kw} Options Available",
            "An Objective Assessment of Leading {kw} Products",
        ],
        (Intent::Commercial, TitleStyle::Custom) => &[
            "The Best {kw} Reviews: Ultimate Buyer's Guide",
            "{kw}: Top Options Compared",
            "Best {kw} Products: Reviews and Comparisons",
            "How to Choose the Right {kw} for Your Needs",
        ],
        (Intent::Navigational, TitleStyle::Numbered) => &[
            "5 Essential {kw} Resources You Need to Bookmark",
            "10 Official {kw} Platforms to Access Information",
            "7 Best Ways to Navigate {kw} Successfully",
            "3 Direct Pathways to Access {kw} Resources",
        ],
        (Intent::Navigational, TitleStyle::Formal) => &[
            "Professional Guide to Accessing {kw} Resources",
            "An Index of Authoritative {kw} Platforms",
            "Navigational Framework for {kw} Information Access",
            "A Structured Approach to Finding {kw} Resources",
        ],
        (Intent::Navigational, TitleStyle::Custom) => &[
            "Official {kw} Resources: Where to Find What You Need",
            "How to Access {kw}: A Quick Reference Guide",
            "Navigate {kw} Like a Pro: Essential Links",
            "{kw} Directory: Top Sites and Resources",
        ],
    }
}

/// Pick a title template for the keyword and fill it in
pub fn generate<R: Rng>(
    keyword: &str,
    intent: Intent,
    instruction: Option<&str>,
    rng: &mut R,
) -> String {
    let style = TitleStyle::from_instruction(instruction);
    let family = templates(intent, style);
    // Families are non-empty static tables
    let template = family.choose(rng).copied().unwrap_or(family[0]);

    template
        .replace("{year}", &chrono::Local::now().year().to_string())
        .replace("{kw}", &title_case(keyword))
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// Words are separated by whitespace or hyphens; apostrophes stay inside a
/// word ("beginner's" becomes "Beginner's").
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if ch.is_whitespace() || ch == '-' {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("digital marketing"), "Digital Marketing");
        assert_eq!(title_case("SEO tools"), "Seo Tools");
        assert_eq!(title_case("beginner's guide"), "Beginner's Guide");
        assert_eq!(title_case("e-commerce  tips"), "E-Commerce  Tips");
    }

    #[test]
    fn test_style_from_instruction() {
        assert_eq!(TitleStyle::from_instruction(None), TitleStyle::Standard);
        assert_eq!(
            TitleStyle::from_instruction(Some("add numbers in title")),
            TitleStyle::Numbered
        );
        assert_eq!(
            TitleStyle::from_instruction(Some("Use a FORMAL tone")),
            TitleStyle::Formal
        );
        // numbers take precedence over formal
        assert_eq!(
            TitleStyle::from_instruction(Some("professional, numbered list")),
            TitleStyle::Numbered
        );
        assert_eq!(
            TitleStyle::from_instruction(Some("make it catchy")),
            TitleStyle::Custom
        );
    }

    #[test]
    fn test_generate_substitutes_keyword() {
        let mut rng = StdRng::seed_from_u64(1);
        for intent in Intent::ALL {
            for _ in 0..20 {
                let title = generate("content strategy", intent, None, &mut rng);
                assert!(title.contains("Content Strategy"), "{}", title);
                assert!(!title.contains("{kw}"));
                assert!(!title.contains("{year}"));
            }
        }
    }

    #[test]
    fn test_placeholder_text_in_keyword_kept() {
        let mut rng = StdRng::seed_from_u64(3);
        for intent in Intent::ALL {
            for _ in 0..20 {
                let title = generate("{year} review", intent, None, &mut rng);
                assert!(title.contains("{year} Review"), "{}", title);
            }
        }
    }

    #[test]
    fn test_numbered_titles_start_with_digit() {
        let mut rng = StdRng::seed_from_u64(2);
        for intent in Intent::ALL {
            for _ in 0..20 {
                let title = generate("vpn", intent, Some("use numbers"), &mut rng);
                let first = title.chars().next().unwrap();
                assert!(first.is_ascii_digit() || title.starts_with("Top"), "{}", title);
            }
        }
    }

    #[test]
    fn test_template_families_sizes() {
        for intent in Intent::ALL {
            assert_eq!(templates(intent, TitleStyle::Standard).len(), 5);
            for style in [TitleStyle::Numbered, TitleStyle::Formal, TitleStyle::Custom] {
                assert_eq!(templates(intent, style).len(), 4);
            }
        }
    }
}
