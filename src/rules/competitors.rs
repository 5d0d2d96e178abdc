//! Mock competitor listings

use rand::Rng;
use rand::seq::IndexedRandom;

use super::title::title_case;
use crate::constants::rules::COMPETITOR_COUNT;
use crate::types::Competitor;

/// Domains used for mock competitor URLs
pub const DOMAINS: &[&str] = &[
    "example.com",
    "seosite.com",
    "digitalmarketer.com",
    "wordstream.com",
    "semrush.com",
    "ahrefs.com",
    "moz.com",
    "searchenginejournal.com",
    "backlinko.com",
    "neilpatel.com",
    "hubspot.com",
    "seoroundtable.com",
    "searchengineland.com",
    "contentmarketinginstitute.com",
    "bloggingwizard.com",
];

/// `{kw}` keyword, `{brand}` domain brand, `{n}` a count between 5 and 15
const TITLE_TEMPLATES: &[&str] = &[
    "{kw} - Complete Guide and Resources",
    "Everything You Need to Know About {kw}",
    "The Ultimate Guide to {kw} | {brand}",
    "{n} Best {kw} Strategies",
    "{kw}: Definition, Examples, and Best Practices",
    "{kw} 101: Beginner's Guide to Success",
];

/// Lowercase the keyword and join its words with hyphens
pub fn slugify(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Generate three listings on distinct domains
pub fn generate<R: Rng>(keyword: &str, rng: &mut R) -> Vec<Competitor> {
    let domains: Vec<&str> = DOMAINS
        .choose_multiple(rng, COMPETITOR_COUNT)
        .copied()
        .collect();
    let keyword_title = title_case(keyword);
    let slug = slugify(keyword);

    domains
        .into_iter()
        .map(|domain| {
            let brand = title_case(domain.split('.').next().unwrap_or(domain));
            let template = TITLE_TEMPLATES
                .choose(rng)
                .copied()
                .unwrap_or(TITLE_TEMPLATES[0]);
            // Keyword last so placeholder-like text inside it survives
            let title = template
                .replace("{brand}", &brand)
                .replace("{n}", &rng.random_range(5..=15).to_string())
                .replace("{kw}", &keyword_title);

            Competitor::new(title, format!("https://www.{}/{}/", domain, slug))
        })
        .collect()
}
