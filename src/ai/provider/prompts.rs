//! Prompt building and reply parsing for AI providers.
//!
//! Prompts differ only in how the reply should be shaped: JSON-mode providers
//! are asked for JSON, plain-text providers for comma lists and labelled lines.

use serde_json::Value;

use crate::constants::provider::{MAX_COMPETITORS, MAX_KEYWORDS};
use crate::types::{Competitor, Intent};

/// Shape requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    Json,
    PlainText,
}

pub const TITLE_SYSTEM: &str =
    "You are an expert SEO copywriter that creates compelling article titles.";
pub const INTENT_SYSTEM: &str =
    "You are a search intent classifier that categorizes keywords based on user intent.";
pub const KEYWORDS_SYSTEM: &str = "You are a skilled SEO keyword researcher that generates related keywords based on a main keyword and intent.";
pub const COMPETITORS_SYSTEM: &str =
    "You are a SEO competitor researcher that creates realistic competitor listings.";

const TITLE_TAIL: &str =
    "Make it compelling and optimized for search. Return just the title with no explanation.";

pub fn title_prompt(keyword: &str, intent: Intent, instruction: Option<&str>) -> String {
    if let Some(instruction) = instruction {
        return format!(
            "Generate one SEO-friendly article title for the keyword '{}'. {}. {}",
            keyword, instruction, TITLE_TAIL
        );
    }

    let flavour = match intent {
        Intent::Informational => "informational/educational",
        Intent::Commercial => "commercial/purchase-oriented",
        Intent::Navigational => "navigational/resource-oriented",
    };
    format!(
        "Generate one SEO-friendly, {} article title for the keyword '{}'. {}",
        flavour, keyword, TITLE_TAIL
    )
}

pub fn intent_prompt(keyword: &str) -> String {
    format!(
        "Analyze the search intent for the keyword: '{}'\n\
         Classify it as one of the following:\n\
         - Commercial: The user wants to buy something or compare products/services\n\
         - Informational: The user wants to learn or find information\n\
         - Navigational: The user wants to find a specific website or resource\n\n\
         Return ONLY the intent category as a single word with no explanation.",
        keyword
    )
}

pub fn keywords_prompt(keyword: &str, intent: Intent, format: ReplyFormat) -> String {
    let (kind, focus) = match intent {
        Intent::Informational => (
            "informational",
            "educational, how-to, and learning-oriented",
        ),
        Intent::Commercial => (
            "commercial/transactional",
            "buying, product reviews, and service-oriented",
        ),
        Intent::Navigational => (
            "navigational",
            "brand-specific, website, app, login, and portal-related",
        ),
    };
    let shape = match format {
        ReplyFormat::Json => "Return as a JSON array of strings with no explanation.",
        ReplyFormat::PlainText => "Format as a comma-separated list.",
    };
    format!(
        "Generate {} {} search keywords related to '{}'. Focus on {} keywords. {}",
        MAX_KEYWORDS, kind, keyword, focus, shape
    )
}

pub fn competitors_prompt(keyword: &str, format: ReplyFormat) -> String {
    let shape = match format {
        ReplyFormat::Json => {
            "Return results as a JSON array with objects having 'title' and 'url' properties.\n\
             Example format:\n\
             [\n  \
               {\"title\": \"Programming for Beginners: A Complete Guide\", \"url\": \"https://www.codingforbeginners.org/programming-complete-guide\"}\n\
             ]"
        }
        ReplyFormat::PlainText => {
            "Format your response as:\n\n\
             Title 1: [Title]\nURL 1: [URL]\n\n\
             Title 2: [Title]\nURL 2: [URL]\n\n\
             Title 3: [Title]\nURL 3: [URL]"
        }
    };
    format!(
        "Generate {} realistic competitor article titles and URLs for the keyword: '{}'.\n\n{}\n\n\
         Make URLs look realistic with relevant domains and URL structures. Don't use placeholder domains.",
        MAX_COMPETITORS, keyword, shape
    )
}

// =============================================================================
// Reply parsing
// =============================================================================

/// Trimmed title with surrounding quotes removed; `None` when nothing is left
pub fn clean_title(reply: &str) -> Option<String> {
    let title = reply
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Strip markdown code fences some models wrap JSON in
fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim_end().trim_end_matches("```").trim()
}

fn parse_json(reply: &str) -> Option<Value> {
    serde_json::from_str(strip_fences(reply)).ok()
}

/// First array in the reply: the reply itself, the named key, or any array value
fn find_array(value: Value, key: &str) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove(key) {
                return Some(items);
            }
            map.into_iter().find_map(|(_, v)| match v {
                Value::Array(items) if !items.is_empty() => Some(items),
                _ => None,
            })
        }
        _ => None,
    }
}

pub fn parse_keywords(reply: &str, format: ReplyFormat) -> Vec<String> {
    let keywords: Vec<String> = match format {
        ReplyFormat::Json => parse_json(reply)
            .and_then(|v| find_array(v, "keywords"))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
            .collect(),
        ReplyFormat::PlainText => reply.split(',').map(|s| s.trim().to_string()).collect(),
    };

    keywords
        .into_iter()
        .filter(|k| !k.is_empty())
        .take(MAX_KEYWORDS)
        .collect()
}

pub fn parse_competitors(reply: &str, format: ReplyFormat) -> Vec<Competitor> {
    let competitors: Vec<Competitor> = match format {
        ReplyFormat::Json => parse_json(reply)
            .and_then(|v| find_array(v, "competitors"))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|v| serde_json::from_value::<Competitor>(v).ok())
            .collect(),
        ReplyFormat::PlainText => parse_labelled_lines(reply),
    };

    competitors.into_iter().take(MAX_COMPETITORS).collect()
}

/// `Title N: ...` / `URL N: ...` pairs; a URL line closes the pending title
fn parse_labelled_lines(reply: &str) -> Vec<Competitor> {
    let mut competitors = Vec::new();
    let mut title = String::new();

    for line in reply.lines().map(str::trim) {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if label.starts_with("Title") {
            title = value.to_string();
        } else if label.starts_with("URL") && !title.is_empty() && !value.is_empty() {
            competitors.push(Competitor::new(std::mem::take(&mut title), value));
        }
    }

    competitors
}
