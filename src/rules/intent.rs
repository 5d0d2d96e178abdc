//! Keyword intent heuristics

use crate::types::Intent;

/// Terms signalling purchase or comparison intent, checked first
pub const COMMERCIAL_INDICATORS: &[&str] = &[
    "buy",
    "price",
    "cost",
    "shop",
    "purchase",
    "review",
    "best",
    "top",
    "vs",
    "comparison",
];

/// Terms signalling a specific destination
pub const NAVIGATIONAL_INDICATORS: &[&str] = &[
    "login", "sign up", "download", "app", "website", "contact", "support",
];

/// Classify a keyword by case-insensitive substring match.
///
/// Commercial indicators are checked before navigational ones; anything
/// matching neither is informational.
pub fn classify(keyword: &str) -> Intent {
    let lower = keyword.to_lowercase();

    if COMMERCIAL_INDICATORS.iter().any(|term| lower.contains(term)) {
        return Intent::Commercial;
    }
    if NAVIGATIONAL_INDICATORS.iter().any(|term| lower.contains(term)) {
        return Intent::Navigational;
    }
    Intent::Informational
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commercial() {
        assert_eq!(classify("best running shoes"), Intent::Commercial);
        assert_eq!(classify("Buy Coffee Beans"), Intent::Commercial);
        assert_eq!(classify("iphone vs pixel"), Intent::Commercial);
    }

    #[test]
    fn test_informational_default() {
        assert_eq!(classify("how to tie a knot"), Intent::Informational);
        assert_eq!(classify("digital marketing"), Intent::Informational);
        assert_eq!(classify(""), Intent::Informational);
    }

    #[test]
    fn test_navigational() {
        assert_eq!(classify("app login page"), Intent::Navigational);
        assert_eq!(classify("Contact customer service"), Intent::Navigational);
    }

    #[test]
    fn test_commercial_wins_over_navigational() {
        // "best" (commercial) and "app" (navigational) both match
        assert_eq!(classify("best budgeting app"), Intent::Commercial);
    }

    #[test]
    fn test_substring_matching() {
        // "laptop" contains "top"
        assert_eq!(classify("laptop stand"), Intent::Commercial);
        // "support" is navigational
        assert_eq!(classify("printer support"), Intent::Navigational);
    }
}
