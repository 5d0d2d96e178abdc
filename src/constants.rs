//! Global Constants
//!
//! Centralized constants for configuration and tuning.

/// Keyword tree shape
pub mod tree {
    /// Deepest supported expansion below the root
    pub const MAX_DEPTH: u8 = 3;

    /// Shallowest expansion below the root
    pub const MIN_DEPTH: u8 = 1;

    /// Default expansion depth
    pub const DEFAULT_DEPTH: u8 = 2;

    /// Maximum children per node, indexed by the parent's level
    /// (root = 0, first level = 1, second level = 2)
    pub const BRANCHING: [usize; 3] = [5, 3, 2];
}

/// Rule engine limits
pub mod rules {
    /// Modifiers sampled per related-keyword expansion
    pub const MODIFIER_SAMPLE: usize = 5;

    /// Maximum related keywords returned by a single expansion
    pub const MAX_RELATED_KEYWORDS: usize = 10;

    /// Mock competitors generated per keyword
    pub const COMPETITOR_COUNT: usize = 3;
}

/// Provider request limits
pub mod provider {
    /// Keywords requested from (and accepted from) a provider
    pub const MAX_KEYWORDS: usize = 10;

    /// Competitors accepted from a provider
    pub const MAX_COMPETITORS: usize = 3;

    /// Results requested from the search API
    pub const SEARCH_RESULTS: u8 = 5;

    /// Characters of an error body kept in diagnostic messages
    pub const ERROR_PREVIEW_CHARS: usize = 100;
}

/// Network constants
pub mod network {
    /// Default HTTP request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}
