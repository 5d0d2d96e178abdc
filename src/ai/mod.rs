//! Enrichment Provider Layer
//!
//! Optional AI and search providers, the fallback resolver that puts them in
//! front of the rule engine, and connectivity diagnostics.

pub mod preflight;
pub mod provider;

pub use preflight::{CheckResult, PreflightResult, check_providers};
pub use provider::{
    ConnectionStatus, FallbackResolver, GeminiProvider, GoogleSearchProvider, KeywordProvider,
    OpenAiProvider, Resolved, ResolverBuilder, SharedProvider, Source, create_providers,
};
