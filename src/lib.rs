//! keyweave - SEO Keyword Taxonomy Generator
//!
//! Expands one seed keyword into a bounded tree of related keywords, each
//! enriched with a search intent, an article title, a recommended word count
//! and competing pages.
//!
//! ## Core Features
//!
//! - **Tree Builder**: fan-out of 5/3/2 children per level, up to three levels
//! - **Fallback Resolver**: optional AI and search providers tried in order
//! - **Rule Engine**: deterministic, network-free generators that always answer
//! - **Exporters**: JSON, keyword list, CSV, graph and outline formats
//!
//! ## Quick Start
//!
//! ```ignore
//! use keyweave::{Config, ConfigLoader, ExportFormat, FallbackResolver, TreeBuilder};
//!
//! let config = ConfigLoader::load()?;
//! let builder = TreeBuilder::new(FallbackResolver::from_config(&config));
//! let output = builder.generate("digital marketing", 2, None).await?;
//! println!("{}", keyweave::export::render(&output.root, ExportFormat::Csv)?);
//! ```
//!
//! ## Modules
//!
//! - [`rules`]: intent classification, title templates, keyword expansion
//! - [`ai`]: provider adapters, fallback resolver, connectivity checks
//! - [`tree`]: recursive keyword tree construction
//! - [`export`]: output formats
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod rules;
pub mod tree;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorCategory, KeyweaveError, Result};

// Data Model
pub use types::{Competitor, Intent, KeywordNode};

// =============================================================================
// Generation Re-exports
// =============================================================================

pub use ai::{
    FallbackResolver, KeywordProvider, Resolved, ResolverBuilder, SharedProvider, Source,
    check_providers,
};
pub use export::ExportFormat;
pub use rules::RuleEngine;
pub use tree::{TreeBuilder, TreeOutput, TreeRequest, TreeStats};
