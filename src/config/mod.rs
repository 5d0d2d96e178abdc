//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/keyweave/config.toml)
//! 3. Project config (.keyweave/config.toml)
//! 4. Environment variables (KEYWEAVE_*, then the provider-conventional
//!    OPENAI_API_KEY / GEMINI_API_KEY / GOOGLE_SEARCH_* for unset credentials)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
