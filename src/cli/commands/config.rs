//! Config Command
//!
//! Manage keyweave configuration.
//!
//! Usage:
//!   keyweave config show [-f json]
//!   keyweave config path
//!   keyweave config init [-g] [--force]

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::{KeyweaveError, Result};

/// Print the merged effective configuration (API keys omitted)
pub fn show(format: &str) -> Result<()> {
    let as_json = match format {
        "toml" => false,
        "json" => true,
        other => {
            return Err(KeyweaveError::Config(format!(
                "Unknown config format '{}'. Valid values: toml, json",
                other
            )));
        }
    };

    let config = ConfigLoader::load()?;
    println!("{}", ConfigLoader::render(&config, as_json)?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write a configuration template (project by default)
pub fn init(global: bool, force: bool) -> Result<()> {
    let output = Output::new();
    let (path, written) = ConfigLoader::init(global, force)?;

    let scope = if global { "global" } else { "project" };
    if written {
        output.success(&format!("Initialized {} configuration", scope));
    } else {
        output.warning(&format!(
            "{} configuration already exists (use --force to overwrite)",
            scope
        ));
    }
    output.field("Config", path.display());
    output.info(
        "API keys can also come from OPENAI_API_KEY, GEMINI_API_KEY, \
         GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_CX",
    );
    Ok(())
}
