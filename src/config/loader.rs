//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/keyweave/config.toml)
//! 3. Project config (.keyweave/config.toml)
//! 4. Environment variables (KEYWEAVE_* prefix, `__` separates sections)
//! 5. Provider-conventional credential variables for anything still unset

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{KeyweaveError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars → credential fallbacks
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // KEYWEAVE_GENERATION__DEPTH -> generation.depth
        figment = figment.merge(Env::prefixed("KEYWEAVE_").split("__"));

        Self::finish(figment)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(KeyweaveError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path));

        Self::finish(figment)
    }

    fn finish(figment: Figment) -> Result<Config> {
        let mut config: Config = figment
            .extract()
            .map_err(|e| KeyweaveError::Config(format!("Configuration error: {}", e)))?;

        config.providers.fill_from_env();
        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/keyweave/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("keyweave"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".keyweave/config.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration. API keys are never included.
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            Ok(toml::to_string_pretty(config)?)
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a commented config template to the global or project location.
    /// Returns the path and whether it was written.
    pub fn init(global: bool, force: bool) -> Result<(PathBuf, bool)> {
        let path = if global {
            Self::global_config_path().ok_or_else(|| {
                KeyweaveError::Config("Cannot determine global config directory".to_string())
            })?
        } else {
            Self::project_config_path()
        };

        let written = Self::write_template(&path, force)?;
        Ok((path, written))
    }

    /// Write the template, keeping an existing file unless `force` is set.
    /// Returns whether the file was written.
    pub fn write_template(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, Self::default_config_template())?;
        info!("Created config: {}", path.display());
        Ok(true)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn default_config_template() -> &'static str {
        r#"# Keyweave Configuration
# Project settings in .keyweave/config.toml override ~/.config/keyweave/config.toml.
# API keys may also come from OPENAI_API_KEY, GEMINI_API_KEY,
# GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_CX.

version = "1.0"

[generation]
depth = 2
# custom_instruction = "Use numbers in titles"
# rule_seed = 42

[export]
format = "json"

[providers.openai]
# api_key = ""
model = "gpt-4o"
timeout_secs = 60
temperature = 1.0

[providers.gemini]
# api_key = ""
model = "gemini-2.0-flash"
timeout_secs = 60
temperature = 1.0

[providers.google_search]
# api_key = ""
# engine_id = ""
timeout_secs = 60
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use figment::Jail;
    use tempfile::TempDir;

    fn isolate(jail: &mut Jail) {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        for var in [
            "OPENAI_API_KEY",
            "GEMINI_API_KEY",
            "GOOGLE_SEARCH_API_KEY",
            "GOOGLE_SEARCH_CX",
        ] {
            jail.set_env(var, "");
        }
    }

    #[test]
    fn test_load_default_config() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.version, "1.0");
            assert_eq!(config.generation.depth, 2);
            assert!(!config.providers.openai.is_configured());
            Ok(())
        });
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_dir(".keyweave")?;
            jail.create_file(
                ".keyweave/config.toml",
                r#"
                [generation]
                depth = 3

                [export]
                format = "csv"
                "#,
            )?;

            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.generation.depth, 3);
            assert_eq!(config.export.format, ExportFormat::Csv);
            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.set_env("KEYWEAVE_GENERATION__DEPTH", "1");
            jail.set_env("KEYWEAVE_PROVIDERS__GEMINI__MODEL", "gemini-test");

            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.generation.depth, 1);
            assert_eq!(config.providers.gemini.model.as_deref(), Some("gemini-test"));
            Ok(())
        });
    }

    #[test]
    fn test_conventional_key_fills_unset_credential() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.set_env("OPENAI_API_KEY", "sk-from-env");
            jail.set_env("GOOGLE_SEARCH_API_KEY", "search-key");

            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.providers.openai.api_key(), Some("sk-from-env"));
            // engine id still missing
            assert!(!config.providers.google_search.is_configured());
            Ok(())
        });
    }

    #[test]
    fn test_file_key_wins_over_conventional_env() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.set_env("GEMINI_API_KEY", "from-env");
            jail.create_dir(".keyweave")?;
            jail.create_file(
                ".keyweave/config.toml",
                "[providers.gemini]\napi_key = \"from-file\"\n",
            )?;

            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.providers.gemini.api_key(), Some("from-file"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_dir(".keyweave")?;
            jail.create_file(
                ".keyweave/config.toml",
                "[providers.openai]\ntemperature = 9.0\n",
            )?;

            assert!(ConfigLoader::load().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_template_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        assert!(ConfigLoader::write_template(&path, false).unwrap());
        assert!(!ConfigLoader::write_template(&path, false).unwrap());
        assert!(ConfigLoader::write_template(&path, true).unwrap());

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.export.format, ExportFormat::Json);
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::load_from_file(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(KeyweaveError::Config(_))));
    }

    #[test]
    fn test_render_omits_keys() {
        let mut config = Config::default();
        config.providers.openai.api_key = Some("sk-hidden".to_string());

        let toml = ConfigLoader::render(&config, false).unwrap();
        let json = ConfigLoader::render(&config, true).unwrap();
        assert!(!toml.contains("sk-hidden"));
        assert!(!json.contains("sk-hidden"));
        assert!(toml.contains("[generation]"));
    }
}
