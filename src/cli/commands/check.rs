//! Check Command
//!
//! Tests connectivity to each configured AI provider. Diagnostic only:
//! generation still works without any provider.

use tokio::runtime::Runtime;

use crate::ai::check_providers;
use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

pub fn run() -> Result<()> {
    let config = ConfigLoader::load()?;
    let rt = Runtime::new()?;
    let result = rt.block_on(check_providers(&config.providers));

    let out = Output::new();
    out.header("Provider connectivity");

    for check in &result.checks {
        let line = format!(
            "{}: {} ({} ms)",
            check.provider, check.status.message, check.duration_ms
        );
        if check.status.success {
            out.success(&line);
        } else {
            out.failure(&line);
        }
    }

    for warning in &result.warnings {
        out.warning(warning);
    }
    if !result.recommendations.is_empty() {
        out.section("Recommendations");
        for recommendation in &result.recommendations {
            out.info(recommendation);
        }
    }

    println!();
    if result.passed {
        out.success("All providers reachable");
    } else {
        out.info("Keyword generation falls back to built-in rules for unavailable providers");
    }
    Ok(())
}
