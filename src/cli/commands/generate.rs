//! Generate Command
//!
//! Builds a keyword tree for one seed keyword and exports it.
//!
//! Usage:
//!   keyweave generate "digital marketing" [-d 3] [-i "use numbers"] [-f csv] [-o out.csv]
//!
//! Command-line values override `[generation]` and `[export]` settings.
//! `-o -` prints the export to stdout instead of writing a file.

use std::path::PathBuf;

use tokio::runtime::Runtime;
use tracing::info;

use crate::ai::FallbackResolver;
use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::export::{self, ExportFormat};
use crate::tree::{TreeBuilder, TreeOutput, TreeRequest};
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub keyword: String,
    pub depth: Option<u8>,
    pub instruction: Option<String>,
    pub format: Option<ExportFormat>,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl GenerateOptions {
    /// Layer command-line values over the loaded configuration
    fn apply(&self, config: &mut Config) {
        if let Some(depth) = self.depth {
            config.generation.depth = depth;
        }
        if let Some(ref instruction) = self.instruction {
            config.generation.custom_instruction = Some(instruction.clone());
        }
        if let Some(format) = self.format {
            config.export.format = format;
        }
        if let Some(seed) = self.seed {
            config.generation.rule_seed = Some(seed);
        }
    }
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    options.apply(&mut config);

    // Validate before touching providers or the runtime
    let request = TreeRequest::new(
        &options.keyword,
        config.generation.depth,
        config.generation.custom_instruction.as_deref(),
    )?;

    let resolver = FallbackResolver::from_config(&config);
    let builder = TreeBuilder::new(resolver);

    let rt = Runtime::new()?;
    let output = rt.block_on(builder.build(&request));

    let format = config.export.format;
    let to_stdout = options.output.as_deref().is_some_and(|p| p.as_os_str() == "-");
    if to_stdout {
        println!("{}", export::render(&output.root, format)?);
        return Ok(());
    }

    let path = options
        .output
        .unwrap_or_else(|| PathBuf::from(format.default_file_name(&request.seed)));
    export::write(&output.root, format, &path)?;
    info!(path = %path.display(), "Generation finished");

    print_summary(&output, builder.resolver(), format, &path);
    Ok(())
}

fn print_summary(
    output: &TreeOutput,
    resolver: &FallbackResolver,
    format: ExportFormat,
    path: &std::path::Path,
) {
    let out = Output::new();

    out.header(&format!("Keyword structure for \"{}\"", output.root.keyword));
    out.tree(&output.root);

    out.section("Summary");
    out.field("Nodes", output.stats.nodes);
    out.field("Levels", output.root.depth());
    let providers = resolver.provider_names();
    if providers.is_empty() {
        out.field("Providers", "none (rule-based)");
    } else {
        out.field("Providers", providers.join(", "));
    }
    let sources = output
        .stats
        .sources
        .iter()
        .map(|(source, count)| format!("{} {}", source, count))
        .collect::<Vec<_>>()
        .join(", ");
    out.field("Answered by", sources);
    out.field("Duration", format!("{} ms", output.stats.elapsed_ms));

    println!();
    out.success(&format!("Saved {} export to {}", format, path.display()));
}
