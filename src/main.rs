use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keyweave::cli::commands::generate::GenerateOptions;
use keyweave::export::ExportFormat;

/// Parse export format from string
fn parse_export_format(s: &str) -> Result<ExportFormat, String> {
    s.parse::<ExportFormat>().map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "keyweave")]
#[command(
    version,
    about = "SEO keyword taxonomy generator with AI provider fallback"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a keyword structure from a seed keyword
    Generate {
        #[arg(help = "Seed keyword, e.g. \"digital marketing\"")]
        keyword: String,
        #[arg(short = 'd', long, help = "Levels below the seed (1-3, default: 2)")]
        depth: Option<u8>,
        #[arg(
            short = 'i',
            long,
            help = "Custom title instruction, e.g. \"use numbers\""
        )]
        instruction: Option<String>,
        #[arg(
            short = 'f',
            long,
            value_parser = parse_export_format,
            help = "Export format: json, keywords, csv, graph, outline"
        )]
        format: Option<ExportFormat>,
        #[arg(short = 'o', long, help = "Output file ('-' for stdout)")]
        output: Option<PathBuf>,
        #[arg(long, help = "Seed for reproducible rule-based output")]
        seed: Option<u64>,
    },

    /// Test connectivity to the configured AI providers
    Check,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            value_parser = ["toml", "json"],
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mkeyweave encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", keyweave::cli::error_line(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            keyword,
            depth,
            instruction,
            format,
            output,
            seed,
        } => {
            keyweave::cli::commands::generate::run(GenerateOptions {
                keyword,
                depth,
                instruction,
                format,
                output,
                seed,
            })?;
        }
        Commands::Check => {
            keyweave::cli::commands::check::run()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                keyweave::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                keyweave::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                keyweave::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_show_format_is_validated() {
        for format in ["toml", "json"] {
            let cli = Cli::try_parse_from(["keyweave", "config", "show", "-f", format]).unwrap();
            assert!(matches!(
                cli.command,
                Commands::Config {
                    action: ConfigAction::Show { format: ref f }
                } if f == format
            ));
        }

        let err = Cli::try_parse_from(["keyweave", "config", "show", "-f", "jsno"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_generate_format_is_validated() {
        let cli = Cli::try_parse_from(["keyweave", "generate", "seo", "-f", "csv", "-d", "3"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Generate {
                format: Some(ExportFormat::Csv),
                depth: Some(3),
                ..
            }
        ));

        assert!(Cli::try_parse_from(["keyweave", "generate", "seo", "-f", "xml"]).is_err());
    }
}
