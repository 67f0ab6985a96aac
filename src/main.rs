//! Revscope CLI - attribute changed line ranges to syntactic constructs

use clap::{Parser, Subcommand};
use revscope::LineRange;
use revscope::adapter::{self, AdapterRegistry, LanguageAdapter};
use revscope::config::{self, RevscopeConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "revscope")]
#[command(version = "0.1.0")]
#[command(about = "Enclosing-context locator - maps line ranges to syntactic constructs")]
#[command(long_about = r#"
Revscope attributes a changed line range (e.g. a diff hunk) to the
syntactic construct that contains it, and checks files for syntax
errors, so review tooling can reason about functions and classes
instead of raw line spans.

Example usage:
  revscope locate --file src/auth.py --start 10 --end 14
  revscope check --file src/auth.py
  revscope languages
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a revscope.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the construct enclosing a line range
    Locate {
        /// Source file to inspect
        #[arg(short, long)]
        file: PathBuf,

        /// First changed line (1-based)
        #[arg(short, long)]
        start: u32,

        /// Last changed line (1-based, inclusive; defaults to --start)
        #[arg(short, long)]
        end: Option<u32>,

        /// Override adapter selection (defaults to the file extension)
        #[arg(short, long)]
        language: Option<String>,

        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },

    /// Check a file for syntax errors
    Check {
        /// Source file to check
        #[arg(short, long)]
        file: PathBuf,

        /// Override adapter selection (defaults to the file extension)
        #[arg(short, long)]
        language: Option<String>,

        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },

    /// List supported languages and their file extensions
    Languages,

    /// Write a default revscope.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let registry = build_registry(&config)?;

    match cli.command {
        Commands::Locate {
            file,
            start,
            end,
            language,
            format,
        } => {
            let range = LineRange::new(start, end.unwrap_or(start))?;
            let adapter = select_adapter(&registry, &file, language.as_deref())?;
            let source = std::fs::read_to_string(&file)?;

            tracing::debug!(
                "locating lines {} in {} as {}",
                range,
                file.display(),
                adapter.language_name()
            );
            let context = adapter.locate_enclosing_context(&source, &range);

            if output_format(format.as_deref(), &config) == "json" {
                println!("{}", serde_json::to_string_pretty(&context)?);
            } else {
                match context {
                    Some(ctx) => println!("✅ {}", ctx),
                    None => println!("∅ No enclosing context for lines {}", range),
                }
            }
        }

        Commands::Check {
            file,
            language,
            format,
        } => {
            let adapter = select_adapter(&registry, &file, language.as_deref())?;
            let source = std::fs::read_to_string(&file)?;

            let result = adapter.check_syntax(&source);

            if output_format(format.as_deref(), &config) == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if result.valid {
                println!("✅ {} syntax OK", adapter.language_name());
            } else {
                println!("❌ {}", result.error);
            }
        }

        Commands::Languages => {
            for adapter in registry.adapters() {
                println!(
                    "- {} ({})",
                    adapter.language_name(),
                    adapter.file_extensions().join(", ")
                );
            }
        }

        Commands::Init { force } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(config::default_config_path);
            config::write_config(&path, &RevscopeConfig::default(), force)?;
            println!("✅ Wrote {}", path.display());
        }
    }

    Ok(())
}

/// Build the adapter registry, honoring the optional language allowlist.
fn build_registry(config: &RevscopeConfig) -> anyhow::Result<AdapterRegistry> {
    let mut registry = adapter::default_registry()?;
    if let Some(enabled) = &config.languages {
        registry.retain_languages(enabled);
    }
    Ok(registry)
}

/// Pick an adapter: explicit --language wins, otherwise file extension.
fn select_adapter<'r>(
    registry: &'r AdapterRegistry,
    file: &Path,
    language: Option<&str>,
) -> anyhow::Result<&'r dyn LanguageAdapter> {
    let adapter = match language {
        Some(name) => registry.find_by_language(name),
        None => registry.find_adapter(file),
    };

    adapter.ok_or_else(|| anyhow::anyhow!("no language adapter for {}", file.display()))
}

fn output_format(flag: Option<&str>, config: &RevscopeConfig) -> String {
    flag.map(str::to_string)
        .or_else(|| config.format.clone())
        .unwrap_or_else(|| "text".to_string())
}
