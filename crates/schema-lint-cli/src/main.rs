//! schema-lint CLI tool.
//!
//! Usage:
//! ```bash
//! schema-lint compat [OPTIONS] <PATCH>
//! schema-lint consistency --schema <FILE> (--resource <NAME> | --all)
//! schema-lint list-rules
//! schema-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Static checker for provider resource schemas and their documentation
#[derive(Parser)]
#[command(name = "schema-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a patch for backward-incompatible schema changes
    Compat {
        /// Unified diff to check
        patch: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Rule preset: recommended or lenient (overrides `preset` in the config)
        #[arg(short, long)]
        preset: Option<String>,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long, conflicts_with = "preset")]
        rules: Option<String>,

        /// Extra exclude patterns for patched files (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Check resource documentation against the provider schema
    Consistency {
        /// JSON schema registry exported by the provider
        #[arg(long)]
        schema: PathBuf,

        /// Resource to check (e.g. alicloud_vpc)
        #[arg(long, required_unless_present = "all", conflicts_with = "all")]
        resource: Option<String>,

        /// Check every resource in the registry
        #[arg(long)]
        all: bool,

        /// Directory holding the resource documents
        #[arg(long)]
        docs_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Rich diagnostics rendered by miette.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());

    match cli.command {
        Commands::Compat {
            patch,
            format,
            preset,
            rules,
            exclude,
        } => commands::compat::run(&patch, format, preset.as_deref(), rules, exclude, &source),
        Commands::Consistency {
            schema,
            resource,
            all: _,
            docs_dir,
            format,
        } => commands::consistency::run(
            &schema,
            resource.as_deref(),
            docs_dir.as_deref(),
            format,
            &source,
        ),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
