//! Render an operation script to Cypher text.
//!
//! Reads a JSON script (see `cypher_builder::script`) from a file or stdin
//! and prints the resulting query on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use cypher_builder::{BuilderConfig, QueryBuilder, Script};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cypher-builder")]
#[command(about = "Render a JSON operation script to Cypher", long_about = None)]
struct Cli {
    /// Script file (reads stdin when omitted or "-")
    script: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Prefix for generated aliases (overrides config)
    #[arg(long)]
    alias_prefix: Option<String>,

    /// Text between clauses (overrides config)
    #[arg(long)]
    separator: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(&cli)?;
    let script = read_script(cli.script.as_ref())?;
    info!(operations = script.len(), "Rendering script");

    let query = QueryBuilder::from_config(&config).apply_script(script);
    println!("{}", query.cypher());

    Ok(())
}

fn load_config(cli: &Cli) -> Result<BuilderConfig> {
    let mut config = match &cli.config {
        Some(path) => BuilderConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BuilderConfig::default(),
    };

    if let Some(prefix) = &cli.alias_prefix {
        config.alias_prefix = prefix.clone();
    }
    if let Some(separator) = &cli.separator {
        config.clause_separator = separator.clone();
    }

    debug!(?config, "Using configuration");
    Ok(config)
}

fn read_script(path: Option<&PathBuf>) -> Result<Script> {
    let content = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };

    Script::from_json_str(&content).context("Invalid script")
}
