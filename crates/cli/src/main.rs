use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use hasura_model_schemas::{generate, generate_pretty, parse_schema, PluginConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hms")]
#[command(about = "Derive per-model type shapes and CRUD permissions from a Hasura GraphQL schema", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the GraphQL schema, in SDL form
    #[arg(env = "HMS_SCHEMA")]
    schema: PathBuf,

    /// Path to the plugin configuration (YAML or JSON, by file extension)
    #[arg(long, short, env = "HMS_CONFIG")]
    config: PathBuf,

    /// Process these model names instead of the configured list
    /// (the profile still comes from the configuration file)
    #[arg(long = "model", value_name = "NAME")]
    models: Vec<String>,

    /// Write the JSON output to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if !cli.models.is_empty() {
        config.set_model_names(cli.models.clone());
    }
    config
        .validate()
        .with_context(|| format!("config {} rejected", cli.config.display()))?;

    let sdl = fs::read_to_string(&cli.schema)
        .with_context(|| format!("failed to read schema {}", cli.schema.display()))?;
    let schema = parse_schema(&sdl)
        .with_context(|| format!("failed to parse schema {}", cli.schema.display()))?;
    debug!(types = schema.types.len(), "parsed schema");

    let json = if cli.pretty {
        generate_pretty(&schema, &config)?
    } else {
        generate(&schema, &config)?
    };

    match &cli.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write output {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

/// Load the plugin config from YAML (`.yaml`/`.yml`) or JSON.
fn load_config(path: &Path) -> Result<PluginConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = match extension {
        "yaml" | "yml" => serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid YAML config {}", path.display()))?,
        "json" => serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON config {}", path.display()))?,
        other => bail!(
            "unsupported config extension `{other}` for {} (expected yaml, yml or json)",
            path.display()
        ),
    };
    Ok(config)
}
