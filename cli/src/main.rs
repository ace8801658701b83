//! `curriculo` - extract educational metadata from a teacher description.
//!
//! Usage:
//!   curriculo extract "Questão sobre a Era Vargas" --context ano=9º --pretty
//!   curriculo health

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use curriculo_extract::{ExtractConfig, ExtractRequest, Extractor, Field};
use curriculo_nlp::HeuristicAnnotator;

#[derive(Parser, Debug)]
#[command(name = "curriculo")]
#[command(about = "Extract curriculum metadata from teacher descriptions")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true, env = "CURRICULO_CONFIG")]
    config: Option<PathBuf>,

    /// Curriculum JSON file, overriding the configuration
    #[arg(long, global = true, env = "CURRICULO_CURRICULUM")]
    curriculum: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a text and print the extraction response
    Extract {
        /// Teacher description
        text: String,

        /// Known field value, as `field=value` (e.g. `disciplina=História`)
        #[arg(long = "context", value_name = "FIELD=VALUE", value_parser = parse_context)]
        context: Vec<(Field, String)>,
    },

    /// Print the service health status
    Health,
}

fn parse_context(raw: &str) -> std::result::Result<(Field, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    let field = Field::from_key(key.trim()).ok_or_else(|| {
        let known: Vec<&str> = Field::RESOLUTION_ORDER.into_iter().map(Field::key).collect();
        format!("unknown field `{key}`, expected one of: {}", known.join(", "))
    })?;
    Ok((field, value.trim().to_string()))
}

fn load_config(args: &Args) -> Result<ExtractConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ExtractConfig::default(),
    };
    if let Some(path) = &args.curriculum {
        config = config.with_curriculum_path(path);
    }
    Ok(config)
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!("Curriculum: {}", config.curriculum_path.display());

    let annotator = Arc::new(HeuristicAnnotator::new());
    // Data files named on the command line must load.
    let extractor = if args.curriculum.is_some() {
        Extractor::try_new(config, annotator).context("Failed to load curriculum data")?
    } else {
        Extractor::new(config, annotator)
    };

    match &args.command {
        Command::Extract { text, context } => {
            if !extractor.is_ready() {
                bail!("Extractor is not ready: annotator unavailable");
            }
            let request = context
                .iter()
                .fold(ExtractRequest::new(text.as_str()), |request, (field, value)| {
                    request.with_context(field.key(), Value::String(value.clone()))
                });
            let response = extractor
                .handle(&request)
                .context("Extraction failed")?;
            print_json(&response, args.pretty)
        }
        Command::Health => print_json(&extractor.health(), args.pretty),
    }
}
