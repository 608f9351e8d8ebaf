use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use rule_pilot::catalog::load_catalog;
use rule_pilot::cli::{Cli, Commands, Display, OutputFormat};
use rule_pilot::config::LoaderConfig;
use rule_pilot::error::Result;
use rule_pilot::fetch::{DocumentStore, FsDocumentStore};
use rule_pilot::orchestrator::RulesEngine;
use rule_pilot::prompt;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Display::new().print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rule_pilot=debug")
    } else {
        EnvFilter::new("rule_pilot=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let display = Display::new();

    match cli.command {
        Commands::Load { prompt, dir } => {
            cmd_load(&display, cli.format, cli.config, &prompt, &dir).await
        }
        Commands::Detect { dir } => cmd_detect(&display, cli.format, &dir),
        Commands::Classify { prompt } => cmd_classify(&display, cli.format, &prompt),
        Commands::Catalog => cmd_catalog(&display, cli.format, cli.config).await,
    }
}

/// Resolve configuration: explicit `--config` path, or `.rule-pilot.toml`
/// in the project directory, or defaults.
async fn load_config(config: Option<PathBuf>, dir: &Path) -> Result<LoaderConfig> {
    let mut loaded = match config {
        Some(path) => LoaderConfig::load(&path).await?,
        None => LoaderConfig::load(&dir.join(".rule-pilot.toml")).await?,
    };

    // A relative rules_repo is relative to the project directory.
    let repo = PathBuf::from(&loaded.rules_repo);
    if repo.is_relative() {
        loaded.rules_repo = dir.join(repo).display().to_string();
    }
    Ok(loaded)
}

async fn cmd_load(
    display: &Display,
    format: OutputFormat,
    config: Option<PathBuf>,
    prompt: &str,
    dir: &Path,
) -> Result<()> {
    let config = load_config(config, dir).await?;
    let store = Arc::new(FsDocumentStore::new(
        PathBuf::from(&config.rules_repo),
        config.rules_branch.clone(),
    ));
    let catalog = load_catalog(&store.index_path()).await?;
    let engine = RulesEngine::new(config, catalog, store);

    let outcome = engine.run(prompt, dir).await;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Text => {
            match &outcome.injected {
                Some(doc) => println!("{doc}\n"),
                None => display.print_info("No rules loaded."),
            }
            display.print_info(&format!(
                "{} rule(s) in {}ms",
                outcome.metadata.rules_loaded, outcome.metadata.timing.total_ms
            ));
            if let Some(error) = &outcome.metadata.error {
                display.print_warning(error);
            }
        }
    }

    Ok(())
}

fn cmd_detect(display: &Display, format: OutputFormat, dir: &Path) -> Result<()> {
    let context = rule_pilot::context::ContextDetector::new().detect(dir);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&context)?),
        OutputFormat::Text => {
            display.print_header("Detected Context");
            for line in context.summary().lines() {
                display.print_info(line);
            }
            display.print_info(&format!("Confidence: {:.2}", context.confidence));
        }
    }

    Ok(())
}

fn cmd_classify(display: &Display, format: OutputFormat, prompt: &str) -> Result<()> {
    let category = prompt::classify(prompt);
    let intent = prompt::extract_intent(prompt);

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({ "category": category, "intent": intent });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            display.print_info(&format!("Category: {category}"));
            display.print_info(&format!("Action: {:?}", intent.action));
            display.print_info(&format!("Urgency: {:?}", intent.urgency));
            let topics: Vec<_> = intent.topics.iter().cloned().collect();
            display.print_info(&format!("Topics: {}", topics.join(", ")));
        }
    }

    Ok(())
}

async fn cmd_catalog(
    display: &Display,
    format: OutputFormat,
    config: Option<PathBuf>,
) -> Result<()> {
    let current = std::env::current_dir()?;
    let config = load_config(config, &current).await?;
    let store = FsDocumentStore::new(
        PathBuf::from(&config.rules_repo),
        config.rules_branch.clone(),
    );

    let catalog = load_catalog(&store.index_path()).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(catalog.rules())?);
        }
        OutputFormat::Text => {
            display.print_success(&format!(
                "Catalog valid: {} rule(s) from {}",
                catalog.len(),
                store.describe()
            ));
            for rule in catalog.rules() {
                display.print_info(&format!(
                    "[{}] {} ({} tokens)",
                    rule.category, rule.path, rule.estimated_tokens
                ));
            }
        }
    }

    Ok(())
}
