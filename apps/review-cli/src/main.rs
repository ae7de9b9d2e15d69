//! Submittal review client
//!
//! Uploads a submittal PDF and the specification it must meet, prints the
//! compliance report, then answers follow-up questions about the pair:
//!
//! ```text
//! submittal-review submittal.pdf spec.pdf --format html --output report.html
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use compliance_engine::reporter::{OutputFormat, Reporter};
use compliance_engine::{render, ReportView};
use review_session::{
    error_view, select_model, ClientConfig, Document, HttpBackend, ReviewBackend, ReviewSession,
    DEFAULT_MODEL,
};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod repl;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Console,
    Html,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Console => OutputFormat::Console,
            Format::Html => OutputFormat::Html,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

/// Command-line arguments for the review client
#[derive(Parser, Debug)]
#[command(name = "submittal-review")]
#[command(about = "Check a construction submittal against its specification")]
struct Args {
    /// Submittal PDF
    submittal: PathBuf,

    /// Specification PDF
    spec: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides the config file)
    #[arg(long)]
    server: Option<String>,

    /// Model id (skips model discovery)
    #[arg(short, long)]
    model: Option<String>,

    /// Environment variable holding the API key
    #[arg(long)]
    api_key_env: Option<String>,

    /// Report output format
    #[arg(short, long, value_enum, default_value = "console")]
    format: Format,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exit after the report instead of starting the chat
    #[arg(long)]
    no_chat: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(server) = &args.server {
        config.backend.base_url = server.clone();
    }
    if let Some(env) = &args.api_key_env {
        config.client.api_key_env = env.clone();
    }

    let api_key = config.client.api_key_from_env().unwrap_or_else(|| {
        warn!("{} is not set", config.client.api_key_env);
        Default::default()
    });

    let backend = HttpBackend::new(config.backend.clone()).context("Failed to build HTTP client")?;
    let model = match args.model.clone() {
        Some(model) => model,
        None => discover_model(&backend, &config).await,
    };
    info!("Using {} at {}", model, config.backend.base_url);

    let submittal = read_document(&args.submittal).await?;
    let spec = read_document(&args.spec).await?;

    let session = ReviewSession::new(backend, api_key, model);
    let reporter = Reporter::new(args.format.into());

    let result = session.analyze(submittal, spec).await;
    let view = match &result {
        Ok(analyzed) => ReportView::Report(render(&analyzed.report)),
        Err(err) => error_view(err),
    };
    match &args.output {
        Some(path) => {
            reporter.write_to_file(&view, path)?;
            info!("Report written to {}", path.display());
        }
        None => reporter.report(&view)?,
    }
    result.context("Analysis failed")?;

    if !args.no_chat {
        repl::run(&session).await?;
    }
    session.end_session().await;

    Ok(())
}

/// Remembered model if the backend still offers it, else its first model.
/// Falls back to the configured model when the list is unavailable.
async fn discover_model(backend: &impl ReviewBackend, config: &ClientConfig) -> String {
    let remembered = config.client.model.as_deref();
    let fallback = || remembered.unwrap_or(DEFAULT_MODEL).to_string();

    match backend.list_models().await {
        Ok(models) => select_model(&models, remembered)
            .map(|model| model.id.clone())
            .unwrap_or_else(fallback),
        Err(err) => {
            warn!("Could not load models: {}", err);
            fallback()
        }
    }
}

async fn read_document(path: &Path) -> anyhow::Result<Document> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    Ok(Document::new(name, bytes))
}
