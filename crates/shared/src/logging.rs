//! Logging infrastructure for the AniDex pipeline.
//!
//! Builds a tracing subscriber from the run configuration: an optional
//! console layer, an optional daily-rolling file layer (plain or JSON), and
//! a filter that keeps HTTP internals quiet.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory path
    pub log_dir: String,
    /// Component name (used for log file naming)
    pub component: String,
    /// Default log level
    pub default_level: Level,
    /// Enable console output
    pub console: bool,
    /// Enable file output
    pub file: bool,
    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "data/logs".to_string(),
            component: "anidex".to_string(),
            default_level: Level::INFO,
            console: true,
            file: true,
            json_format: false,
        }
    }
}

/// Initialize logging with the given configuration
///
/// `RUST_LOG` overrides the configured levels entirely.
pub fn init(config: LogConfig) -> Result<()> {
    let log_dir = Path::new(&config.log_dir);
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", config.log_dir))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config));
    let console = config
        .console
        .then(|| fmt::layer().with_target(true).with_writer(std::io::stdout));
    let file = config.file.then(|| file_layer(log_dir, &config));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::info!(
        component = %config.component,
        log_dir = %config.log_dir,
        "Logging initialized"
    );

    Ok(())
}

/// Workspace crates at the configured level, HTTP internals pinned to warn
fn default_filter(config: &LogConfig) -> EnvFilter {
    let level = config.default_level;
    let component = config.component.replace('-', "_");
    EnvFilter::new(format!(
        "shared={level},anilist_ingest={level},{component}={level},hyper=warn,reqwest=warn,h2=warn"
    ))
}

/// Daily-rolling file output, plain text or JSON per the configuration
fn file_layer<S>(log_dir: &Path, config: &LogConfig) -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    let appender = tracing_appender::rolling::daily(log_dir, &config.component);
    if config.json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(appender)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_writer(appender)
            .boxed()
    }
}
