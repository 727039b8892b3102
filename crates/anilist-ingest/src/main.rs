//! AniList ingestion CLI application.

use anilist_ingest::{AniListClient, IngestRunner};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shared::{Config, Database, MediaStore, MediaType};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Which catalog to ingest
    #[arg(short, long, value_enum, default_value = "both")]
    media: MediaSelection,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MediaSelection {
    Anime,
    Manga,
    Both,
}

impl MediaSelection {
    fn media_types(self) -> Vec<MediaType> {
        match self {
            MediaSelection::Anime => vec![MediaType::Anime],
            MediaSelection::Manga => vec![MediaType::Manga],
            MediaSelection::Both => vec![MediaType::Anime, MediaType::Manga],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "anilist-ingest".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!("AniList ingester starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    // Initialize database and store
    let db_path = config.database_path();
    info!(db_path = %db_path.display(), "Opening database");
    let database = Database::open(&db_path).context("Failed to open database")?;
    let store = MediaStore::new(database);

    // Initialize API client
    let client = AniListClient::new(
        config.anilist.api_url.clone(),
        config.anilist.access_token.clone(),
        config.anilist.cooldown_seconds,
        config.anilist.request_timeout_seconds,
    )
    .context("Failed to create AniList client")?;

    // Run ingestion
    let mut runner = IngestRunner::new(client, store, config.anilist.page_size);
    let stats = runner
        .run(&args.media.media_types())
        .await
        .context("Ingestion run failed")?;

    // Display final statistics
    info!("=== Ingestion Complete ===");
    info!("Genres: {}", stats.genres);
    info!("Tags: {}", stats.tags);
    info!("Pages fetched: {}", stats.pages_fetched);
    info!("Throttle retries: {}", stats.throttle_retries);
    info!("Media rows: {}", stats.media_rows);
    info!("Attribute links: {}", stats.attribute_links);
    info!("Relation rows: {}", stats.relation_rows);

    let store_stats = runner.store_stats().context("Failed to read store stats")?;
    info!("=== Catalog Totals ===");
    info!("Anime: {}", store_stats.anime);
    info!("Manga: {}", store_stats.manga);
    info!("Genres: {}", store_stats.genres);
    info!("Tags: {}", store_stats.tags);
    info!("Attribute links: {}", store_stats.attribute_links);
    info!("Relation edges: {}", store_stats.relation_edges);

    info!("AniList ingester finished successfully");

    Ok(())
}
