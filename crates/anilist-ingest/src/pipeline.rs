//! Ingestion run orchestration.
//!
//! Coordinates the whole run: build the attribute vocabularies first, then
//! walk the media pages sequentially, transforming and storing each page.
//! A throttled page is re-issued without advancing; any other failure
//! aborts the run.

use crate::api::{AniListClient, PageFetch};
use crate::lookup::LookupTables;
use crate::transform::{
    link_media_attributes, transform_attributes, transform_media, transform_relations,
};
use anyhow::{Context, Result};
use shared::{AttributeKind, AttributeRow, MediaStore, MediaType, StoreStats};
use std::collections::HashMap;
use tracing::{debug, info};

/// Statistics for one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    pub genres: usize,
    pub tags: usize,
    pub pages_fetched: usize,
    pub throttle_retries: usize,
    pub media_rows: usize,
    pub attribute_links: usize,
    pub relation_rows: usize,
}

/// Main ingestion coordinator
pub struct IngestRunner {
    client: AniListClient,
    store: MediaStore,
    lookups: LookupTables,
    page_size: u32,
}

impl IngestRunner {
    /// Create a new ingestion runner
    pub fn new(client: AniListClient, store: MediaStore, page_size: u32) -> Self {
        Self {
            client,
            store,
            lookups: LookupTables::new(),
            page_size,
        }
    }

    /// Run the complete ingestion process for the given media types.
    ///
    /// Vocabulary tables are built and stored before any media page is
    /// linked, so every junction row can resolve its attribute id.
    pub async fn run(&mut self, media_types: &[MediaType]) -> Result<IngestStats> {
        info!("Starting AniList ingestion");

        let mut stats = IngestStats::default();

        info!("Phase 1: Building attribute vocabularies");

        let genres = self
            .client
            .fetch_genres()
            .await
            .context("Failed to fetch genre vocabulary")?;
        let genre_rows = transform_attributes(&genres);
        self.store
            .replace_attributes(AttributeKind::Genre, &genre_rows)?;
        let genre_ids = id_map(&genre_rows);
        stats.genres = genre_rows.len();

        let tags = self
            .client
            .fetch_tags()
            .await
            .context("Failed to fetch tag vocabulary")?;
        let tag_rows = transform_attributes(&tags);
        self.store
            .replace_attributes(AttributeKind::Tag, &tag_rows)?;
        let tag_ids = id_map(&tag_rows);
        stats.tags = tag_rows.len();

        info!(
            genres = stats.genres,
            tags = stats.tags,
            "Attribute vocabularies ready"
        );

        info!("Phase 2: Ingesting media pages");
        for media_type in media_types {
            self.ingest_media(*media_type, &genre_ids, &tag_ids, &mut stats)
                .await?;
        }

        info!(
            pages = stats.pages_fetched,
            throttle_retries = stats.throttle_retries,
            media_rows = stats.media_rows,
            attribute_links = stats.attribute_links,
            relation_rows = stats.relation_rows,
            "AniList ingestion complete"
        );

        Ok(stats)
    }

    /// Walk one media catalog page by page until the upstream reports no
    /// further pages
    async fn ingest_media(
        &mut self,
        media_type: MediaType,
        genre_ids: &HashMap<String, i32>,
        tag_ids: &HashMap<String, i32>,
        stats: &mut IngestStats,
    ) -> Result<()> {
        info!(media_type = media_type.as_str(), "Ingesting catalog");

        let mut page = 1u32;
        loop {
            let fetched = self
                .client
                .fetch_media_page(page, self.page_size, media_type)
                .await
                .with_context(|| format!("Failed to fetch {} page {}", media_type, page))?;

            let advanced = next_page(page, &fetched);
            let (records, has_next_page) = match fetched {
                PageFetch::RetryAfterCooldown => {
                    // Re-issue the same page
                    stats.throttle_retries += 1;
                    page = advanced;
                    continue;
                }
                PageFetch::Page {
                    records,
                    has_next_page,
                } => (records, has_next_page),
            };
            stats.pages_fetched += 1;

            let rows = transform_media(&records, media_type, &self.lookups);
            let genre_links = link_media_attributes(&records, genre_ids, AttributeKind::Genre)
                .with_context(|| format!("Genre linking failed on {} page {}", media_type, page))?;
            let tag_links = link_media_attributes(&records, tag_ids, AttributeKind::Tag)
                .with_context(|| format!("Tag linking failed on {} page {}", media_type, page))?;
            let relations = transform_relations(&records, media_type, &self.lookups);

            self.store
                .insert_page(media_type, &rows, &genre_links, &tag_links, &relations)
                .with_context(|| format!("Failed to store {} page {}", media_type, page))?;

            stats.media_rows += rows.len();
            stats.attribute_links += genre_links.len() + tag_links.len();
            stats.relation_rows += relations.len();

            debug!(
                media_type = media_type.as_str(),
                page,
                records = rows.len(),
                "Stored media page"
            );

            if !has_next_page {
                break;
            }
            page = advanced;
        }

        info!(media_type = media_type.as_str(), "Catalog ingested");
        Ok(())
    }

    /// Current row counts in the catalog store
    pub fn store_stats(&self) -> Result<StoreStats> {
        self.store.stats()
    }
}

/// Page to request after a fetch outcome: a throttled fetch replays the
/// same page, a served page advances to the next one.
fn next_page(current: u32, outcome: &PageFetch) -> u32 {
    match outcome {
        PageFetch::RetryAfterCooldown => current,
        PageFetch::Page { .. } => current + 1,
    }
}

fn id_map(rows: &[AttributeRow]) -> HashMap<String, i32> {
    rows.iter()
        .map(|row| (row.name.clone(), row.id))
        .collect()
}
