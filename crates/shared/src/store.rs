//! Bulk-load store for the normalized catalog.
//!
//! This is the persistence boundary of the pipeline: it receives the flat
//! row sets produced by the transformers and writes them to SQLite. Each
//! media page is written in a single transaction, so a page either lands
//! completely or not at all.

use crate::models::*;
use crate::Database;
use anyhow::{Context, Result};
use rusqlite::{params, Transaction};
use tracing::{debug, info};

/// Catalog store over the SQLite database
pub struct MediaStore {
    db: Database,
}

impl MediaStore {
    /// Create a new store with the given database
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Replace the vocabulary table for one attribute kind.
    ///
    /// Vocabulary ids are reassigned on every run, so any junction rows
    /// pointing at the old ids are cleared in the same transaction.
    pub fn replace_attributes(&mut self, kind: AttributeKind, rows: &[AttributeRow]) -> Result<()> {
        let tx = self
            .db
            .conn_mut()
            .transaction()
            .context("Failed to begin vocabulary transaction")?;

        for media_type in [MediaType::Anime, MediaType::Manga] {
            tx.execute(
                &format!("DELETE FROM {}", kind.junction_table(media_type)),
                [],
            )?;
        }
        tx.execute(&format!("DELETE FROM {}", kind.table()), [])?;

        {
            let sql = format!(
                "INSERT INTO {} ({}, name) VALUES (?1, ?2)",
                kind.table(),
                kind.id_column()
            );
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                stmt.execute(params![row.id, row.name])
                    .with_context(|| format!("Failed to insert {} \"{}\"", kind, row.name))?;
            }
        }

        tx.commit().context("Failed to commit vocabulary transaction")?;

        info!(kind = kind.as_str(), entries = rows.len(), "Replaced attribute vocabulary");
        Ok(())
    }

    /// Store one transformed media page atomically.
    ///
    /// Entity rows are upserted by id; junction rows are upserted by their
    /// composite key; relation edges for the page's media are replaced.
    pub fn insert_page(
        &mut self,
        media_type: MediaType,
        media: &[MediaRow],
        genre_links: &[MediaAttributeRow],
        tag_links: &[MediaAttributeRow],
        relations: &[RelatedMediaRow],
    ) -> Result<()> {
        let tx = self
            .db
            .conn_mut()
            .transaction()
            .context("Failed to begin page transaction")?;

        insert_media_rows(&tx, media_type, media)?;
        insert_attribute_links(&tx, media_type, AttributeKind::Genre, genre_links)?;
        insert_attribute_links(&tx, media_type, AttributeKind::Tag, tag_links)?;
        insert_relation_rows(&tx, media_type, media, relations)?;

        tx.commit().context("Failed to commit page transaction")?;

        debug!(
            media_type = media_type.as_str(),
            media = media.len(),
            genre_links = genre_links.len(),
            tag_links = tag_links.len(),
            relations = relations.len(),
            "Stored media page"
        );

        Ok(())
    }

    /// Row counts across the catalog tables
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            anime: self.count("anime")?,
            manga: self.count("manga")?,
            genres: self.count("genres")?,
            tags: self.count("tags")?,
            attribute_links: self.count("anime_genres")?
                + self.count("anime_tags")?
                + self.count("manga_genres")?
                + self.count("manga_tags")?,
            relation_edges: self.count("related_media")?,
        })
    }

    fn count(&self, table: &str) -> Result<usize> {
        let n: i64 = self
            .db
            .conn()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .with_context(|| format!("Failed to count rows in {}", table))?;
        Ok(n as usize)
    }
}

/// Row counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub anime: usize,
    pub manga: usize,
    pub genres: usize,
    pub tags: usize,
    pub attribute_links: usize,
    pub relation_edges: usize,
}

fn insert_media_rows(tx: &Transaction, media_type: MediaType, rows: &[MediaRow]) -> Result<()> {
    let sql = match media_type {
        MediaType::Anime => {
            "INSERT OR REPLACE INTO anime (
                anime_id, romaji_name, english_name, native_name, description,
                cover_image, trailer_url, episode_duration, episode_count,
                start_date, end_date, year, season, animation_studio,
                producers, format, source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
        }
        MediaType::Manga => {
            "INSERT OR REPLACE INTO manga (
                manga_id, romaji_name, english_name, native_name, description,
                cover_image, trailer_url, chapter_count, volume_count,
                start_date, end_date, year, season, animation_studio,
                producers, format, source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
        }
    };

    let mut stmt = tx.prepare(sql)?;
    for row in rows {
        let producers = row
            .producers
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("Failed to serialize producers")?;

        // Type-conditional columns: episodes for anime, chapters for manga
        let (count_a, count_b) = match media_type {
            MediaType::Anime => (row.episode_duration, row.episode_count),
            MediaType::Manga => (row.chapter_count, row.volume_count),
        };

        stmt.execute(params![
            row.id,
            row.romaji_name,
            row.english_name,
            row.native_name,
            row.description,
            row.cover_image,
            row.trailer_url,
            count_a,
            count_b,
            row.start_date,
            row.end_date,
            row.year,
            row.season,
            row.animation_studio,
            producers,
            row.format,
            row.source,
        ])
        .with_context(|| format!("Failed to insert {} {}", media_type, row.id))?;
    }

    Ok(())
}

fn insert_attribute_links(
    tx: &Transaction,
    media_type: MediaType,
    kind: AttributeKind,
    links: &[MediaAttributeRow],
) -> Result<()> {
    if links.is_empty() {
        return Ok(());
    }

    let sql = format!(
        "INSERT OR REPLACE INTO {} ({}, {}) VALUES (?1, ?2)",
        kind.junction_table(media_type),
        media_type.id_column(),
        kind.id_column()
    );

    let mut stmt = tx.prepare(&sql)?;
    for link in links {
        stmt.execute(params![link.media_id, link.attribute_id])
            .with_context(|| {
                format!(
                    "Failed to link {} {} to {} {}",
                    media_type, link.media_id, kind, link.attribute_id
                )
            })?;
    }

    Ok(())
}

fn insert_relation_rows(
    tx: &Transaction,
    media_type: MediaType,
    media: &[MediaRow],
    rows: &[RelatedMediaRow],
) -> Result<()> {
    // Replace this page's outgoing edges so re-ingesting stays idempotent
    {
        let delete_sql = format!(
            "DELETE FROM related_media WHERE {} = ?1",
            media_type.id_column()
        );
        let mut delete = tx.prepare(&delete_sql)?;
        for row in media {
            delete.execute(params![row.id])?;
        }
    }

    let mut insert = tx.prepare(
        "INSERT INTO related_media (
            anime_id, manga_id, related_anime_id, related_manga_id, relation_type
        ) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in rows {
        insert
            .execute(params![
                row.anime_id,
                row.manga_id,
                row.related_anime_id,
                row.related_manga_id,
                row.relation_type,
            ])
            .context("Failed to insert relation edge")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, MediaStore) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(temp_dir.path().join("test.db")).unwrap();
        (temp_dir, MediaStore::new(db))
    }

    fn anime_row(id: i32) -> MediaRow {
        MediaRow {
            id,
            romaji_name: Some("Foo".to_string()),
            english_name: None,
            native_name: None,
            description: Some("A show".to_string()),
            cover_image: None,
            trailer_url: None,
            episode_duration: Some(24),
            episode_count: Some(12),
            chapter_count: None,
            volume_count: None,
            start_date: Some("2020-1-1".to_string()),
            end_date: None,
            year: Some(2020),
            season: Some("Winter".to_string()),
            animation_studio: Some("Studio A".to_string()),
            producers: Some(vec!["Producer B".to_string()]),
            format: Some("TV".to_string()),
            source: Some("Original".to_string()),
        }
    }

    #[test]
    fn test_replace_attributes() -> Result<()> {
        let (_dir, mut store) = test_store();

        let rows = vec![
            AttributeRow { id: 1, name: "Action".to_string() },
            AttributeRow { id: 2, name: "Drama".to_string() },
        ];
        store.replace_attributes(AttributeKind::Genre, &rows)?;
        assert_eq!(store.stats()?.genres, 2);

        // A second run replaces rather than accumulates
        store.replace_attributes(AttributeKind::Genre, &rows[..1])?;
        assert_eq!(store.stats()?.genres, 1);

        Ok(())
    }

    #[test]
    fn test_insert_page_round_trip() -> Result<()> {
        let (_dir, mut store) = test_store();

        store.replace_attributes(
            AttributeKind::Genre,
            &[AttributeRow { id: 1, name: "Action".to_string() }],
        )?;
        store.replace_attributes(
            AttributeKind::Tag,
            &[AttributeRow { id: 1, name: "Time Travel".to_string() }],
        )?;

        let media = vec![anime_row(10)];
        let genre_links = vec![MediaAttributeRow { media_id: 10, attribute_id: 1 }];
        let tag_links = vec![MediaAttributeRow { media_id: 10, attribute_id: 1 }];
        let relations = vec![RelatedMediaRow {
            anime_id: Some(10),
            manga_id: None,
            related_anime_id: None,
            related_manga_id: Some(77),
            relation_type: Some("Adaptation".to_string()),
        }];

        store.insert_page(MediaType::Anime, &media, &genre_links, &tag_links, &relations)?;

        let stats = store.stats()?;
        assert_eq!(stats.anime, 1);
        assert_eq!(stats.attribute_links, 2);
        assert_eq!(stats.relation_edges, 1);

        Ok(())
    }

    #[test]
    fn test_insert_page_is_idempotent() -> Result<()> {
        let (_dir, mut store) = test_store();

        store.replace_attributes(
            AttributeKind::Genre,
            &[AttributeRow { id: 1, name: "Action".to_string() }],
        )?;

        let media = vec![anime_row(10)];
        let genre_links = vec![MediaAttributeRow { media_id: 10, attribute_id: 1 }];
        let relations = vec![RelatedMediaRow {
            anime_id: Some(10),
            manga_id: None,
            related_anime_id: Some(11),
            related_manga_id: None,
            relation_type: Some("Sequel".to_string()),
        }];

        store.insert_page(MediaType::Anime, &media, &genre_links, &[], &relations)?;
        store.insert_page(MediaType::Anime, &media, &genre_links, &[], &relations)?;

        let stats = store.stats()?;
        assert_eq!(stats.anime, 1);
        assert_eq!(stats.attribute_links, 1);
        assert_eq!(stats.relation_edges, 1);

        Ok(())
    }

    #[test]
    fn test_relation_edge_requires_one_side() {
        let (_dir, mut store) = test_store();

        // Both source columns set violates the schema CHECK
        let bad = vec![RelatedMediaRow {
            anime_id: Some(1),
            manga_id: Some(2),
            related_anime_id: Some(3),
            related_manga_id: None,
            relation_type: None,
        }];

        let result = store.insert_page(MediaType::Anime, &[], &[], &[], &bad);
        assert!(result.is_err());
    }
}
