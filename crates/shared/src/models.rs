//! Row models for the normalized catalog schema.
//!
//! These are the flat shapes handed to the store for bulk load: entity rows,
//! attribute vocabulary rows, media-attribute junction rows, and typed
//! relation edges.

use serde::{Deserialize, Serialize};

/// Catalog side a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Anime,
    Manga,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Anime => "anime",
            MediaType::Manga => "manga",
        }
    }

    /// Upstream enum value for the GraphQL `type` argument
    pub fn graphql_value(&self) -> &'static str {
        match self {
            MediaType::Anime => "ANIME",
            MediaType::Manga => "MANGA",
        }
    }

    /// Primary key column of the entity table
    pub fn id_column(&self) -> &'static str {
        match self {
            MediaType::Anime => "anime_id",
            MediaType::Manga => "manga_id",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controlled classification axis (genre or tag vocabulary)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Genre,
    Tag,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Genre => "genre",
            AttributeKind::Tag => "tag",
        }
    }

    /// Name of the vocabulary table
    pub fn table(&self) -> &'static str {
        match self {
            AttributeKind::Genre => "genres",
            AttributeKind::Tag => "tags",
        }
    }

    /// Surrogate id column of the vocabulary table
    pub fn id_column(&self) -> &'static str {
        match self {
            AttributeKind::Genre => "genre_id",
            AttributeKind::Tag => "tag_id",
        }
    }

    /// Junction table connecting a media type to this vocabulary
    pub fn junction_table(&self, media_type: MediaType) -> &'static str {
        match (media_type, self) {
            (MediaType::Anime, AttributeKind::Genre) => "anime_genres",
            (MediaType::Anime, AttributeKind::Tag) => "anime_tags",
            (MediaType::Manga, AttributeKind::Genre) => "manga_genres",
            (MediaType::Manga, AttributeKind::Tag) => "manga_tags",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized media entity row.
///
/// Episode fields are populated for anime and chapter/volume fields for
/// manga; the fields for the other side are always None.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRow {
    pub id: i32,
    pub romaji_name: Option<String>,
    pub english_name: Option<String>,
    pub native_name: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub trailer_url: Option<String>,
    pub episode_duration: Option<i32>,
    pub episode_count: Option<i32>,
    pub chapter_count: Option<i32>,
    pub volume_count: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub year: Option<i32>,
    pub season: Option<String>,
    pub animation_studio: Option<String>,
    pub producers: Option<Vec<String>>,
    pub format: Option<String>,
    pub source: Option<String>,
}

/// Attribute vocabulary row.
///
/// Ids are assigned sequentially from 1 in first-seen order and are only
/// stable within a single ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRow {
    pub id: i32,
    pub name: String,
}

/// Junction row connecting one media entity to one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttributeRow {
    pub media_id: i32,
    pub attribute_id: i32,
}

/// Directed relation edge between two media entities.
///
/// Exactly one of `anime_id`/`manga_id` is set (the source side) and exactly
/// one of `related_anime_id`/`related_manga_id` is set (the target side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedMediaRow {
    pub anime_id: Option<i32>,
    pub manga_id: Option<i32>,
    pub related_anime_id: Option<i32>,
    pub related_manga_id: Option<i32>,
    pub relation_type: Option<String>,
}
