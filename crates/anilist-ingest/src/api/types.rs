//! AniList GraphQL wire types.
//!
//! These types mirror the JSON shapes exchanged with the AniList API. The
//! upstream uses camelCase field names throughout.

use serde::{Deserialize, Serialize};

/// Request envelope for a GraphQL query
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
}

/// Variables for the paginated media query
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVariables {
    pub page: u32,
    pub per_page: u32,
    #[serde(rename = "type")]
    pub media_type: &'static str,
}

/// Response envelope for a GraphQL query
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
}

/// Data payload of the paginated media query
#[derive(Debug, Clone, Deserialize)]
pub struct PageData {
    #[serde(rename = "Page")]
    pub page: MediaPage,
}

/// One page of media records plus pagination state
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    pub media: Vec<RawMedia>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
}

/// One media record as returned by AniList.
///
/// Exists only for the duration of one page's processing; the transformers
/// flatten it into the row models.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMedia {
    pub id: i32,
    pub title: Option<RawTitle>,
    pub description: Option<String>,
    pub cover_image: Option<RawCoverImage>,
    pub trailer: Option<RawTrailer>,
    pub duration: Option<i32>,
    pub episodes: Option<i32>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub start_date: Option<RawDate>,
    pub end_date: Option<RawDate>,
    pub season: Option<String>,
    pub season_year: Option<i32>,
    pub studios: Option<RawStudios>,
    pub format: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
    pub relations: Option<RawRelations>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCoverImage {
    pub extra_large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrailer {
    pub id: Option<String>,
    pub site: Option<String>,
}

/// A fuzzy calendar date; any component may be absent or zero
#[derive(Debug, Clone, Deserialize)]
pub struct RawDate {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStudios {
    pub nodes: Vec<RawStudio>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStudio {
    pub name: String,
    pub is_animation_studio: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTag {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRelations {
    pub edges: Vec<RawRelationEdge>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRelationEdge {
    pub relation_type: Option<String>,
    pub node: RawRelationNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRelationNode {
    pub id: i32,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

/// Data payload of the genre vocabulary query
#[derive(Debug, Clone, Deserialize)]
pub struct GenreCollectionData {
    #[serde(rename = "GenreCollection")]
    pub genre_collection: Vec<String>,
}

/// Data payload of the tag vocabulary query
#[derive(Debug, Clone, Deserialize)]
pub struct TagCollectionData {
    #[serde(rename = "MediaTagCollection")]
    pub media_tag_collection: Vec<RawTag>,
}
