//! AniList GraphQL client with rate-limit recovery.
//!
//! One outbound request per call. On an HTTP 429 the client sleeps the
//! configured cooldown and hands a retry signal back to the caller, which
//! re-issues the same page. Any other failure is fatal for the run.

use super::types::*;
use anyhow::{bail, Context, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use shared::MediaType;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const MEDIA_PAGE_QUERY: &str = r#"
    query ($page: Int, $perPage: Int, $type: MediaType) {
        Page(page: $page, perPage: $perPage) {
            media(type: $type) {
                id
                title { romaji english native }
                description
                coverImage { extraLarge }
                trailer { id site }
                duration
                episodes
                chapters
                volumes
                startDate { year month day }
                endDate { year month day }
                season
                seasonYear
                studios { nodes { name isAnimationStudio } }
                format
                source(version: 3)
                genres
                tags { name }
                relations { edges { relationType node { id type } } }
            }
            pageInfo { hasNextPage }
        }
    }
"#;

const GENRE_QUERY: &str = "query { GenreCollection }";

const TAG_QUERY: &str = "query { MediaTagCollection { name } }";

/// Outcome of one paginated fetch
#[derive(Debug)]
pub enum PageFetch {
    /// One decoded page of media plus the has-more flag
    Page {
        records: Vec<RawMedia>,
        has_next_page: bool,
    },
    /// Upstream throttled the request; the cooldown has already elapsed and
    /// the same page should be re-issued
    RetryAfterCooldown,
}

/// AniList GraphQL API client
pub struct AniListClient {
    /// HTTP client
    client: Client,
    /// GraphQL endpoint URL
    api_url: String,
    /// Bearer credential (acquired out of band)
    access_token: String,
    /// Pause before retrying a throttled request
    cooldown: Duration,
}

impl AniListClient {
    /// Create a new AniList client
    pub fn new(
        api_url: String,
        access_token: String,
        cooldown_seconds: u64,
        request_timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout_seconds))
            .user_agent("anidex-ingest/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url,
            access_token,
            cooldown: Duration::from_secs(cooldown_seconds),
        })
    }

    /// Fetch one page of the media catalog.
    ///
    /// Returns `PageFetch::RetryAfterCooldown` on a rate-limit response; the
    /// caller is responsible for looping until the page succeeds.
    pub async fn fetch_media_page(
        &self,
        page: u32,
        per_page: u32,
        media_type: MediaType,
    ) -> Result<PageFetch> {
        debug!(page, media_type = media_type.as_str(), "Requesting media page");

        let request = GraphQlRequest {
            query: MEDIA_PAGE_QUERY,
            variables: Some(PageVariables {
                page,
                per_page,
                media_type: media_type.graphql_value(),
            }),
        };

        let response = self.post(&request).await?;

        if is_rate_limited(response.status()) {
            warn!(
                page,
                cooldown_secs = self.cooldown.as_secs(),
                "Rate limited by AniList, cooling down before retry"
            );
            sleep(self.cooldown).await;
            return Ok(PageFetch::RetryAfterCooldown);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            bail!("Media page request failed with status {}: {}", status, body);
        }

        let decoded: GraphQlResponse<PageData> = response
            .json()
            .await
            .context("Failed to decode media page response")?;

        let page_data = decoded
            .data
            .map(|d| d.page)
            .context("Media page response carried no data")?;

        Ok(PageFetch::Page {
            records: page_data.media,
            has_next_page: page_data.page_info.has_next_page,
        })
    }

    /// Fetch the genre vocabulary (single request, no pagination)
    pub async fn fetch_genres(&self) -> Result<Vec<String>> {
        debug!("Requesting genre collection");

        let request: GraphQlRequest<'_, ()> = GraphQlRequest {
            query: GENRE_QUERY,
            variables: None,
        };

        let decoded: GraphQlResponse<GenreCollectionData> = self
            .post(&request)
            .await
            .and_then(|response| response.error_for_status().map_err(anyhow::Error::from))
            .context("Error fetching genre collection from AniList")?
            .json()
            .await
            .context("Error decoding genre collection from AniList")?;

        decoded
            .data
            .map(|d| d.genre_collection)
            .context("Genre collection response carried no data")
    }

    /// Fetch the tag vocabulary (single request, no pagination)
    pub async fn fetch_tags(&self) -> Result<Vec<RawTag>> {
        debug!("Requesting tag collection");

        let request: GraphQlRequest<'_, ()> = GraphQlRequest {
            query: TAG_QUERY,
            variables: None,
        };

        let decoded: GraphQlResponse<TagCollectionData> = self
            .post(&request)
            .await
            .and_then(|response| response.error_for_status().map_err(anyhow::Error::from))
            .context("Error fetching tag collection from AniList")?
            .json()
            .await
            .context("Error decoding tag collection from AniList")?;

        decoded
            .data
            .map(|d| d.media_tag_collection)
            .context("Tag collection response carried no data")
    }

    async fn post<V: Serialize>(
        &self,
        request: &GraphQlRequest<'_, V>,
    ) -> Result<reqwest::Response> {
        self.client
            .post(&self.api_url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .context("AniList request failed to send")
    }
}

/// True when the upstream status signals throttling
fn is_rate_limited(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
}
