//! AniList ingestion library.
//!
//! Fetches the paginated anime/manga catalogs from the AniList GraphQL API
//! and normalizes them into flat relational rows ready for bulk load.

pub mod api;
pub mod dates;
pub mod lookup;
pub mod pipeline;
pub mod sanitize;
pub mod transform;

pub use api::{AniListClient, PageFetch};
pub use lookup::LookupTables;
pub use pipeline::{IngestRunner, IngestStats};
