//! Transformation stage: raw AniList records to flat relational rows.

pub mod attribute;
pub mod media;
pub mod relation;

pub use attribute::{link_media_attributes, transform_attributes, AttributeEntry, UnknownAttribute};
pub use media::transform_media;
pub use relation::transform_relations;
