//! Attribute vocabulary transformation and media-attribute linking.
//!
//! The two vocabulary endpoints return different shapes (genres as bare
//! strings, tags as name-bearing records); the `AttributeEntry` trait folds
//! both into one id-assignment path.

use crate::api::types::{RawMedia, RawTag};
use shared::{AttributeKind, AttributeRow, MediaAttributeRow};
use std::collections::HashMap;
use thiserror::Error;

/// A vocabulary entry from either upstream shape
pub trait AttributeEntry {
    fn name(&self) -> &str;
}

impl AttributeEntry for String {
    fn name(&self) -> &str {
        self
    }
}

impl AttributeEntry for &str {
    fn name(&self) -> &str {
        self
    }
}

impl AttributeEntry for RawTag {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Assign sequential ids to a vocabulary list.
///
/// Ids start at 1 and follow input order; they are only stable within a
/// single run.
pub fn transform_attributes<T: AttributeEntry>(entries: &[T]) -> Vec<AttributeRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| AttributeRow {
            id: index as i32 + 1,
            name: entry.name().to_string(),
        })
        .collect()
}

/// A media record referenced an attribute name missing from the id map.
///
/// This means vocabulary building was skipped or is stale relative to the
/// media page; the link must not be silently dropped.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{kind} \"{name}\" referenced by media {media_id} is not in the {kind} vocabulary")]
pub struct UnknownAttribute {
    pub kind: AttributeKind,
    pub name: String,
    pub media_id: i32,
}

/// Produce one junction row per (media, attribute) occurrence.
///
/// The id map is a mandatory input: vocabulary must be transformed before
/// any page is linked.
pub fn link_media_attributes(
    records: &[RawMedia],
    ids: &HashMap<String, i32>,
    kind: AttributeKind,
) -> Result<Vec<MediaAttributeRow>, UnknownAttribute> {
    let mut links = Vec::new();

    for media in records {
        let names: Vec<&str> = match kind {
            AttributeKind::Genre => media.genres.iter().map(String::as_str).collect(),
            AttributeKind::Tag => media.tags.iter().map(|tag| tag.name.as_str()).collect(),
        };

        for name in names {
            let attribute_id = *ids.get(name).ok_or_else(|| UnknownAttribute {
                kind,
                name: name.to_string(),
                media_id: media.id,
            })?;
            links.push(MediaAttributeRow {
                media_id: media.id,
                attribute_id,
            });
        }
    }

    Ok(links)
}
