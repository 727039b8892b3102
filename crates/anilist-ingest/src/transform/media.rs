//! Media page normalization.
//!
//! Flattens one page of raw media records into entity rows: code fields are
//! translated through the lookup tables, studios are partitioned into the
//! animation studio and producers, fuzzy dates are validated, and free text
//! is sanitized. Pure and order-preserving, one output row per input record.

use crate::api::types::{RawMedia, RawStudio};
use crate::dates;
use crate::lookup::LookupTables;
use crate::sanitize::clean_text;
use shared::{MediaRow, MediaType};

/// Normalize one page of media records
pub fn transform_media(
    records: &[RawMedia],
    media_type: MediaType,
    lookups: &LookupTables,
) -> Vec<MediaRow> {
    records
        .iter()
        .map(|media| normalize_record(media, media_type, lookups))
        .collect()
}

fn normalize_record(media: &RawMedia, media_type: MediaType, lookups: &LookupTables) -> MediaRow {
    let is_anime = media_type == MediaType::Anime;

    let studios: &[RawStudio] = media
        .studios
        .as_ref()
        .map(|s| s.nodes.as_slice())
        .unwrap_or(&[]);

    // First animation-flagged studio wins; the rest of the flagged ones are
    // dropped. Studios without the flag are producers.
    let animation_studio = studios
        .iter()
        .find(|studio| studio.is_animation_studio)
        .map(|studio| studio.name.clone());
    let producers: Vec<String> = studios
        .iter()
        .filter(|studio| !studio.is_animation_studio)
        .map(|studio| studio.name.clone())
        .collect();

    let trailer_url = media.trailer.as_ref().and_then(|trailer| {
        match (trailer.site.as_deref(), trailer.id.as_deref()) {
            (Some(site), Some(id)) => Some(format!("https://www.{}.com/watch?v={}", site, id)),
            _ => None,
        }
    });

    MediaRow {
        id: media.id,
        romaji_name: clean_optional(media.title.as_ref().and_then(|t| t.romaji.as_deref())),
        english_name: clean_optional(media.title.as_ref().and_then(|t| t.english.as_deref())),
        native_name: clean_optional(media.title.as_ref().and_then(|t| t.native.as_deref())),
        description: clean_optional(media.description.as_deref()),
        cover_image: media.cover_image.as_ref().and_then(|c| c.extra_large.clone()),
        trailer_url,
        episode_duration: if is_anime { media.duration } else { None },
        episode_count: if is_anime { media.episodes } else { None },
        chapter_count: if is_anime { None } else { media.chapters },
        volume_count: if is_anime { None } else { media.volumes },
        start_date: dates::fuzzy_to_iso(media.start_date.as_ref()),
        end_date: dates::fuzzy_to_iso(media.end_date.as_ref()),
        year: media.season_year,
        season: media.season.as_deref().map(|code| lookups.season(code)),
        animation_studio,
        producers: (!producers.is_empty()).then_some(producers),
        format: media.format.as_deref().map(|code| lookups.format(code)),
        source: media.source.as_deref().map(|code| lookups.source(code)),
    }
}

// Empty raw values become null; a non-empty raw value is cleaned and kept
// even when cleaning strips it down to nothing.
fn clean_optional(raw: Option<&str>) -> Option<String> {
    raw.filter(|text| !text.is_empty()).map(clean_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn media(value: serde_json::Value) -> RawMedia {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalizes_a_minimal_anime_record() {
        let records = vec![media(json!({
            "id": 1,
            "title": { "romaji": "Foo", "english": null, "native": null },
            "startDate": { "year": 2020, "month": 1, "day": 1 },
            "endDate": { "year": 0, "month": 0, "day": 0 },
            "format": "TV"
        }))];

        let rows = transform_media(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.id, 1);
        assert_eq!(row.romaji_name.as_deref(), Some("Foo"));
        assert_eq!(row.english_name, None);
        assert_eq!(row.animation_studio, None);
        assert_eq!(row.producers, None);
        assert_eq!(row.start_date.as_deref(), Some("2020-1-1"));
        assert_eq!(row.end_date, None);
        assert_eq!(row.format.as_deref(), Some("TV"));
    }

    #[test]
    fn test_anime_rows_never_carry_manga_fields() {
        let records = vec![media(json!({
            "id": 2,
            "duration": 24,
            "episodes": 12,
            "chapters": 100,
            "volumes": 10
        }))];

        let rows = transform_media(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(rows[0].episode_duration, Some(24));
        assert_eq!(rows[0].episode_count, Some(12));
        assert_eq!(rows[0].chapter_count, None);
        assert_eq!(rows[0].volume_count, None);
    }

    #[test]
    fn test_manga_rows_never_carry_anime_fields() {
        let records = vec![media(json!({
            "id": 3,
            "duration": 24,
            "episodes": 12,
            "chapters": 100,
            "volumes": 10
        }))];

        let rows = transform_media(&records, MediaType::Manga, &LookupTables::new());
        assert_eq!(rows[0].episode_duration, None);
        assert_eq!(rows[0].episode_count, None);
        assert_eq!(rows[0].chapter_count, Some(100));
        assert_eq!(rows[0].volume_count, Some(10));
    }

    #[test]
    fn test_first_flagged_studio_wins() {
        let records = vec![media(json!({
            "id": 4,
            "studios": { "nodes": [
                { "name": "Producer X", "isAnimationStudio": false },
                { "name": "Studio A", "isAnimationStudio": true },
                { "name": "Studio B", "isAnimationStudio": true }
            ]}
        }))];

        let rows = transform_media(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(rows[0].animation_studio.as_deref(), Some("Studio A"));
        assert_eq!(rows[0].producers, Some(vec!["Producer X".to_string()]));
    }

    #[test]
    fn test_trailer_needs_both_site_and_id() {
        let records = vec![
            media(json!({ "id": 5, "trailer": { "id": "abc", "site": "youtube" } })),
            media(json!({ "id": 6, "trailer": { "id": "abc", "site": null } })),
            media(json!({ "id": 7, "trailer": { "id": null, "site": "youtube" } })),
        ];

        let rows = transform_media(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(
            rows[0].trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=abc")
        );
        assert_eq!(rows[1].trailer_url, None);
        assert_eq!(rows[2].trailer_url, None);
    }

    #[test]
    fn test_codes_translate_with_passthrough_fallback() {
        let records = vec![media(json!({
            "id": 8,
            "season": "WINTER",
            "format": "HOLOGRAM",
            "source": "LIGHT_NOVEL"
        }))];

        let rows = transform_media(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(rows[0].season.as_deref(), Some("Winter"));
        assert_eq!(rows[0].format.as_deref(), Some("HOLOGRAM"));
        assert_eq!(rows[0].source.as_deref(), Some("Light Novel"));
    }

    #[test]
    fn test_description_is_sanitized() {
        let records = vec![media(json!({
            "id": 9,
            "description": "<i>Space</i> westerns<br>are &amp; remain cool."
        }))];

        let rows = transform_media(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(
            rows[0].description.as_deref(),
            Some("Space westerns\nare & remain cool.")
        );
    }

    #[test]
    fn test_empty_raw_text_nulls_but_cleaned_empty_is_kept() {
        let records = vec![
            media(json!({ "id": 11, "description": "" })),
            media(json!({ "id": 12, "description": "<br>" })),
        ];

        let rows = transform_media(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(rows[0].description, None);
        assert_eq!(rows[1].description.as_deref(), Some(""));
    }

    #[test]
    fn test_transform_is_idempotent() {
        let records = vec![media(json!({
            "id": 10,
            "title": { "romaji": "Bar", "english": "Bar EN", "native": null },
            "description": "desc",
            "season": "SPRING",
            "seasonYear": 2021,
            "studios": { "nodes": [{ "name": "A", "isAnimationStudio": true }] }
        }))];

        let lookups = LookupTables::new();
        let first = transform_media(&records, MediaType::Anime, &lookups);
        let second = transform_media(&records, MediaType::Anime, &lookups);
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_preserves_input_order() {
        let records = vec![
            media(json!({ "id": 30 })),
            media(json!({ "id": 10 })),
            media(json!({ "id": 20 })),
        ];

        let rows = transform_media(&records, MediaType::Anime, &LookupTables::new());
        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }
}
