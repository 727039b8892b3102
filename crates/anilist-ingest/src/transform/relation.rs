//! Relation edge normalization.
//!
//! Every edge becomes one row with direction-aware typed foreign keys: the
//! source media id lands in `anime_id` or `manga_id` and the target id in
//! `related_anime_id` or `related_manga_id`, per the declared type of each
//! side.

use crate::api::types::RawMedia;
use crate::lookup::LookupTables;
use shared::{MediaType, RelatedMediaRow};
use tracing::warn;

/// Normalize the relation edges of one page of media records
pub fn transform_relations(
    records: &[RawMedia],
    media_type: MediaType,
    lookups: &LookupTables,
) -> Vec<RelatedMediaRow> {
    let mut rows = Vec::new();

    for media in records {
        let Some(relations) = media.relations.as_ref() else {
            continue;
        };

        for edge in &relations.edges {
            let (related_anime_id, related_manga_id) = match edge.node.media_type.as_deref() {
                Some("ANIME") => (Some(edge.node.id), None),
                Some("MANGA") => (None, Some(edge.node.id)),
                other => {
                    warn!(
                        media_id = media.id,
                        node_id = edge.node.id,
                        node_type = ?other,
                        "Skipping relation edge with unrecognized node type"
                    );
                    continue;
                }
            };

            rows.push(RelatedMediaRow {
                anime_id: (media_type == MediaType::Anime).then_some(media.id),
                manga_id: (media_type == MediaType::Manga).then_some(media.id),
                related_anime_id,
                related_manga_id,
                relation_type: edge
                    .relation_type
                    .as_deref()
                    .map(|code| lookups.relation(code)),
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn media(value: serde_json::Value) -> RawMedia {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_anime_source_sets_anime_side_only() {
        let records = vec![media(json!({
            "id": 1,
            "relations": { "edges": [
                { "relationType": "SEQUEL", "node": { "id": 2, "type": "ANIME" } },
                { "relationType": "ADAPTATION", "node": { "id": 3, "type": "MANGA" } }
            ]}
        }))];

        let rows = transform_relations(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].anime_id, Some(1));
        assert_eq!(rows[0].manga_id, None);
        assert_eq!(rows[0].related_anime_id, Some(2));
        assert_eq!(rows[0].related_manga_id, None);
        assert_eq!(rows[0].relation_type.as_deref(), Some("Sequel"));

        assert_eq!(rows[1].related_anime_id, None);
        assert_eq!(rows[1].related_manga_id, Some(3));
        assert_eq!(rows[1].relation_type.as_deref(), Some("Adaptation"));
    }

    #[test]
    fn test_manga_source_sets_manga_side_only() {
        let records = vec![media(json!({
            "id": 5,
            "relations": { "edges": [
                { "relationType": "SOURCE", "node": { "id": 6, "type": "ANIME" } }
            ]}
        }))];

        let rows = transform_relations(&records, MediaType::Manga, &LookupTables::new());
        assert_eq!(rows[0].anime_id, None);
        assert_eq!(rows[0].manga_id, Some(5));
    }

    #[test]
    fn test_every_row_has_exactly_one_side_each() {
        let records = vec![media(json!({
            "id": 1,
            "relations": { "edges": [
                { "relationType": "SEQUEL", "node": { "id": 2, "type": "ANIME" } },
                { "relationType": "ADAPTATION", "node": { "id": 3, "type": "MANGA" } },
                { "relationType": "CHARACTER", "node": { "id": 4, "type": "ANIME" } }
            ]}
        }))];

        for media_type in [MediaType::Anime, MediaType::Manga] {
            let rows = transform_relations(&records, media_type, &LookupTables::new());
            for row in rows {
                assert!(row.anime_id.is_some() != row.manga_id.is_some());
                assert!(row.related_anime_id.is_some() != row.related_manga_id.is_some());
            }
        }
    }

    #[test]
    fn test_unknown_relation_code_passes_through() {
        let records = vec![media(json!({
            "id": 1,
            "relations": { "edges": [
                { "relationType": "REMASTER", "node": { "id": 2, "type": "ANIME" } }
            ]}
        }))];

        let rows = transform_relations(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(rows[0].relation_type.as_deref(), Some("REMASTER"));
    }

    #[test]
    fn test_unrecognized_node_type_is_skipped() {
        let records = vec![media(json!({
            "id": 1,
            "relations": { "edges": [
                { "relationType": "OTHER", "node": { "id": 2, "type": "CHARACTER" } },
                { "relationType": "SEQUEL", "node": { "id": 3, "type": "ANIME" } }
            ]}
        }))];

        let rows = transform_relations(&records, MediaType::Anime, &LookupTables::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].related_anime_id, Some(3));
    }

    #[test]
    fn test_records_without_relations_produce_nothing() {
        let records = vec![media(json!({ "id": 1 }))];
        let rows = transform_relations(&records, MediaType::Anime, &LookupTables::new());
        assert!(rows.is_empty());
    }
}
