//! Static code tables for AniList enumeration values.
//!
//! Translates upstream season/format/source/relation codes into the display
//! vocabulary stored in the catalog. Unknown codes pass through unchanged so
//! new upstream values degrade gracefully instead of failing the run.

use std::collections::HashMap;

/// Immutable code tables, built once per run and injected into the
/// transformers.
pub struct LookupTables {
    seasons: HashMap<&'static str, &'static str>,
    formats: HashMap<&'static str, &'static str>,
    sources: HashMap<&'static str, &'static str>,
    relations: HashMap<&'static str, &'static str>,
}

impl LookupTables {
    pub fn new() -> Self {
        Self {
            seasons: HashMap::from([
                ("WINTER", "Winter"),
                ("SPRING", "Spring"),
                ("SUMMER", "Summer"),
                ("FALL", "Fall"),
            ]),
            formats: HashMap::from([
                ("TV", "TV"),
                ("TV_SHORT", "TV Short"),
                ("MOVIE", "Movie"),
                ("SPECIAL", "Special"),
                ("OVA", "OVA"),
                ("ONA", "ONA"),
                ("MUSIC", "Music"),
                ("MANGA", "Manga"),
                ("NOVEL", "Light Novel"),
                ("ONE_SHOT", "One Shot"),
            ]),
            sources: HashMap::from([
                ("ORIGINAL", "Original"),
                ("MANGA", "Manga"),
                ("LIGHT_NOVEL", "Light Novel"),
                ("VISUAL_NOVEL", "Visual Novel"),
                ("VIDEO_GAME", "Video Game"),
                ("OTHER", "Other"),
                ("NOVEL", "Novel"),
                ("DOUJINSHI", "Doujinshi"),
                ("ANIME", "Anime"),
                ("WEB_NOVEL", "Web Novel"),
                ("LIVE_ACTION", "Live Action"),
                ("GAME", "Game"),
                ("COMIC", "Comic"),
                ("MULTIMEDIA_PROJECT", "Multimedia Project"),
                ("PICTURE_BOOK", "Picture Book"),
            ]),
            relations: HashMap::from([
                ("ADAPTATION", "Adaptation"),
                ("PREQUEL", "Prequel"),
                ("SEQUEL", "Sequel"),
                ("PARENT", "Parent"),
                ("SIDE_STORY", "Side Story"),
                ("CHARACTER", "Character"),
                ("SUMMARY", "Summary"),
                ("ALTERNATIVE", "Alternative"),
                ("SPIN_OFF", "Spin Off"),
                ("OTHER", "Other"),
                ("SOURCE", "Source"),
                ("COMPILATION", "Compilation"),
                ("CONTAINS", "Contains"),
            ]),
        }
    }

    /// Translate a season code
    pub fn season(&self, code: &str) -> String {
        resolve(&self.seasons, code)
    }

    /// Translate a format code
    pub fn format(&self, code: &str) -> String {
        resolve(&self.formats, code)
    }

    /// Translate a source code
    pub fn source(&self, code: &str) -> String {
        resolve(&self.sources, code)
    }

    /// Translate a relation-type code
    pub fn relation(&self, code: &str) -> String {
        resolve(&self.relations, code)
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(table: &HashMap<&'static str, &'static str>, code: &str) -> String {
    table
        .get(code)
        .map(|label| (*label).to_string())
        .unwrap_or_else(|| code.to_string())
}
