//! Free-text cleanup for AniList rich-text fields.
//!
//! Descriptions and the odd title arrive with inline HTML markup and
//! entities. The store keeps plain text only.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize a rich-text value into plain storable text.
///
/// `<br>` variants become newlines, remaining markup is stripped, HTML
/// entities are decoded, and whitespace runs are collapsed.
pub fn clean_text(raw: &str) -> String {
    let text = LINE_BREAKS.replace_all(raw, "\n");
    let text = MARKUP.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);
    let text = SPACE_RUNS.replace_all(&text, " ");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}
