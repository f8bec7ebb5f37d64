use serde::{Deserialize, Serialize};

/// A song entry found on a listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct SongLink {
    pub title: String,
    pub url: String,
}

/// Metadata scraped from one song detail page.
///
/// Keys serialize in camelCase (`titleEn`, `createdTime`, ...), which is the
/// shape of `result.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfo {
    pub title: String,
    /// Reading of the title as printed on the page.
    pub title_en: String,
    /// Character names.
    pub subtitle: String,
    /// Voice actor names.
    pub subtitle_en: String,
    pub author: String,
    pub author_en: String,
    /// Seconds.
    pub length: i64,
    pub bpm: i64,
    /// Unix seconds.
    pub created_time: i64,
    pub updated_time: i64,
    pub description: String,
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
