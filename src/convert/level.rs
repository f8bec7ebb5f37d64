use serde::{Deserialize, Serialize};

/// Fixture model tag of every exported record.
pub const LEVEL_MODEL: &str = "src.database.objects.level.Level";

/// One level row of the fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: usize,
    /// Display id.
    pub name: String,
    pub user_id: i64,
    pub created_time: i64,
    pub updated_time: i64,
    pub title: String,
    pub title_en: String,
    pub subtitle: String,
    pub subtitle_en: String,
    pub author: String,
    pub author_en: String,
    pub description: String,
    pub description_en: String,
    pub public: bool,
    pub is_deleted: bool,
    pub rating: i64,
    pub bpm: i64,
    pub notes: i64,
    pub length: i64,
    pub cover: String,
    pub bgm: String,
    pub data: String,
    pub engine_id: i64,
    pub genre_id: i64,
    pub public_sus: bool,
}

/// `{model, id, fields}` fixture wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelExport {
    pub model: String,
    pub id: usize,
    pub fields: Level,
}

impl LevelExport {
    pub fn new(fields: Level) -> Self {
        Self {
            model: LEVEL_MODEL.to_string(),
            id: fields.id,
            fields,
        }
    }
}
