pub mod level;
pub mod translit;

use std::path::Path;

use crate::error::Result;
use crate::models::{SongInfo, truncate_chars};
use crate::random::RandomSource;
use crate::store;

pub use level::{LEVEL_MODEL, Level, LevelExport};
pub use translit::{Kakasi, Transliterator};

/// Cover placeholder; the raw title is appended as-is.
pub const COVER_URL_PREFIX: &str = "https://placehold.jp/32/3d4070/ffffff/300x300.png?text=";
pub const BGM_URL: &str = "https://cdn.purplepalette.net/file/potato-test/LevelBgm/more_one_night.mp3";
pub const DATA_PLACEHOLDER: &str = "dummy";

/// Owner, engine and genre of every generated level.
const FIXED_FOREIGN_ID: i64 = 1;

pub const RATING_RANGE: (i64, i64) = (1, 50);
pub const NOTES_RANGE: (i64, i64) = (100, 1000);

/// Maximum length of transliterated fields, in characters.
pub const MAX_TRANSLIT_CHARS: usize = 500;

/// Maps scraped songs to level fixtures.
pub struct BatchConverter<R: RandomSource, T: Transliterator> {
    translit: T,
    random: R,
}

impl<R: RandomSource, T: Transliterator> BatchConverter<R, T> {
    pub fn with_parts(translit: T, random: R) -> Self {
        Self { translit, random }
    }

    /// Level for the song at input position `id`.
    pub fn to_level(&self, id: usize, song: &SongInfo) -> Level {
        Level {
            id,
            name: self.translit.romanize(&song.title_en),
            user_id: FIXED_FOREIGN_ID,
            created_time: song.created_time,
            updated_time: song.updated_time,
            title: song.title.clone(),
            title_en: song.title_en.clone(),
            subtitle: song.subtitle.clone(),
            subtitle_en: song.subtitle_en.clone(),
            author: song.author.clone(),
            author_en: truncate_chars(
                &self.translit.phonetic(&song.author_en),
                MAX_TRANSLIT_CHARS,
            ),
            description: song.description.clone(),
            description_en: truncate_chars(
                &self.translit.phonetic(&song.description),
                MAX_TRANSLIT_CHARS,
            ),
            public: true,
            is_deleted: false,
            rating: self.random.next_int(RATING_RANGE.0, RATING_RANGE.1),
            bpm: song.bpm,
            notes: self.random.next_int(NOTES_RANGE.0, NOTES_RANGE.1),
            length: song.length,
            cover: format!("{COVER_URL_PREFIX}{}", song.title),
            bgm: BGM_URL.to_string(),
            data: DATA_PLACEHOLDER.to_string(),
            engine_id: FIXED_FOREIGN_ID,
            genre_id: FIXED_FOREIGN_ID,
            public_sus: false,
        }
    }

    /// Ids follow input positions, starting at 0.
    pub fn convert_songs(&self, songs: &[SongInfo]) -> Vec<LevelExport> {
        songs
            .iter()
            .enumerate()
            .map(|(i, song)| LevelExport::new(self.to_level(i, song)))
            .collect()
    }

    /// Convert a `result.json` song list into a YAML fixture file.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<usize> {
        let songs = store::read_json(input)?;
        log::info!("Read {} songs from {}", songs.len(), input.display());
        let records = self.convert_songs(&songs);
        store::write_yaml(output, &records)?;
        Ok(records.len())
    }
}
