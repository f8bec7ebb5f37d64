use crate::error::{Error, Result};
use crate::fetch::{Element, Fetch, SelectAll, ensure_supported, resolve_href};
use crate::models::{SongInfo, SongLink, truncate_chars};
use crate::scrape::lyrics::LyricsLookup;
use crate::scrape::parse::{
    appearance_dates, appearance_window, parse_bpm, parse_duration,
};

/// Maximum description length kept from a lyrics page, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 510;

const SONG_LINK: &str = "a[class='list-group-item list-group-item-action']";
const TITLE: &str = "h1[class='border-bottom pb-1 mb-0']";
const TITLE_READING: &str = "span[class='small']";
const CHARACTERS: &str = "h5[class='card-title mb-2']";
const VOICE_ACTORS: &str = "h6[class='card-subtitle mb-1 text-muted']";
const CREDITS: &str = "div[class='d-inline-block'] > a";
const LENGTH_AND_BPM: &str = "dd[class='col-4 col-lg-2']";
const APPEARANCES: &str = "span[class='d-none d-md-inline font-weight-bold']";

/// Scraper for the gochiusa.info song database.
pub struct SongDb<'a> {
    fetcher: &'a dyn Fetch,
    lyrics: Option<&'a dyn LyricsLookup>,
}

impl<'a> SongDb<'a> {
    pub const ENDPOINT: &'static str = "https://gochiusa.info/";

    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self {
            fetcher,
            lyrics: None,
        }
    }

    /// Fill descriptions from `lyrics` when a match is found.
    pub fn with_lyrics(mut self, lyrics: &'a dyn LyricsLookup) -> Self {
        self.lyrics = Some(lyrics);
        self
    }

    /// Songs on a listing page such as `https://gochiusa.info/artist/2`, in page order.
    pub fn list_songs(&self, listing_url: &str) -> Result<Vec<SongLink>> {
        ensure_supported(listing_url, Self::ENDPOINT)?;
        let page = self.fetcher.fetch(listing_url, &[])?;
        extract_song_links(&page)
    }

    /// Metadata for one detail page.
    pub fn song_info(&self, detail_url: &str) -> Result<SongInfo> {
        ensure_supported(detail_url, Self::ENDPOINT)?;
        let page = self.fetcher.fetch(detail_url, &[])?;
        let mut song = extract_song_info(&page)?;
        log::info!("{}", song.title);

        if let Some(lyrics) = self.lyrics {
            if let Some(url) = lyrics.search(&song.title)? {
                song.description = lyrics.lyrics(&url)?;
            }
        }
        song.description = truncate_chars(&song.description, MAX_DESCRIPTION_CHARS);
        Ok(song)
    }
}

pub fn extract_song_links(page: &dyn SelectAll) -> Result<Vec<SongLink>> {
    page.select_all(SONG_LINK)?
        .into_iter()
        .map(|el| {
            let href = el
                .attr("href")
                .ok_or_else(|| Error::Parse("song link without href".to_string()))?;
            Ok(SongLink {
                title: el.leading_text.trim().to_string(),
                url: resolve_href(SongDb::ENDPOINT, href),
            })
        })
        .collect()
}

/// Everything on a detail page except the description.
pub fn extract_song_info(page: &dyn SelectAll) -> Result<SongInfo> {
    let title = page.select_first(TITLE, "song title")?.leading_text.trim().to_string();
    let title_en = page
        .select_first(TITLE_READING, "title reading")?
        .leading_text
        .trim()
        .to_string();

    let subtitle = joined(&page.select_all(CHARACTERS)?);
    let subtitle_en = joined(&page.select_all(VOICE_ACTORS)?);
    // Only one credit line exists, so both fields share it.
    let author = joined(&page.select_all(CREDITS)?);
    let author_en = author.clone();

    let cells: Vec<String> = page
        .select_all(LENGTH_AND_BPM)?
        .iter()
        .map(|el| el.leading_text.trim().to_string())
        .collect();
    let [length_text, bpm_text, ..] = cells.as_slice() else {
        return Err(Error::Parse(format!(
            "expected length and bpm cells, found {}",
            cells.len()
        )));
    };

    let raw_appearances: Vec<String> = page
        .select_all(APPEARANCES)?
        .into_iter()
        .flat_map(|el| el.own_text)
        .collect();
    let (created_time, updated_time) = appearance_window(&appearance_dates(&raw_appearances))?;

    Ok(SongInfo {
        title,
        title_en,
        subtitle,
        subtitle_en,
        author,
        author_en,
        length: parse_duration(length_text),
        bpm: parse_bpm(bpm_text),
        created_time,
        updated_time,
        description: String::new(),
    })
}

fn joined(elements: &[Element]) -> String {
    elements
        .iter()
        .map(|el| el.leading_text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}
