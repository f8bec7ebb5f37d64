use crate::error::Result;
use crate::fetch::{Fetch, SelectAll, resolve_href};

/// Lyrics source consulted for song descriptions.
pub trait LyricsLookup {
    /// URL of the first lyrics page matching `title`, if any.
    fn search(&self, title: &str) -> Result<Option<String>>;

    /// Lyric body of a page returned by [`LyricsLookup::search`].
    fn lyrics(&self, url: &str) -> Result<String>;
}

/// Lyrics lookup against lyric.evesta.jp.
pub struct EvestaLyrics<'a> {
    fetcher: &'a dyn Fetch,
}

impl<'a> EvestaLyrics<'a> {
    pub const ENDPOINT: &'static str = "https://lyric.evesta.jp/";
    const SEARCH_URL: &'static str = "https://lyric.evesta.jp/search.php/";

    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self { fetcher }
    }
}

impl LyricsLookup for EvestaLyrics<'_> {
    fn search(&self, title: &str) -> Result<Option<String>> {
        let params = [
            ("kind", "title"),
            ("keyword", title),
            ("how", "2"),
            ("do", "検索"),
        ];
        let page = self.fetcher.fetch(Self::SEARCH_URL, &params)?;
        let hit = page
            .select_all("a[class='title']")?
            .into_iter()
            .find_map(|a| a.attr("href").map(|href| resolve_href(Self::ENDPOINT, href)));
        if hit.is_none() {
            log::debug!("No lyrics found for {title}");
        }
        Ok(hit)
    }

    fn lyrics(&self, url: &str) -> Result<String> {
        let page = self.fetcher.fetch(url, &[])?;
        let lines: Vec<String> = page
            .select_all("div[id='lyricbody']")?
            .into_iter()
            .flat_map(|body| body.own_text)
            .map(|line| line.trim().replace('\u{3000}', " "))
            .collect();
        Ok(lines.join("\n"))
    }
}
