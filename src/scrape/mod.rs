pub mod lyrics;
pub mod parse;
pub mod songdb;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::models::SongInfo;

pub use lyrics::{EvestaLyrics, LyricsLookup};
pub use songdb::SongDb;

/// Scrape every song on a listing page, in listing order.
///
/// The first failing song aborts the run and discards everything collected so far.
pub fn harvest(db: &SongDb<'_>, listing_url: &str) -> Result<Vec<SongInfo>> {
    let links = db.list_songs(listing_url)?;
    log::info!("Found {} songs on {listing_url}", links.len());

    let pb = ProgressBar::new(links.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} songs ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );

    let mut songs = Vec::with_capacity(links.len());
    for link in &links {
        pb.set_message(link.title.clone());
        match db.song_info(&link.url) {
            Ok(song) => songs.push(song),
            Err(e) => {
                pb.abandon_with_message(format!("failed on {}", link.url));
                return Err(e);
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("done");
    Ok(songs)
}
