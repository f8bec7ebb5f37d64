//! Phonetic transliteration of Japanese text.

/// Converts Japanese text to readings and romaji.
pub trait Transliterator {
    /// Romaji rendering of the whole text.
    fn romanize(&self, text: &str) -> String;

    /// Hiragana reading of a single segment.
    fn reading(&self, segment: &str) -> String;

    /// Readings of each script run, joined by single spaces.
    fn phonetic(&self, text: &str) -> String {
        script_runs(text)
            .iter()
            .map(|run| self.reading(run))
            .filter(|r| !r.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Dictionary-backed converter using the `kakasi` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Kakasi;

impl Kakasi {
    pub fn new() -> Self {
        Self
    }
}

impl Transliterator for Kakasi {
    fn romanize(&self, text: &str) -> String {
        kakasi::convert(text).romaji
    }

    fn reading(&self, segment: &str) -> String {
        kakasi::convert(segment).hiragana
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Kanji,
    Hiragana,
    Katakana,
    Alnum,
    Space,
    Other,
}

fn script_of(c: char) -> Script {
    match c {
        '\u{3005}'
        | '\u{3007}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}' => Script::Kanji,
        '\u{3041}'..='\u{309F}' => Script::Hiragana,
        '\u{30A0}'..='\u{30FF}' | '\u{FF66}'..='\u{FF9F}' => Script::Katakana,
        c if c.is_whitespace() => Script::Space,
        c if c.is_alphanumeric() => Script::Alnum,
        _ => Script::Other,
    }
}

/// Split text into runs of one script, dropping whitespace.
///
/// Hiragana directly after kanji stays in the kanji run (okurigana), and the
/// long-vowel mark `ー` extends whichever kana run it follows.
pub fn script_runs(text: &str) -> Vec<String> {
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_script: Option<Script> = None;

    for c in text.chars() {
        let mut script = script_of(c);
        if c == 'ー' && matches!(current_script, Some(Script::Hiragana | Script::Kanji)) {
            script = current_script.unwrap_or(script);
        }

        let continues = match (current_script, script) {
            (Some(Script::Other), Script::Other) => false,
            (Some(Script::Kanji), Script::Hiragana) => true,
            (Some(prev), next) => prev == next,
            (None, _) => false,
        };

        if continues {
            current.push(c);
            continue;
        }

        if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
        if script == Script::Space {
            current_script = None;
        } else {
            current.push(c);
            current_script = Some(script);
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
