//! Parsers for the localized strings on song detail pages.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate, TimeZone};
use regex::Regex;

use crate::error::{Error, Result};

/// Fallback appearance date when a song has too little event history.
pub const DEFAULT_DATE: &str = "2022/02/19";

/// Fallback tempo for a missing or non-numeric BPM cell.
pub const DEFAULT_BPM: i64 = 100;

/// Minimum appearance entries needed to trust the first/last dates.
const MIN_APPEARANCES: usize = 3;

/// "3分05秒" style durations, ASCII or full-width digits.
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9０-９]{1,2})分([0-9０-９]{1,2})秒").unwrap());

/// `X分Y秒` → `X * 60 + Y`; anything else → 0.
pub fn parse_duration(text: &str) -> i64 {
    let Some(caps) = DURATION_RE.captures(text) else {
        return 0;
    };
    match (parse_decimal(&caps[1]), parse_decimal(&caps[2])) {
        (Some(minutes), Some(seconds)) => minutes * 60 + seconds,
        _ => 0,
    }
}

/// Decimal-only text → its value; anything else → [`DEFAULT_BPM`].
pub fn parse_bpm(text: &str) -> i64 {
    parse_decimal(text).unwrap_or(DEFAULT_BPM)
}

/// Value of a non-empty run of ASCII or full-width digits.
fn parse_decimal(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    text.chars().try_fold(0i64, |value, c| {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '\u{FF10}'..='\u{FF19}' => c as u32 - '\u{FF10}' as u32,
            _ => return None,
        };
        value.checked_mul(10)?.checked_add(digit as i64)
    })
}

/// `YYYY/MM/DD` → Unix seconds at local midnight.
pub fn parse_date(text: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y/%m/%d")
        .map_err(|e| Error::Parse(format!("bad date {text:?}: {e}")))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::Parse(format!("bad date {text:?}")))?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| Error::Parse(format!("no local midnight on {text}")))
}

/// Date part of each appearance entry, empties dropped.
///
/// Entries look like `2023/05/01(event name)`.
pub fn appearance_dates<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|entry| {
            let date = entry
                .as_ref()
                .trim()
                .split('(')
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            (!date.is_empty()).then_some(date)
        })
        .collect()
}

/// `(created, updated)` from appearance dates listed newest first.
///
/// With fewer than three entries both fall back to [`DEFAULT_DATE`].
pub fn appearance_window(dates: &[String]) -> Result<(i64, i64)> {
    if dates.len() < MIN_APPEARANCES {
        let fallback = parse_date(DEFAULT_DATE)?;
        return Ok((fallback, fallback));
    }
    let created = parse_date(&dates[dates.len() - 1])?;
    let updated = parse_date(&dates[0])?;
    Ok((created, updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_midnight(y: i32, m: u32, d: u32) -> i64 {
        Local.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap().timestamp()
    }

    #[test]
    fn test_duration_minutes_seconds() {
        assert_eq!(parse_duration("3分5秒"), 185);
        assert_eq!(parse_duration("4分32秒"), 272);
        assert_eq!(parse_duration("約 10分00秒 "), 600);
    }

    #[test]
    fn test_duration_full_width_digits() {
        assert_eq!(parse_duration("３分５秒"), 185);
        assert_eq!(parse_duration("１２分3秒"), 723);
    }

    #[test]
    fn test_duration_no_match() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("3:05"), 0);
        assert_eq!(parse_duration("不明"), 0);
        assert_eq!(parse_duration("٣分٥秒"), 0);
    }

    #[test]
    fn test_bpm_decimal() {
        assert_eq!(parse_bpm("132"), 132);
        assert_eq!(parse_bpm("０９５"), 95);
        assert_eq!(parse_bpm("１３２"), 132);
    }

    #[test]
    fn test_bpm_fallback() {
        assert_eq!(parse_bpm(""), 100);
        assert_eq!(parse_bpm("-"), 100);
        assert_eq!(parse_bpm("120.5"), 100);
        assert_eq!(parse_bpm("約120"), 100);
        assert_eq!(parse_bpm("99999999999999999999999"), 100);
        // other decimal scripts are not read
        assert_eq!(parse_bpm("١٢٠"), 100);
    }

    #[test]
    fn test_date_is_local_midnight() {
        assert_eq!(parse_date("2022/02/19").unwrap(), local_midnight(2022, 2, 19));
        assert_eq!(parse_date("2021/06/15").unwrap(), local_midnight(2021, 6, 15));
    }

    #[test]
    fn test_date_invalid() {
        assert!(matches!(parse_date("2022-02-19"), Err(Error::Parse(_))));
        assert!(matches!(parse_date("2022/13/01"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_appearance_dates_strip_event_names() {
        let raw = ["2023/05/01(x)", "  ", "(no date)", "2021/06/15 (z)"];
        assert_eq!(appearance_dates(raw), vec!["2023/05/01", "2021/06/15"]);
    }

    #[test]
    fn test_appearance_window_newest_first() {
        let dates = appearance_dates(["2023/05/01(x)", "2022/01/10(y)", "2021/06/15(z)"]);
        let (created, updated) = appearance_window(&dates).unwrap();
        assert_eq!(created, local_midnight(2021, 6, 15));
        assert_eq!(updated, local_midnight(2023, 5, 1));
    }

    #[test]
    fn test_appearance_window_fallback() {
        let fallback = local_midnight(2022, 2, 19);
        assert_eq!(appearance_window(&[]).unwrap(), (fallback, fallback));
        let two = vec!["2023/05/01".to_string(), "2021/06/15".to_string()];
        assert_eq!(appearance_window(&two).unwrap(), (fallback, fallback));
    }
}
