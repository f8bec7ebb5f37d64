//! Whole-file JSON and YAML persistence.
//!
//! Every writer serializes fully before touching the target, so a failed run
//! leaves the previous file in place.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::convert::LevelExport;
use crate::error::{Error, Result};
use crate::models::SongInfo;

/// Pretty JSON with 4-space indentation; non-ASCII stays literal.
pub fn write_json(path: &Path, songs: &[SongInfo]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    songs
        .serialize(&mut ser)
        .map_err(|e| Error::Encode(e.to_string()))?;
    write_file(path, &buf)
}

pub fn read_json(path: &Path) -> Result<Vec<SongInfo>> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| Error::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_yaml(path: &Path, records: &[LevelExport]) -> Result<()> {
    let yaml = serde_yaml::to_string(records).map_err(|e| Error::Encode(e.to_string()))?;
    write_file(path, yaml.as_bytes())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SongInfo {
        SongInfo {
            title: "天空カフェテリア".into(),
            title_en: "てんくうかふぇてりあ".into(),
            length: 250,
            bpm: 140,
            ..Default::default()
        }
    }

    #[test]
    fn test_json_is_indented_and_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_json(&path, &[sample()]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("天空カフェテリア"));
        assert!(!text.contains("\\u"));
        assert!(text.contains("\n        \"title\""));
        assert_eq!(read_json(&path).unwrap(), vec![sample()]);
    }

    #[test]
    fn test_json_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_json(&path, &[sample(), sample()]).unwrap();
        write_json(&path, &[]).unwrap();
        assert!(read_json(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_json_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        fs::write(&path, r#"{"title": "x"}"#).unwrap();
        assert!(matches!(read_json(&path), Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_write_into_missing_dir_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/result.yaml");
        assert!(matches!(write_yaml(&path, &[]), Err(Error::Write { .. })));
    }
}
