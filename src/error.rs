use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported page: {url} (expected prefix {endpoint})")]
    UnsupportedPage { url: String, endpoint: String },
    #[error("HTTP error: status {0}")]
    Http(u16),
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Could not read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed song list in {}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization failed: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
