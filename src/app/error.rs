use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Ledger at {path} is unreadable: {source}")]
    LedgerCorrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error("Story not found: {0}")]
    StoryNotFound(String),

    #[error("Story source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl StoryError {
    pub fn corrupt(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::LedgerCorrupt {
            path: path.into(),
            source,
        }
    }

    /// True when the ledger file exists but could not be decoded.
    pub fn is_corrupt_ledger(&self) -> bool {
        matches!(self, Self::LedgerCorrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;
