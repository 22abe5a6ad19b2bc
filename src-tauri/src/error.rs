use thiserror::Error;

/// Every failure the browser shell can surface.
///
/// Only an absent history file is recovered from (see `history.rs`);
/// everything else bubbles up to the Tauri runtime or back to the chrome.
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        source: url::ParseError,
    },

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Window error: {0}")]
    Window(String),
}

impl From<tauri::Error> for BrowserError {
    fn from(e: tauri::Error) -> Self {
        BrowserError::Window(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;
