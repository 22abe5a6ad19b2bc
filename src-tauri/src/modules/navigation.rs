// Pure navigation logic - no Tauri imports allowed.
// URL normalization and the engine seam live here so they can be unit tested.

use url::Url;

use crate::error::{BrowserError, Result};

/// Where the content webview starts.
pub const HOME_URL: &str = "https://www.google.com";

/// Turns URL-bar text into the address that is loaded and recorded.
///
/// Anything not already starting with `http://` or `https://` gets `http://`
/// prepended. The text is otherwise left exactly as typed; no trimming,
/// lowercasing or search fallback happens here.
pub fn normalize_address(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}

/// Parses a normalized address into something the engine can load.
pub fn parse_address(address: &str) -> Result<Url> {
    Url::parse(address).map_err(|source| BrowserError::InvalidUrl {
        input: address.to_string(),
        source,
    })
}

/// The embedded rendering engine, as seen by the browser core.
///
/// Back, forward and reload are plain forwards; the engine keeps its own
/// session history.
pub trait RenderingEngine {
    fn load(&self, url: &Url) -> Result<()>;
    fn back(&self) -> Result<()>;
    fn forward(&self) -> Result<()>;
    fn reload(&self) -> Result<()>;
}
