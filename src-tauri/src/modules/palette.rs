// Application-wide colors for the browser chrome.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::settings::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// Sent to the chrome as a CSS hex color
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The four palette roles the chrome paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub window: Rgb,
    pub window_text: Rgb,
    pub base: Rgb,
    pub text: Rgb,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        window: Rgb(255, 255, 255),
        window_text: Rgb(0, 0, 0),
        base: Rgb(255, 255, 255),
        text: Rgb(0, 0, 0),
    };

    pub const DARK: Palette = Palette {
        window: Rgb(53, 53, 53),
        window_text: Rgb(255, 255, 255),
        base: Rgb(35, 35, 35),
        text: Rgb(255, 255, 255),
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }
}
