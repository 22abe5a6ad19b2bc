use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Result;

pub const SETTINGS_FILE: &str = "settings.json";

pub const DNS_KEY: &str = "dns";
pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";

pub const DEFAULT_DNS: &str = "8.8.8.8";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ru" => Ok(Self::Ru),
            "en" => Ok(Self::En),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Persistent string key/value store the settings are read from by name.
pub trait SettingsStore {
    fn value(&self, key: &str) -> Option<String>;

    /// Writes every pair and persists them together.
    fn set_values(&mut self, values: &[(&str, &str)]) -> Result<()>;
}

/// Key/value store kept as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonSettingsFile {
    /// Reads the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// `settings.json` inside the given app config directory.
    pub fn open_in_dir(app_config_dir: &Path) -> Result<Self> {
        Self::open(app_config_dir.join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;

        // Atomic write: tmp + rename
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettingsFile {
    fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_values(&mut self, values: &[(&str, &str)]) -> Result<()> {
        for (key, value) in values {
            self.values.insert(key.to_string(), value.to_string());
        }
        self.persist()
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl SettingsStore for MemorySettings {
    fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_values(&mut self, values: &[(&str, &str)]) -> Result<()> {
        for (key, value) in values {
            self.values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub dns: String,
    pub language: Language,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dns: DEFAULT_DNS.to_string(),
            language: Language::default(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Reads all three keys, falling back to the default for anything unset
    /// or unrecognized.
    pub fn load(store: &impl SettingsStore) -> Self {
        let dns = store.value(DNS_KEY).unwrap_or_else(|| DEFAULT_DNS.to_string());
        let language = store
            .value(LANGUAGE_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let theme = store
            .value(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self { dns, language, theme }
    }

    /// Writes all three keys in a single store write.
    pub fn save(&self, store: &mut impl SettingsStore) -> Result<()> {
        store.set_values(&[
            (DNS_KEY, self.dns.as_str()),
            (LANGUAGE_KEY, self.language.code()),
            (THEME_KEY, self.theme.code()),
        ])
    }
}
