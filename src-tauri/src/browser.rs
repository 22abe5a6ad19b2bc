use crate::error::Result;
use crate::history::{History, HistoryBackend};
use crate::modules::dialogs::{HistoryDialog, HistoryOwner, SettingsDialog};
use crate::modules::labels::Labels;
use crate::modules::navigation::{normalize_address, parse_address, RenderingEngine};
use crate::modules::palette::Palette;
use crate::settings::{Settings, SettingsStore, Theme};

/// Window-side effects of applying settings.
pub trait Chrome {
    fn set_palette(&self, theme: Theme, palette: &Palette) -> Result<()>;
    fn set_labels(&self, labels: &Labels) -> Result<()>;
}

/// State owned by the main window: visited history, the settings store and
/// the settings currently in effect.
pub struct Browser<H, S> {
    history: History<H>,
    store: S,
    settings: Settings,
}

impl<H: HistoryBackend, S: SettingsStore> Browser<H, S> {
    /// Loads history and settings. Settings are not applied until
    /// `apply_settings` is called with a chrome to paint.
    pub fn open(history_backend: H, store: S) -> Result<Self> {
        let history = History::load(history_backend)?;
        let settings = Settings::load(&store);
        Ok(Self {
            history,
            store,
            settings,
        })
    }

    /// Normalizes `text`, loads it in the engine and records it.
    /// Returns the address that was loaded.
    pub fn navigate(&mut self, engine: &impl RenderingEngine, text: &str) -> Result<String> {
        let address = normalize_address(text);
        let url = parse_address(&address)?;

        log::info!("[Navigation] Loading {}", address);
        engine.load(&url)?;

        if self.history.add(&address)? {
            log::debug!("[History] Recorded {}", address);
        }
        Ok(address)
    }

    /// Re-reads the store and pushes the result to the chrome.
    pub fn apply_settings(&mut self, chrome: &impl Chrome) -> Result<()> {
        self.settings = Settings::load(&self.store);

        // DNS is informational only; nothing routes name resolution through it.
        log::info!("[Settings] DNS in use: {}", self.settings.dns);

        let theme = self.settings.theme;
        chrome.set_palette(theme, &Palette::for_theme(theme))?;
        chrome.set_labels(Labels::for_language(self.settings.language))?;
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn labels(&self) -> &'static Labels {
        Labels::for_language(self.settings.language)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.settings.theme)
    }

    pub fn history(&self) -> &History<H> {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn settings_dialog(&self) -> SettingsDialog {
        SettingsDialog::open(&self.store)
    }

    pub fn history_dialog(&self) -> HistoryDialog {
        HistoryDialog::new(self.history.entries().to_vec())
    }
}

impl<H: HistoryBackend, S: SettingsStore> HistoryOwner for Browser<H, S> {
    fn clear_history(&mut self) -> Result<()> {
        self.history.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrowserError;
    use crate::history::{JsonHistoryFile, MemoryHistory};
    use crate::settings::{Language, MemorySettings, THEME_KEY};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;
    use url::Url;

    #[derive(Default)]
    struct FakeEngine {
        loaded: RefCell<Vec<String>>,
        fail: bool,
    }

    impl RenderingEngine for FakeEngine {
        fn load(&self, url: &Url) -> Result<()> {
            if self.fail {
                return Err(BrowserError::Engine("load refused".into()));
            }
            self.loaded.borrow_mut().push(url.to_string());
            Ok(())
        }
        fn back(&self) -> Result<()> {
            Ok(())
        }
        fn forward(&self) -> Result<()> {
            Ok(())
        }
        fn reload(&self) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeChrome {
        palettes: RefCell<Vec<Palette>>,
        languages: RefCell<Vec<&'static str>>,
    }

    impl Chrome for FakeChrome {
        fn set_palette(&self, _theme: Theme, palette: &Palette) -> Result<()> {
            self.palettes.borrow_mut().push(*palette);
            Ok(())
        }
        fn set_labels(&self, labels: &Labels) -> Result<()> {
            self.languages.borrow_mut().push(labels.back);
            Ok(())
        }
    }

    fn memory_browser() -> (Browser<MemoryHistory, MemorySettings>, MemoryHistory) {
        let backend = MemoryHistory::new();
        let browser = Browser::open(backend.clone(), MemorySettings::new()).unwrap();
        (browser, backend)
    }

    #[test]
    fn test_navigate_prefixes_scheme_and_records() {
        let (mut browser, backend) = memory_browser();
        let engine = FakeEngine::default();

        let address = browser.navigate(&engine, "example.com").unwrap();

        assert_eq!(address, "http://example.com");
        assert_eq!(*engine.loaded.borrow(), vec!["http://example.com/".to_string()]);
        assert_eq!(backend.saved(), Some(vec!["http://example.com".to_string()]));
    }

    #[test]
    fn test_navigate_keeps_https() {
        let (mut browser, _) = memory_browser();
        let address = browser
            .navigate(&FakeEngine::default(), "https://rust-lang.org")
            .unwrap();
        assert_eq!(address, "https://rust-lang.org");
    }

    #[test]
    fn test_navigate_twice_records_once() {
        let (mut browser, backend) = memory_browser();
        let engine = FakeEngine::default();

        browser.navigate(&engine, "example.com").unwrap();
        browser.navigate(&engine, "http://example.com").unwrap();

        assert_eq!(engine.loaded.borrow().len(), 2);
        assert_eq!(browser.history().len(), 1);
        assert_eq!(backend.save_count(), 1);
    }

    #[test]
    fn test_invalid_address_touches_neither_engine_nor_history() {
        let (mut browser, backend) = memory_browser();
        let engine = FakeEngine::default();

        let err = browser.navigate(&engine, "exa mple.com").unwrap_err();

        assert!(matches!(err, BrowserError::InvalidUrl { .. }));
        assert!(engine.loaded.borrow().is_empty());
        assert!(browser.history().is_empty());
        assert_eq!(backend.save_count(), 0);
    }

    #[test]
    fn test_engine_failure_skips_history() {
        let (mut browser, _) = memory_browser();
        let engine = FakeEngine {
            fail: true,
            ..Default::default()
        };
        assert!(browser.navigate(&engine, "example.com").is_err());
        assert!(browser.history().is_empty());
    }

    #[test]
    fn test_apply_settings_paints_theme_and_language() {
        let store = MemorySettings::new()
            .with_value(THEME_KEY, "dark")
            .with_value("language", "en");
        let mut browser = Browser::open(MemoryHistory::new(), store).unwrap();
        let chrome = FakeChrome::default();

        browser.apply_settings(&chrome).unwrap();

        assert_eq!(*chrome.palettes.borrow(), vec![Palette::DARK]);
        assert_eq!(*chrome.languages.borrow(), vec!["Back"]);
        assert_eq!(browser.settings().theme, Theme::Dark);
    }

    #[test]
    fn test_apply_settings_picks_up_dialog_changes() {
        let (mut browser, _) = memory_browser();
        let chrome = FakeChrome::default();
        browser.apply_settings(&chrome).unwrap();

        let mut dialog = browser.settings_dialog();
        dialog.set_theme(Theme::Dark);
        dialog.set_language(Language::En);
        dialog.confirm(browser.store_mut()).unwrap();

        // Not in effect until re-applied
        assert_eq!(browser.settings().theme, Theme::Light);

        browser.apply_settings(&chrome).unwrap();
        assert_eq!(*chrome.palettes.borrow(), vec![Palette::LIGHT, Palette::DARK]);
        assert_eq!(browser.labels().back, "Back");
    }

    #[test]
    fn test_history_dialog_clear_clears_owner() {
        let (mut browser, backend) = memory_browser();
        let engine = FakeEngine::default();
        browser.navigate(&engine, "a.com").unwrap();
        browser.navigate(&engine, "b.com").unwrap();

        let mut dialog = browser.history_dialog();
        assert_eq!(dialog.items().len(), 2);

        dialog.clear(&mut browser).unwrap();

        assert!(dialog.items().is_empty());
        assert!(browser.history().is_empty());
        assert_eq!(backend.saved(), Some(Vec::new()));
    }

    #[test]
    fn test_history_dialog_not_live_bound() {
        let (mut browser, _) = memory_browser();
        let engine = FakeEngine::default();
        browser.navigate(&engine, "a.com").unwrap();

        let dialog = browser.history_dialog();
        browser.navigate(&engine, "b.com").unwrap();

        assert_eq!(dialog.items().len(), 1);
        assert_eq!(browser.history().len(), 2);
    }

    #[test]
    fn test_history_file_scenario() {
        let dir = tempdir().unwrap();
        let backend = JsonHistoryFile::in_dir(dir.path());
        let path = backend.path().to_path_buf();
        let mut browser = Browser::open(backend, MemorySettings::new()).unwrap();
        let engine = FakeEngine::default();

        assert!(!path.exists());

        browser.navigate(&engine, "example.com").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"["http://example.com"]"#);

        browser.navigate(&engine, "http://example.com").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"["http://example.com"]"#);

        browser.clear_history().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_open_surfaces_malformed_history() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("history.json"), "not json").unwrap();
        let result = Browser::open(JsonHistoryFile::in_dir(dir.path()), MemorySettings::new());
        assert!(result.is_err());
    }
}
