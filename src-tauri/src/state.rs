// Shared state held in Tauri's managed state.
// Kept free of Tauri imports so it can be constructed in tests.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::browser::Browser;
use crate::error::Result;
use crate::history::JsonHistoryFile;
use crate::modules::dialogs::{HistoryDialog, SettingsDialog};
use crate::settings::JsonSettingsFile;

pub type DesktopBrowser = Browser<JsonHistoryFile, JsonSettingsFile>;

/// Tauri dispatches commands off the main thread, so every piece sits behind
/// its own lock. Lock order when more than one is needed: dialog, then browser.
pub struct AppState {
    pub browser: Mutex<DesktopBrowser>,
    /// Open settings dialog, if any.
    pub settings_dialog: Mutex<Option<SettingsDialog>>,
    /// Open history dialog, if any.
    pub history_dialog: Mutex<Option<HistoryDialog>>,
}

impl AppState {
    pub fn new(browser: DesktopBrowser) -> Self {
        Self {
            browser: Mutex::new(browser),
            settings_dialog: Mutex::new(None),
            history_dialog: Mutex::new(None),
        }
    }

    /// Loads history from `app_data_dir` and settings from `app_config_dir`.
    pub fn load(app_data_dir: &Path, app_config_dir: &Path) -> Result<Self> {
        let history = JsonHistoryFile::in_dir(app_data_dir);
        let store = JsonSettingsFile::open_in_dir(app_config_dir)?;
        Ok(Self::new(Browser::open(history, store)?))
    }

    pub fn browser(&self) -> MutexGuard<'_, DesktopBrowser> {
        // Handlers never leave the browser half-updated, so a poisoned lock is still usable.
        self.browser.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn settings_dialog(&self) -> MutexGuard<'_, Option<SettingsDialog>> {
        self.settings_dialog.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn history_dialog(&self) -> MutexGuard<'_, Option<HistoryDialog>> {
        self.history_dialog.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::dialogs::HistoryOwner;
    use crate::settings::{Theme, THEME_KEY, SETTINGS_FILE};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_fresh_dirs() {
        let data = tempdir().unwrap();
        let config = tempdir().unwrap();
        let state = AppState::load(data.path(), config.path()).unwrap();

        assert!(state.browser().history().is_empty());
        assert_eq!(state.browser().settings().dns, "8.8.8.8");
        assert!(state.settings_dialog().is_none());
        assert!(state.history_dialog().is_none());
    }

    #[test]
    fn test_load_reads_existing_files() {
        let data = tempdir().unwrap();
        let config = tempdir().unwrap();
        fs::write(data.path().join("history.json"), r#"["http://a.com","http://b.com"]"#).unwrap();
        fs::write(
            config.path().join(SETTINGS_FILE),
            format!(r#"{{"{}": "dark"}}"#, THEME_KEY),
        )
        .unwrap();

        let state = AppState::load(data.path(), config.path()).unwrap();
        assert_eq!(state.browser().history().len(), 2);
        assert_eq!(state.browser().settings().theme, Theme::Dark);
    }

    #[test]
    fn test_history_dialog_round_through_state() {
        let data = tempdir().unwrap();
        let config = tempdir().unwrap();
        fs::write(data.path().join("history.json"), r#"["http://a.com"]"#).unwrap();
        let state = AppState::load(data.path(), config.path()).unwrap();

        *state.history_dialog() = Some(state.browser().history_dialog());

        {
            let mut dialog = state.history_dialog();
            let mut browser = state.browser();
            if let Some(d) = dialog.as_mut() {
                d.clear(&mut *browser).unwrap();
            }
        }

        assert!(state.browser().history().is_empty());
        let raw = fs::read_to_string(data.path().join("history.json")).unwrap();
        assert_eq!(raw, "[]");

        // Owner can still be cleared directly
        state.browser().clear_history().unwrap();
    }
}
