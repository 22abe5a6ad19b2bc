// Dialog models - no Tauri imports.
// The webview windows render these; all state transitions happen here.

use crate::error::Result;
use crate::settings::{Language, Settings, SettingsStore, Theme};

/// Form state of the settings dialog.
///
/// Edits stay local until `confirm`, which writes every field at once.
/// `cancel` drops the form without touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDialog {
    form: Settings,
}

impl SettingsDialog {
    /// Opens pre-filled with the store's current values.
    pub fn open(store: &impl SettingsStore) -> Self {
        Self {
            form: Settings::load(store),
        }
    }

    pub fn form(&self) -> &Settings {
        &self.form
    }

    pub fn set_dns(&mut self, dns: impl Into<String>) {
        self.form.dns = dns.into();
    }

    pub fn set_language(&mut self, language: Language) {
        self.form.language = language;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.form.theme = theme;
    }

    /// Replaces the whole form, as submitted by the dialog window.
    pub fn edit(&mut self, form: Settings) {
        self.form = form;
    }

    pub fn confirm(self, store: &mut impl SettingsStore) -> Result<Settings> {
        self.form.save(store)?;
        log::info!(
            "[Settings] Saved dns={} language={} theme={}",
            self.form.dns,
            self.form.language,
            self.form.theme
        );
        Ok(self.form)
    }

    pub fn cancel(self) {
        log::info!("[Settings] Dialog cancelled, nothing written");
    }
}

/// Whoever owns the authoritative history and can clear it.
pub trait HistoryOwner {
    fn clear_history(&mut self) -> Result<()>;
}

/// History list shown in the dialog.
///
/// A snapshot taken at open time. Clearing empties this copy and asks the
/// owner to clear the real store; the two are not re-synced afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryDialog {
    items: Vec<String>,
}

impl HistoryDialog {
    pub fn new(snapshot: Vec<String>) -> Self {
        Self { items: snapshot }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn clear(&mut self, owner: &mut impl HistoryOwner) -> Result<()> {
        self.items.clear();
        owner.clear_history()
    }
}
