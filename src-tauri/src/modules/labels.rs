// User-visible chrome strings for each supported language.

use serde::Serialize;

use crate::settings::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub window_title: &'static str,
    pub back: &'static str,
    pub forward: &'static str,
    pub reload: &'static str,
    pub settings: &'static str,
    pub history: &'static str,

    pub settings_title: &'static str,
    pub dns_server: &'static str,
    pub language: &'static str,
    pub language_ru: &'static str,
    pub language_en: &'static str,
    pub theme: &'static str,
    pub theme_light: &'static str,
    pub theme_dark: &'static str,
    pub save: &'static str,
    pub cancel: &'static str,
    pub saved_title: &'static str,
    pub saved_message: &'static str,

    pub history_title: &'static str,
    pub clear_history: &'static str,
    pub cleared_title: &'static str,
    pub cleared_message: &'static str,
}

const RU: Labels = Labels {
    window_title: "Простой браузер",
    back: "Назад",
    forward: "Вперед",
    reload: "Обновить",
    settings: "Настройки",
    history: "История",

    settings_title: "Настройки",
    dns_server: "DNS сервер:",
    language: "Язык:",
    language_ru: "Русский",
    language_en: "Английский",
    theme: "Тема:",
    theme_light: "Светлая",
    theme_dark: "Темная",
    save: "Сохранить",
    cancel: "Отмена",
    saved_title: "Сохранено",
    saved_message: "Настройки успешно сохранены!",

    history_title: "История",
    clear_history: "Очистить историю",
    cleared_title: "Очищено",
    cleared_message: "История очищена!",
};

const EN: Labels = Labels {
    window_title: "Simple Browser",
    back: "Back",
    forward: "Forward",
    reload: "Reload",
    settings: "Settings",
    history: "History",

    settings_title: "Settings",
    dns_server: "DNS server:",
    language: "Language:",
    language_ru: "Russian",
    language_en: "English",
    theme: "Theme:",
    theme_light: "Light",
    theme_dark: "Dark",
    save: "Save",
    cancel: "Cancel",
    saved_title: "Saved",
    saved_message: "Settings saved successfully!",

    history_title: "History",
    clear_history: "Clear history",
    cleared_title: "Cleared",
    cleared_message: "History cleared!",
};

impl Labels {
    pub fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::Ru => &RU,
            Language::En => &EN,
        }
    }
}
