// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tauri::menu::{MenuBuilder, MenuItemBuilder, PredefinedMenuItem, SubmenuBuilder};
use tauri::webview::PageLoadEvent;
use tauri::{
    AppHandle, Emitter, Manager, PhysicalPosition, PhysicalSize, State, Webview, WebviewBuilder,
    WebviewUrl, WebviewWindowBuilder, Window, WindowEvent,
};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use url::Url;

use simple_browser_lib::modules::dialogs::HistoryOwner;
use simple_browser_lib::modules::labels::Labels;
use simple_browser_lib::modules::navigation::{parse_address, RenderingEngine, HOME_URL};
use simple_browser_lib::modules::palette::Palette;
use simple_browser_lib::settings::{Settings, Theme};
use simple_browser_lib::state::AppState;
use simple_browser_lib::{BrowserError, Chrome, Result};

const MAIN_LABEL: &str = "main";
const CONTENT_LABEL: &str = "content";
const SETTINGS_LABEL: &str = "settings";
const HISTORY_LABEL: &str = "history";

const URL_CHANGED_EVENT: &str = "url-changed";
const PALETTE_EVENT: &str = "palette-changed";
const LABELS_EVENT: &str = "labels-changed";

// Height of the toolbar strip drawn by the main webview
const TOOLBAR_HEIGHT_LOGICAL: f64 = 44.0;

/// The content webview driven as a rendering engine.
struct ContentWebview(Webview);

impl RenderingEngine for ContentWebview {
    fn load(&self, url: &Url) -> Result<()> {
        self.0
            .navigate(url.clone())
            .map_err(|e| BrowserError::Engine(e.to_string()))
    }

    fn back(&self) -> Result<()> {
        self.eval("window.history.back()")
    }

    fn forward(&self) -> Result<()> {
        self.eval("window.history.forward()")
    }

    fn reload(&self) -> Result<()> {
        self.eval("window.location.reload()")
    }
}

impl ContentWebview {
    fn get(app: &AppHandle) -> Result<Self> {
        app.get_webview(CONTENT_LABEL)
            .map(ContentWebview)
            .ok_or_else(|| BrowserError::Engine("content webview is not attached".into()))
    }

    fn eval(&self, js: &str) -> Result<()> {
        self.0
            .eval(js)
            .map_err(|e| BrowserError::Engine(e.to_string()))
    }
}

/// Paints settings onto the real windows.
struct WindowChrome<'a>(&'a AppHandle);

impl Chrome for WindowChrome<'_> {
    fn set_palette(&self, theme: Theme, palette: &Palette) -> Result<()> {
        let native = match theme {
            Theme::Light => tauri::Theme::Light,
            Theme::Dark => tauri::Theme::Dark,
        };
        for window in self.0.windows().values() {
            window.set_theme(Some(native))?;
        }
        self.0.emit(PALETTE_EVENT, *palette)?;
        Ok(())
    }

    fn set_labels(&self, labels: &Labels) -> Result<()> {
        if let Some(main_window) = self.0.get_window(MAIN_LABEL) {
            main_window.set_title(labels.window_title)?;
        }
        self.0.emit(LABELS_EVENT, labels)?;
        Ok(())
    }
}

fn report(e: BrowserError) -> String {
    log::error!("{}", e);
    e.to_string()
}

fn apply_settings(app: &AppHandle, state: &AppState) -> Result<()> {
    state.browser().apply_settings(&WindowChrome(app))
}

fn notify(app: &AppHandle, title: &str, message: &str) {
    app.dialog()
        .message(message)
        .title(title)
        .kind(MessageDialogKind::Info)
        .show(|_| {});
}

// Show settings window
fn show_settings_window(app: &AppHandle, state: &AppState) -> Result<()> {
    if let Some(win) = app.get_webview_window(SETTINGS_LABEL) {
        win.set_focus()?;
        return Ok(());
    }

    let (dialog, title) = {
        let browser = state.browser();
        (browser.settings_dialog(), browser.labels().settings_title)
    };
    *state.settings_dialog() = Some(dialog);

    let settings_window = WebviewWindowBuilder::new(
        app,
        SETTINGS_LABEL,
        WebviewUrl::App("settings.html".into()),
    )
    .title(title)
    .inner_size(320.0, 300.0)
    .resizable(false)
    .minimizable(false)
    .maximizable(false)
    .always_on_top(true)
    .center()
    .focused(true)
    .build()?;

    // Closing the dialog by any route re-applies whatever is stored now
    let handle = app.clone();
    settings_window.on_window_event(move |event| {
        if let WindowEvent::Destroyed = event {
            let state = handle.state::<AppState>();
            if let Some(dialog) = state.settings_dialog().take() {
                dialog.cancel();
            }
            if let Err(e) = apply_settings(&handle, &state) {
                log::error!("[Settings] Failed to apply settings: {}", e);
            }
        }
    });

    Ok(())
}

// Show history window
fn show_history_window(app: &AppHandle, state: &AppState) -> Result<()> {
    if let Some(win) = app.get_webview_window(HISTORY_LABEL) {
        win.set_focus()?;
        return Ok(());
    }

    let (dialog, title) = {
        let browser = state.browser();
        (browser.history_dialog(), browser.labels().history_title)
    };
    *state.history_dialog() = Some(dialog);

    let history_window = WebviewWindowBuilder::new(
        app,
        HISTORY_LABEL,
        WebviewUrl::App("history.html".into()),
    )
    .title(title)
    .inner_size(420.0, 320.0)
    .minimizable(false)
    .maximizable(false)
    .always_on_top(true)
    .center()
    .focused(true)
    .build()?;

    let handle = app.clone();
    history_window.on_window_event(move |event| {
        if let WindowEvent::Destroyed = event {
            handle.state::<AppState>().history_dialog().take();
        }
    });

    Ok(())
}

fn close_window(app: &AppHandle, label: &str) -> Result<()> {
    if let Some(win) = app.get_webview_window(label) {
        win.close()?;
    }
    Ok(())
}

#[tauri::command]
fn navigate(app: AppHandle, state: State<AppState>, text: String) -> std::result::Result<String, String> {
    let engine = ContentWebview::get(&app).map_err(report)?;
    state.browser().navigate(&engine, &text).map_err(report)
}

#[tauri::command]
fn go_back(app: AppHandle) -> std::result::Result<(), String> {
    ContentWebview::get(&app).and_then(|e| e.back()).map_err(report)
}

#[tauri::command]
fn go_forward(app: AppHandle) -> std::result::Result<(), String> {
    ContentWebview::get(&app).and_then(|e| e.forward()).map_err(report)
}

#[tauri::command]
fn reload(app: AppHandle) -> std::result::Result<(), String> {
    ContentWebview::get(&app).and_then(|e| e.reload()).map_err(report)
}

/// Everything a freshly loaded chrome page needs to paint itself.
#[tauri::command]
fn chrome_state(app: AppHandle, state: State<AppState>) -> serde_json::Value {
    let browser = state.browser();
    let url = app
        .get_webview(CONTENT_LABEL)
        .and_then(|wv| wv.url().ok())
        .map(|u| u.to_string());
    serde_json::json!({
        "labels": browser.labels(),
        "palette": browser.palette(),
        "url": url,
    })
}

// Window creation must not run on the main thread
#[tauri::command]
async fn open_settings(app: AppHandle, state: State<'_, AppState>) -> std::result::Result<(), String> {
    show_settings_window(&app, &state).map_err(report)
}

#[tauri::command]
fn settings_form(state: State<AppState>) -> Settings {
    match state.settings_dialog().as_ref() {
        Some(dialog) => dialog.form().clone(),
        None => state.browser().settings_dialog().form().clone(),
    }
}

#[tauri::command]
fn save_settings(app: AppHandle, state: State<AppState>, form: Settings) -> std::result::Result<(), String> {
    let labels = {
        let mut dialog = state
            .settings_dialog()
            .take()
            .unwrap_or_else(|| state.browser().settings_dialog());
        dialog.edit(form);

        let mut browser = state.browser();
        dialog.confirm(browser.store_mut()).map_err(report)?;
        browser.labels()
    };

    notify(&app, labels.saved_title, labels.saved_message);
    close_window(&app, SETTINGS_LABEL).map_err(report)
}

#[tauri::command]
fn cancel_settings(app: AppHandle, state: State<AppState>) -> std::result::Result<(), String> {
    if let Some(dialog) = state.settings_dialog().take() {
        dialog.cancel();
    }
    close_window(&app, SETTINGS_LABEL).map_err(report)
}

// Window creation must not run on the main thread
#[tauri::command]
async fn open_history(app: AppHandle, state: State<'_, AppState>) -> std::result::Result<(), String> {
    show_history_window(&app, &state).map_err(report)
}

#[tauri::command]
fn history_snapshot(state: State<AppState>) -> Vec<String> {
    state
        .history_dialog()
        .as_ref()
        .map(|dialog| dialog.items().to_vec())
        .unwrap_or_default()
}

#[tauri::command]
fn clear_history(app: AppHandle, state: State<AppState>) -> std::result::Result<(), String> {
    let labels = {
        let mut dialog = state.history_dialog();
        let mut browser = state.browser();
        match dialog.as_mut() {
            Some(dialog) => dialog.clear(&mut *browser),
            None => browser.clear_history(),
        }
        .map_err(report)?;
        browser.labels()
    };

    notify(&app, labels.cleared_title, labels.cleared_message);
    Ok(())
}

fn build_menu(app: &tauri::App, labels: &Labels) -> tauri::Result<()> {
    let app_menu = SubmenuBuilder::new(app, "Simple Browser")
        .item(&PredefinedMenuItem::about(app, Some(labels.window_title), None)?)
        .separator()
        .item(&MenuItemBuilder::with_id("settings", labels.settings).accelerator("CmdOrCtrl+,").build(app)?)
        .item(&MenuItemBuilder::with_id("history", labels.history).accelerator("CmdOrCtrl+Y").build(app)?)
        .separator()
        .item(&PredefinedMenuItem::quit(app, None)?)
        .build()?;

    let edit_menu = SubmenuBuilder::new(app, "Edit")
        .item(&PredefinedMenuItem::undo(app, None)?)
        .item(&PredefinedMenuItem::redo(app, None)?)
        .separator()
        .item(&PredefinedMenuItem::cut(app, None)?)
        .item(&PredefinedMenuItem::copy(app, None)?)
        .item(&PredefinedMenuItem::paste(app, None)?)
        .item(&PredefinedMenuItem::select_all(app, None)?)
        .build()?;

    let nav_menu = SubmenuBuilder::new(app, "Go")
        .item(&MenuItemBuilder::with_id("go_back", labels.back).accelerator("CmdOrCtrl+[").build(app)?)
        .item(&MenuItemBuilder::with_id("go_forward", labels.forward).accelerator("CmdOrCtrl+]").build(app)?)
        .item(&MenuItemBuilder::with_id("reload", labels.reload).accelerator("CmdOrCtrl+R").build(app)?)
        .build()?;

    let menu = MenuBuilder::new(app)
        .items(&[&app_menu, &edit_menu, &nav_menu])
        .build()?;
    app.set_menu(menu)?;

    app.on_menu_event(move |app, event| {
        let state = app.state::<AppState>();
        let result = match event.id().0.as_str() {
            "settings" => show_settings_window(app, &state),
            "history" => show_history_window(app, &state),
            "go_back" => ContentWebview::get(app).and_then(|e| e.back()),
            "go_forward" => ContentWebview::get(app).and_then(|e| e.forward()),
            "reload" => ContentWebview::get(app).and_then(|e| e.reload()),
            _ => Ok(()),
        };
        if let Err(e) = result {
            log::error!("[Menu] {}", e);
        }
    });

    Ok(())
}

/// Content webview bounds for a main window of `size` at `scale`.
fn content_bounds(size: PhysicalSize<u32>, scale: f64) -> (PhysicalPosition<i32>, PhysicalSize<u32>) {
    let toolbar_height = (TOOLBAR_HEIGHT_LOGICAL * scale) as u32;
    let content_height = size.height.saturating_sub(toolbar_height).max(100);
    (
        PhysicalPosition::new(0, toolbar_height as i32),
        PhysicalSize::new(size.width, content_height),
    )
}

fn attach_content_webview(app: &AppHandle, main_window: &Window) -> Result<()> {
    let (position, size) = content_bounds(main_window.inner_size()?, main_window.scale_factor()?);

    // Mirror every address the engine lands on into the URL field
    let handle = app.clone();
    let webview_builder = WebviewBuilder::new(
        CONTENT_LABEL,
        WebviewUrl::External(parse_address(HOME_URL)?),
    )
    .on_page_load(move |_webview, payload| {
        if matches!(payload.event(), PageLoadEvent::Started | PageLoadEvent::Finished) {
            if let Err(e) = handle.emit_to(MAIN_LABEL, URL_CHANGED_EVENT, payload.url().as_str()) {
                log::warn!("[Navigation] Failed to report URL change: {}", e);
            }
        }
    });

    main_window.add_child(webview_builder, position, size)?;

    // Handle Window Resizing
    let main_window_clone = main_window.clone();
    let handle = app.clone();
    main_window.on_window_event(move |event| {
        if let WindowEvent::Resized(new_physical_size) = event {
            let scale = main_window_clone.scale_factor().unwrap_or(1.0);
            let (position, size) = content_bounds(*new_physical_size, scale);

            if let Some(wv) = handle.get_webview(CONTENT_LABEL) {
                let _ = wv.set_bounds(tauri::Rect {
                    position: tauri::Position::Physical(position),
                    size: tauri::Size::Physical(size),
                });
            }
        }
    });

    Ok(())
}

fn main() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            if let Some(main_window) = app.get_window(MAIN_LABEL) {
                let _ = main_window.set_focus();
            }
        }))
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            let config_dir = app.path().app_config_dir()?;
            log::info!("[Startup] Data dir {:?}, config dir {:?}", data_dir, config_dir);

            let state = AppState::load(&data_dir, &config_dir)?;
            let labels = state.browser().labels();
            app.manage(state);

            build_menu(app, labels)?;

            let main_window: Window = app
                .get_window(MAIN_LABEL)
                .ok_or("main window is missing from tauri.conf.json")?;
            attach_content_webview(app.handle(), &main_window)?;

            apply_settings(app.handle(), &app.state::<AppState>())?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            navigate,
            go_back,
            go_forward,
            reload,
            chrome_state,
            open_settings,
            settings_form,
            save_settings,
            cancel_settings,
            open_history,
            history_snapshot,
            clear_history
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
