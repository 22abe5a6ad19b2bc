// Simple Browser Library Entry Point
// This file exposes all modules so they can be imported by main.rs
// and tested independently.

pub mod error;
pub mod history;
pub mod settings;

// Main-window core: owns history + settings
pub mod browser;

// Shared state
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

pub use browser::{Browser, Chrome};
pub use error::{BrowserError, Result};
