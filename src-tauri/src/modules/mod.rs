// Module exports for pure logic
pub mod dialogs;      // Settings/history dialog models
pub mod labels;       // Per-language chrome strings
pub mod navigation;   // Address normalization + engine seam
pub mod palette;      // Theme colors
