//! Light/dark theme preference
//!
//! [`effective_theme`] is the pure decision. [`ThemeResolver`] wraps it with a
//! persisted preference slot, a system color-scheme signal and the display
//! attribute the result is written to.

mod resolver;
mod store;

pub use resolver::{
    effective_theme, listen_for_system_changes, DocumentRoot, MediaQuery, MediaQueryHandle,
    SystemSignal, Theme, ThemePreference, ThemeResolver,
};
pub use store::{FileStore, MemoryStore, PreferenceStore, THEME_KEY};
