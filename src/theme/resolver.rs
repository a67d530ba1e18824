//! Theme resolution

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use super::store::{PreferenceStore, THEME_KEY};
use crate::error::Result;

/// The display mode actually applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme {:?}, expected light or dark", other)),
        }
    }
}

/// What the user asked for; `System` follows the operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
    System,
}

impl ThemePreference {
    /// The explicit theme, if any
    pub fn explicit(&self) -> Option<Theme> {
        match self {
            ThemePreference::Light => Some(Theme::Light),
            ThemePreference::Dark => Some(Theme::Dark),
            ThemePreference::System => None,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.explicit() {
            Some(theme) => fmt::Display::fmt(&theme, f),
            None => f.write_str("system"),
        }
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "system" => Ok(ThemePreference::System),
            other => other
                .parse::<Theme>()
                .map(ThemePreference::from)
                .map_err(|_| format!("unknown theme {:?}, expected light, dark or system", other)),
        }
    }
}

impl From<Theme> for ThemePreference {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemePreference::Light,
            Theme::Dark => ThemePreference::Dark,
        }
    }
}

/// Resolve the display mode: an explicit preference always wins over the system
pub fn effective_theme(stored: Option<Theme>, system_prefers_dark: bool) -> Theme {
    match stored {
        Some(theme) => theme,
        None if system_prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

/// Source of the operating system's color-scheme preference
pub trait SystemSignal {
    fn prefers_dark(&self) -> bool;
}

impl SystemSignal for bool {
    fn prefers_dark(&self) -> bool {
        *self
    }
}

/// A `prefers-color-scheme: dark` query that notifies listeners on change
pub struct MediaQuery {
    matches: Rc<Cell<bool>>,
    listeners: Vec<Box<dyn FnMut(bool)>>,
}

impl MediaQuery {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            matches: Rc::new(Cell::new(prefers_dark)),
            listeners: Vec::new(),
        }
    }

    /// A read-only view of the current value
    pub fn handle(&self) -> MediaQueryHandle {
        MediaQueryHandle(Rc::clone(&self.matches))
    }

    pub fn matches(&self) -> bool {
        self.matches.get()
    }

    pub fn add_listener<F: FnMut(bool) + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    /// Update the value, firing listeners if it changed
    pub fn set_matches(&mut self, prefers_dark: bool) {
        if self.matches.replace(prefers_dark) == prefers_dark {
            return;
        }
        for listener in &mut self.listeners {
            listener(prefers_dark);
        }
    }
}

/// Shared read access to a [`MediaQuery`]'s value
#[derive(Debug, Clone)]
pub struct MediaQueryHandle(Rc<Cell<bool>>);

impl SystemSignal for MediaQueryHandle {
    fn prefers_dark(&self) -> bool {
        self.0.get()
    }
}

/// The element the effective theme is written to (`data-theme`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRoot {
    data_theme: Option<Theme>,
}

impl DocumentRoot {
    pub fn data_theme(&self) -> Option<Theme> {
        self.data_theme
    }

    pub fn set_data_theme(&mut self, theme: Theme) {
        self.data_theme = Some(theme);
    }
}

/// Applies the effective theme from a persisted preference and a system signal
pub struct ThemeResolver<S, Q> {
    store: S,
    signal: Q,
    root: DocumentRoot,
}

impl<S: PreferenceStore, Q: SystemSignal> ThemeResolver<S, Q> {
    pub fn new(store: S, signal: Q) -> Self {
        Self {
            store,
            signal,
            root: DocumentRoot::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    /// Read the persisted preference; absent means `System`
    ///
    /// Anything other than the two literals is ignored.
    pub fn stored_preference(&self) -> Result<ThemePreference> {
        let preference = match self.store.get(THEME_KEY)?.as_deref() {
            None => ThemePreference::System,
            Some(value) => match value.parse::<Theme>() {
                Ok(theme) => theme.into(),
                Err(_) => {
                    tracing::warn!("Ignoring stored theme preference {:?}", value);
                    ThemePreference::System
                }
            },
        };
        Ok(preference)
    }

    /// Compute the effective theme and write it to the document root
    pub fn apply_theme(&mut self) -> Result<Theme> {
        let stored = self.stored_preference()?.explicit();
        let theme = effective_theme(stored, self.signal.prefers_dark());
        self.root.set_data_theme(theme);
        tracing::debug!("Applied {} theme", theme);
        Ok(theme)
    }

    /// Persist a preference (`System` clears it) and re-apply
    pub fn set_preference(&mut self, preference: ThemePreference) -> Result<Theme> {
        match preference.explicit() {
            Some(theme) => self.store.set(THEME_KEY, theme.as_str())?,
            None => self.store.remove(THEME_KEY)?,
        }
        self.apply_theme()
    }

    /// React to a system color-scheme change
    ///
    /// Re-applies only when no explicit preference is persisted right now.
    pub fn handle_system_change(&mut self) -> Result<Option<Theme>> {
        if self.stored_preference()? != ThemePreference::System {
            return Ok(None);
        }
        self.apply_theme().map(Some)
    }
}

/// Re-apply the theme whenever the system color scheme changes
///
/// The listener holds the resolver, not a snapshot of the preference, so a
/// preference set after subscribing is respected.
pub fn listen_for_system_changes<S, Q>(
    resolver: &Rc<RefCell<ThemeResolver<S, Q>>>,
    query: &mut MediaQuery,
) where
    S: PreferenceStore + 'static,
    Q: SystemSignal + 'static,
{
    let resolver = Rc::clone(resolver);
    query.add_listener(move |_| {
        if let Err(e) = resolver.borrow_mut().handle_system_change() {
            tracing::error!("Failed to apply theme after system change: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryStore;

    #[test]
    fn test_effective_theme() {
        assert_eq!(effective_theme(None, true), Theme::Dark);
        assert_eq!(effective_theme(None, false), Theme::Light);
        assert_eq!(effective_theme(Some(Theme::Light), true), Theme::Light);
        assert_eq!(effective_theme(Some(Theme::Dark), false), Theme::Dark);
        assert_eq!(effective_theme(Some(Theme::Dark), true), Theme::Dark);
        assert_eq!(effective_theme(Some(Theme::Light), false), Theme::Light);
    }

    #[test]
    fn test_parse_preference() {
        assert_eq!("system".parse::<ThemePreference>(), Ok(ThemePreference::System));
        assert_eq!("dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert_eq!("light".parse::<ThemePreference>(), Ok(ThemePreference::Light));
        assert!("Dark".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_set_preference_persists_literals() {
        let mut resolver = ThemeResolver::new(MemoryStore::new(), false);

        assert_eq!(resolver.set_preference(ThemePreference::Dark).unwrap(), Theme::Dark);
        assert_eq!(
            resolver.store().get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );

        assert_eq!(resolver.set_preference(ThemePreference::Light).unwrap(), Theme::Light);
        assert_eq!(
            resolver.store().get(THEME_KEY).unwrap().as_deref(),
            Some("light")
        );

        assert_eq!(resolver.set_preference(ThemePreference::System).unwrap(), Theme::Light);
        assert_eq!(resolver.store().get(THEME_KEY).unwrap(), None);
        assert_eq!(resolver.stored_preference().unwrap(), ThemePreference::System);
    }

    #[test]
    fn test_apply_writes_document_root() {
        let mut resolver = ThemeResolver::new(MemoryStore::new(), true);
        assert_eq!(resolver.root().data_theme(), None);
        resolver.apply_theme().unwrap();
        assert_eq!(resolver.root().data_theme(), Some(Theme::Dark));
        // Idempotent
        resolver.apply_theme().unwrap();
        assert_eq!(resolver.root().data_theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_unknown_stored_value_follows_system() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "sepia").unwrap();
        let mut resolver = ThemeResolver::new(store, true);
        assert_eq!(resolver.stored_preference().unwrap(), ThemePreference::System);
        assert_eq!(resolver.apply_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_system_change_follows_when_no_preference() {
        let mut query = MediaQuery::new(false);
        let resolver = Rc::new(RefCell::new(ThemeResolver::new(
            MemoryStore::new(),
            query.handle(),
        )));
        resolver.borrow_mut().apply_theme().unwrap();
        listen_for_system_changes(&resolver, &mut query);

        query.set_matches(true);
        assert_eq!(resolver.borrow().root().data_theme(), Some(Theme::Dark));

        query.set_matches(false);
        assert_eq!(resolver.borrow().root().data_theme(), Some(Theme::Light));
    }

    #[test]
    fn test_system_change_checks_preference_when_fired() {
        let mut query = MediaQuery::new(false);
        let resolver = Rc::new(RefCell::new(ThemeResolver::new(
            MemoryStore::new(),
            query.handle(),
        )));
        // Subscribe while no preference is stored
        listen_for_system_changes(&resolver, &mut query);

        // The user picks light afterwards
        resolver
            .borrow_mut()
            .set_preference(ThemePreference::Light)
            .unwrap();

        query.set_matches(true);
        assert_eq!(resolver.borrow().root().data_theme(), Some(Theme::Light));

        // Back to system: the next change is followed again
        resolver
            .borrow_mut()
            .set_preference(ThemePreference::System)
            .unwrap();
        assert_eq!(resolver.borrow().root().data_theme(), Some(Theme::Dark));
        query.set_matches(false);
        assert_eq!(resolver.borrow().root().data_theme(), Some(Theme::Light));
    }

    #[test]
    fn test_unchanged_signal_does_not_fire() {
        let mut query = MediaQuery::new(true);
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        query.add_listener(move |_| counter.set(counter.get() + 1));

        query.set_matches(true);
        assert_eq!(fired.get(), 0);
        query.set_matches(false);
        assert_eq!(fired.get(), 1);
        assert!(!query.matches());
    }
}
