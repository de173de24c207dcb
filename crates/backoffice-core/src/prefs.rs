// ── UI preference store ──
//
// Theme and language, owned by one store object that is passed to its
// consumers explicitly. Changes are broadcast over a `watch` channel and
// optionally written through to a durable backend.

use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    /// Persian, written right-to-left.
    #[default]
    Fa,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Self::Fa => Self::En,
            Self::En => Self::Fa,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Fa)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

/// Durable storage for preferences across process restarts.
pub trait PreferenceBackend: Send + Sync {
    fn load(&self) -> Result<Option<Preferences>, CoreError>;
    fn save(&self, preferences: &Preferences) -> Result<(), CoreError>;
}

/// Process-wide preference state with two actions.
///
/// Without a backend, preferences live as long as the store does.
pub struct PreferenceStore {
    state: watch::Sender<Preferences>,
    backend: Option<Box<dyn PreferenceBackend>>,
}

impl PreferenceStore {
    pub fn new(initial: Preferences) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            backend: None,
        }
    }

    /// Load from `backend` (falling back to defaults) and write every
    /// subsequent change through to it.
    pub fn with_backend(backend: impl PreferenceBackend + 'static) -> Self {
        let initial = match backend.load() {
            Ok(Some(prefs)) => prefs,
            Ok(None) => Preferences::default(),
            Err(err) => {
                warn!(error = %err, "failed to load preferences, using defaults");
                Preferences::default()
            }
        };
        let mut store = Self::new(initial);
        store.backend = Some(Box::new(backend));
        store
    }

    pub fn get(&self) -> Preferences {
        *self.state.borrow()
    }

    pub fn toggle_theme(&self) -> Preferences {
        self.apply(|prefs| prefs.theme = prefs.theme.toggled())
    }

    pub fn toggle_language(&self) -> Preferences {
        self.apply(|prefs| prefs.language = prefs.language.toggled())
    }

    /// Subscribe to preference changes. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.state.subscribe()
    }

    fn apply(&self, change: impl FnOnce(&mut Preferences)) -> Preferences {
        self.state.send_modify(change);
        let prefs = self.get();
        debug!(theme = %prefs.theme, language = %prefs.language, "preferences changed");

        if let Some(backend) = &self.backend {
            if let Err(err) = backend.save(&prefs) {
                warn!(error = %err, "failed to persist preferences");
            }
        }
        prefs
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default, Clone)]
    struct MemoryBackend {
        saved: Arc<Mutex<Vec<Preferences>>>,
        initial: Option<Preferences>,
    }

    impl PreferenceBackend for MemoryBackend {
        fn load(&self) -> Result<Option<Preferences>, CoreError> {
            Ok(self.initial)
        }

        fn save(&self, preferences: &Preferences) -> Result<(), CoreError> {
            self.saved.lock().unwrap().push(*preferences);
            Ok(())
        }
    }

    struct BrokenBackend;

    impl PreferenceBackend for BrokenBackend {
        fn load(&self) -> Result<Option<Preferences>, CoreError> {
            Err(CoreError::Config {
                message: "unreadable".into(),
            })
        }

        fn save(&self, _: &Preferences) -> Result<(), CoreError> {
            Err(CoreError::Config {
                message: "read-only".into(),
            })
        }
    }

    #[test]
    fn toggling_theme_twice_restores_it() {
        let store = PreferenceStore::default();
        let initial = store.get();

        store.toggle_theme();
        assert_eq!(store.get().theme, Theme::Dark);
        store.toggle_theme();

        assert_eq!(store.get(), initial);
    }

    #[test]
    fn toggles_touch_only_their_field() {
        let store = PreferenceStore::default();
        let after = store.toggle_language();
        assert_eq!(after.language, Language::En);
        assert_eq!(after.theme, Theme::Light);
    }

    #[test]
    fn subscribers_see_changes() {
        let store = PreferenceStore::default();
        let mut rx = store.subscribe();
        store.toggle_theme();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().theme, Theme::Dark);
    }

    #[test]
    fn backend_supplies_initial_and_receives_changes() {
        let backend = MemoryBackend {
            initial: Some(Preferences {
                theme: Theme::Dark,
                language: Language::En,
            }),
            ..MemoryBackend::default()
        };
        let saved = Arc::clone(&backend.saved);
        let store = PreferenceStore::with_backend(backend);

        assert_eq!(store.get().theme, Theme::Dark);
        store.toggle_language();

        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].language, Language::Fa);
    }

    #[test]
    fn backend_failures_are_not_fatal() {
        let store = PreferenceStore::with_backend(BrokenBackend);
        assert_eq!(store.get(), Preferences::default());
        assert_eq!(store.toggle_theme().theme, Theme::Dark);
    }

    #[test]
    fn enums_display_lowercase() {
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Language::Fa.to_string(), "fa");
    }
}
