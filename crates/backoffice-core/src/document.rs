// ── Document-level presentation attributes ──
//
// Text direction, language tag and dark-mode class follow the preference
// store. `reconcile` re-applies them on every change.

use serde::Serialize;
use strum::Display;
use tokio::sync::{mpsc, watch};
use tracing::trace;

use crate::prefs::{Preferences, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextDirection {
    Rtl,
    Ltr,
}

/// What the root document element should carry for a given preference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAttributes {
    pub dir: TextDirection,
    pub lang: String,
    /// Whether the `dark` class is present.
    pub dark: bool,
}

impl From<&Preferences> for DocumentAttributes {
    fn from(prefs: &Preferences) -> Self {
        Self {
            dir: if prefs.language.is_rtl() {
                TextDirection::Rtl
            } else {
                TextDirection::Ltr
            },
            lang: prefs.language.to_string(),
            dark: prefs.theme == Theme::Dark,
        }
    }
}

/// Receives attribute updates (a DOM root, a terminal theme, a test recorder).
pub trait DocumentSink {
    fn apply(&mut self, attributes: &DocumentAttributes);
}

impl DocumentSink for mpsc::UnboundedSender<DocumentAttributes> {
    fn apply(&mut self, attributes: &DocumentAttributes) {
        let _ = self.send(attributes.clone());
    }
}

/// Apply the current attributes, then re-apply after every preference
/// change until the store is dropped.
pub async fn reconcile<S: DocumentSink>(
    mut preferences: watch::Receiver<Preferences>,
    sink: &mut S,
) {
    loop {
        let attributes = DocumentAttributes::from(&*preferences.borrow_and_update());
        trace!(
            dir = %attributes.dir,
            lang = %attributes.lang,
            dark = attributes.dark,
            "applying document attributes"
        );
        sink.apply(&attributes);

        if preferences.changed().await.is_err() {
            break;
        }
    }
}
