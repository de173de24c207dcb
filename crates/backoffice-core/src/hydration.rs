// ── Hydration gate ──
//
// The dashboard shell shows a same-sized skeleton until the client side
// has mounted once. `Bootstrapping → Ready` is one-way and happens once.

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::prefs::{PreferenceStore, Preferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Bootstrapping,
    Ready,
}

/// One-way readiness flag for the first client paint.
#[derive(Debug)]
pub struct HydrationGate {
    phase: watch::Sender<Phase>,
}

impl HydrationGate {
    pub fn new() -> Self {
        let (phase, _) = watch::channel(Phase::Bootstrapping);
        Self { phase }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Transition to `Ready`. Returns `true` only for the call that
    /// performed the transition; later calls are no-ops.
    pub fn mark_ready(&self) -> bool {
        let transitioned = self.phase.send_if_modified(|phase| {
            if *phase == Phase::Ready {
                false
            } else {
                *phase = Phase::Ready;
                true
            }
        });
        if transitioned {
            debug!("hydration gate ready");
        }
        transitioned
    }
}

impl Default for HydrationGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed dimensions of the dashboard frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShellLayout {
    pub sidebar_width: u16,
    pub header_height: u16,
}

impl Default for ShellLayout {
    fn default() -> Self {
        Self {
            sidebar_width: 256,
            header_height: 64,
        }
    }
}

/// What the shell renders for the current phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShellView {
    /// Placeholder with the real shell's dimensions and no content.
    Skeleton { layout: ShellLayout },
    Shell {
        layout: ShellLayout,
        preferences: Preferences,
    },
}

impl ShellView {
    pub fn render(gate: &HydrationGate, preferences: &PreferenceStore, layout: ShellLayout) -> Self {
        match gate.phase() {
            Phase::Bootstrapping => Self::Skeleton { layout },
            Phase::Ready => Self::Shell {
                layout,
                preferences: preferences.get(),
            },
        }
    }

    pub fn layout(&self) -> ShellLayout {
        match self {
            Self::Skeleton { layout } | Self::Shell { layout, .. } => *layout,
        }
    }

    pub fn is_skeleton(&self) -> bool {
        matches!(self, Self::Skeleton { .. })
    }
}
