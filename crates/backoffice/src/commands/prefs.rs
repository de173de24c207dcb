//! Preference and shell handlers.
//!
//! These never talk to the backend. Toggles persist through the file
//! backend and report the document attributes the change produced.

use serde::Serialize;
use tokio::sync::mpsc;

use backoffice_config::{Config, FilePreferences};
use backoffice_core::{
    DocumentAttributes, HydrationGate, PreferenceStore, Preferences, ShellLayout, ShellView,
    reconcile,
};

use crate::cli::{GlobalOpts, PrefsArgs, PrefsCommand};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct PrefsView {
    #[serde(flatten)]
    preferences: Preferences,
    document: DocumentAttributes,
}

impl From<Preferences> for PrefsView {
    fn from(preferences: Preferences) -> Self {
        Self {
            document: DocumentAttributes::from(&preferences),
            preferences,
        }
    }
}

fn detail(view: &PrefsView) -> String {
    output::detail_lines([
        ("Theme", view.preferences.theme.to_string()),
        ("Language", view.preferences.language.to_string()),
        ("Direction", view.document.dir.to_string()),
        ("Dark class", view.document.dark.to_string()),
    ])
}

/// Run `action` against the store while a reconciler watches it, and
/// return every attribute set the reconciler applied.
async fn reconciled(
    store: PreferenceStore,
    action: impl FnOnce(&PreferenceStore) -> Preferences,
) -> Result<(Preferences, Vec<DocumentAttributes>), CliError> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let changes = store.subscribe();
    let task = tokio::spawn(async move {
        let mut sink = tx;
        reconcile(changes, &mut sink).await;
    });

    let preferences = action(&store);
    drop(store);
    task.await
        .map_err(|e| CliError::Internal(format!("reconciler stopped: {e}")))?;

    let mut applied = Vec::new();
    while let Ok(attributes) = rx.try_recv() {
        applied.push(attributes);
    }
    Ok((preferences, applied))
}

pub async fn handle(
    args: PrefsArgs,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let backend = FilePreferences::default().with_fallback(config.preferences);
    let store = PreferenceStore::with_backend(backend);

    match args.command {
        PrefsCommand::Show => {
            let view = PrefsView::from(store.get());
            let out = output::render_single(&global.output, &view, detail, |v| {
                format!("{} {}", v.preferences.theme, v.preferences.language)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        cmd @ (PrefsCommand::ToggleTheme | PrefsCommand::ToggleLanguage) => {
            let toggle_theme = matches!(cmd, PrefsCommand::ToggleTheme);
            let (preferences, applied) = reconciled(store, |store| {
                if toggle_theme {
                    store.toggle_theme()
                } else {
                    store.toggle_language()
                }
            })
            .await?;
            tracing::debug!(updates = applied.len(), "document attributes reconciled");

            let view = PrefsView::from(preferences);
            let out = output::render_single(&global.output, &view, detail, |v| {
                format!("{} {}", v.preferences.theme, v.preferences.language)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PrefsCommand::Shell => {
            let gate = HydrationGate::new();
            let layout = ShellLayout::default();
            let skeleton = ShellView::render(&gate, &store, layout);
            gate.mark_ready();
            let frames = vec![skeleton, ShellView::render(&gate, &store, layout)];
            let out = output::render_single(
                &global.output,
                &frames,
                |frames| {
                    frames
                        .iter()
                        .map(|frame| {
                            let l = frame.layout();
                            let kind = if frame.is_skeleton() { "skeleton" } else { "shell" };
                            format!(
                                "{kind:<8}  sidebar {}px  header {}px",
                                l.sidebar_width, l.header_height
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                },
                |frames| {
                    frames
                        .iter()
                        .map(|f| if f.is_skeleton() { "skeleton" } else { "shell" })
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
