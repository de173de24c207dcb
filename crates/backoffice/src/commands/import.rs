//! Bulk import command handlers.

use bytesize::ByteSize;
use serde::Serialize;

use backoffice_core::import::{self, MAX_FILE_SIZE, TEMPLATE_FILE_NAME};
use backoffice_core::{ApiClient, ImportReport, ImportSession};

use crate::cli::{GlobalOpts, ImportArgs, ImportCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct Validated<'a> {
    name: &'a str,
    size: u64,
    valid: bool,
}

fn report_detail(report: &ImportReport) -> String {
    let mut out = output::detail_lines([
        ("Created", report.created.to_string()),
        ("Updated", report.updated.to_string()),
        ("Errors", report.errors.len().to_string()),
    ]);
    for err in &report.errors {
        out.push_str("\n  - ");
        out.push_str(err);
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: &ApiClient,
    args: ImportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ImportCommand::Template { out } => {
            match out {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(TEMPLATE_FILE_NAME)
                    } else {
                        path
                    };
                    import::write_template(&path)?;
                    output::notice(
                        &format!("Template written to {}", path.display()),
                        global.quiet,
                    );
                }
                None => output::print_output(import::template_csv().trim_end(), global.quiet),
            }
            Ok(())
        }

        ImportCommand::Validate { file } => {
            let candidate = util::read_candidate(&file).await?;
            import::validate(&candidate)?;
            let summary = Validated {
                name: candidate.name(),
                size: candidate.size(),
                valid: true,
            };
            let out = output::render_single(
                &global.output,
                &summary,
                |v| {
                    format!(
                        "{} is ready to import ({} of {} allowed)",
                        v.name,
                        ByteSize(v.size),
                        ByteSize(MAX_FILE_SIZE),
                    )
                },
                |v| v.name.to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ImportCommand::Upload { file } => {
            let candidate = util::read_candidate(&file).await?;
            let quiet = global.quiet;
            let mut session = ImportSession::new()
                .on_complete(move || output::notice("Import finished", quiet));
            session.open();
            session.select(candidate)?;

            let report = session
                .upload(|candidate| async move {
                    api.import_products(candidate.name(), candidate.contents().clone())
                        .await
                })
                .await?;

            let out = output::render_single(&global.output, &report, report_detail, |r| {
                format!("{} {}", r.created, r.updated)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn report_lists_row_errors() {
        let report = ImportReport {
            created: 3,
            updated: 1,
            errors: vec!["row 4: price must be a number".into()],
        };
        assert_eq!(
            report_detail(&report),
            "Created  3\nUpdated  1\nErrors   1\n  - row 4: price must be a number"
        );
    }
}
