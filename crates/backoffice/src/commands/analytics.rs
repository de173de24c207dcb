//! Analytics summary handler.

use serde::Serialize;
use tabled::Tabled;

use backoffice_core::{AnalyticsSummary, ApiClient, CoreError};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Clone, Serialize, Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn rows(summary: &AnalyticsSummary) -> Vec<MetricRow> {
    summary
        .metrics
        .iter()
        .map(|(metric, value)| MetricRow {
            metric: metric.clone(),
            value: match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
        .collect()
}

pub async fn handle(api: &ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = api.analytics_summary().await.map_err(CoreError::from)?;

    let out = match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact => {
            output::render_single(&global.output, &summary, |_| String::new(), |_| String::new())
        }
        OutputFormat::Table | OutputFormat::Plain => output::render_list(
            &global.output,
            &rows(&summary),
            MetricRow::clone,
            |r| format!("{}={}", r.metric, r.value),
        ),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
