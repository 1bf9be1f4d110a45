pub mod console;
pub mod csv;
pub mod json;

use crate::catalog::{Answer, LoadedCatalog};
use crate::config::OutputFormat;
use crate::session::{Questionnaire, ResultRow, Summary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Everything an exported report carries about one questionnaire run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub catalog: String,
    pub catalog_version: String,
    pub catalog_digest: String,
    pub generated_at: DateTime<Utc>,
    pub complete: bool,
    pub results: Vec<ResultRow>,
    pub summary: Summary,
}

impl RunReport {
    pub fn new(loaded: &LoadedCatalog, q: &Questionnaire) -> Self {
        let results = q.results();
        let summary = Summary::of(&results);
        Self {
            catalog: loaded.catalog.name.clone(),
            catalog_version: loaded.catalog.version.clone(),
            catalog_digest: loaded.digest.clone(),
            generated_at: Utc::now(),
            complete: q.is_complete(),
            results,
            summary,
        }
    }
}

/// Render a report in the requested format.
pub fn render(report: &RunReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(console::format_report(report)),
        OutputFormat::Json => json::to_json(report),
        OutputFormat::Csv => Ok(csv::to_csv(&report.results)),
    }
}

pub fn write_report(report: &RunReport, format: OutputFormat, out: &Path) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => std::fs::write(out, console::format_report(report))?,
        OutputFormat::Json => json::write_json(report, out)?,
        OutputFormat::Csv => csv::write_csv(&report.results, out)?,
    }
    Ok(())
}

/// `yes,no | yes`: one group per visited layer.
pub fn format_trail(trail: &[Vec<Answer>]) -> String {
    trail
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(Answer::as_str)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
