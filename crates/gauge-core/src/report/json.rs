use crate::report::RunReport;
use std::path::Path;

pub fn to_json(report: &RunReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn write_json(report: &RunReport, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, to_json(report)?)?;
    Ok(())
}
