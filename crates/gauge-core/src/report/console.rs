use crate::catalog::{Catalog, Layer};
use crate::engine::Verdict;
use crate::report::{format_trail, RunReport};
use crate::session::Summary;
use std::fmt::Write;

fn icon(v: Verdict) -> &'static str {
    match v {
        Verdict::Pass => "✅",
        Verdict::Fail => "❌",
        Verdict::Pending | Verdict::Ambiguous => "⏳",
    }
}

/// Result table followed by the summary line. Deterministic, unit-testable.
#[must_use]
pub fn format_report(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Catalog: {} v{} ({})",
        report.catalog, report.catalog_version, report.catalog_digest
    );
    out.push('\n');
    for r in &report.results {
        let main = r.main_answer.map(|a| a.as_str()).unwrap_or("—");
        let trail = format_trail(&r.trail);
        let _ = writeln!(
            out,
            "{} {:>2}. {:<20} {:<4} {:<24} {}",
            icon(r.verdict),
            r.index + 1,
            r.id,
            main,
            if trail.is_empty() { "—" } else { trail.as_str() },
            r.verdict.as_str().to_uppercase()
        );
    }
    out.push('\n');
    out.push_str(&format_summary_line(&report.summary));
    out.push('\n');
    out
}

#[must_use]
pub fn format_summary_line(s: &Summary) -> String {
    format!(
        "Summary: {} passed, {} failed, {} pending (total {})",
        s.passed, s.failed, s.pending, s.total
    )
}

/// Indented item/branch/layer outline of a catalog.
#[must_use]
pub fn format_catalog_tree(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} v{}", catalog.name, catalog.version);
    for (i, item) in catalog.items.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. [{}] {}", i + 1, item.id, item.title);
        for (label, branch) in [("on_yes", &item.on_yes), ("on_no", &item.on_no)] {
            let _ = write!(out, "      {}: ", label);
            write_layer(&mut out, branch, 3);
        }
    }
    out
}

fn write_layer(out: &mut String, layer: &Layer, indent: usize) {
    let _ = writeln!(out, "{}", layer.pass_condition);
    let pad = "  ".repeat(indent + 1);
    for (i, q) in layer.questions.iter().enumerate() {
        let _ = writeln!(out, "{}{}. ({}) {}", pad, i + 1, q.example, q.title);
    }
    if let Some(chain) = &layer.chain {
        let _ = write!(out, "{}else if {} -> ", pad, chain.condition);
        write_layer(out, &chain.next, indent + 1);
    }
}
