use crate::report::format_trail;
use crate::session::ResultRow;
use std::path::Path;

const HEADER: &str = "index,id,title,main_answer,trail,verdict";

pub fn to_csv(rows: &[ResultRow]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for r in rows {
        let main = r.main_answer.map(|a| a.as_str()).unwrap_or("");
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            r.index,
            escape(&r.id),
            escape(&r.title),
            main,
            escape(&format_trail(&r.trail)),
            r.verdict
        ));
    }
    out
}

pub fn write_csv(rows: &[ResultRow], out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, to_csv(rows))?;
    Ok(())
}

fn escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
