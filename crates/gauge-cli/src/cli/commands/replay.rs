use gauge_core::catalog::load_catalog;
use gauge_core::report::RunReport;
use gauge_core::script::{load_script, replay, ScriptError};
use gauge_core::session::Questionnaire;

use super::{decide_exit, emit_report, resolve_settings};
use crate::cli::args::ReplayArgs;
use crate::exit_codes;

pub fn run(args: ReplayArgs) -> anyhow::Result<i32> {
    let cfg = match resolve_settings(&args.session) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let loaded = match load_catalog(&cfg.catalog) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let script = match load_script(&args.script) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let mut q = Questionnaire::new(loaded.catalog.clone());
    let rejected = match replay(&mut q, &script.events) {
        Ok(outcome) => {
            tracing::info!(
                script = %args.script.display(),
                events = outcome.applied,
                "script replayed"
            );
            false
        }
        Err(e @ ScriptError::Rejected { .. }) => {
            eprintln!("error: {e}");
            true
        }
        Err(e) => return Err(e.into()),
    };

    let report = RunReport::new(&loaded, &q);
    emit_report(&report, &cfg)?;

    if rejected {
        return Ok(exit_codes::SCRIPT_REJECTED);
    }
    Ok(decide_exit(&report))
}
