use super::args::*;
use crate::exit_codes;
use anyhow::Context;
use gauge_core::config::{load_config, GaugeConfig};
use gauge_core::report::{render, write_report, RunReport};
use std::path::PathBuf;

pub mod init;
pub mod replay;
pub mod run;
pub mod show;
pub mod validate;

pub const DEFAULT_CONFIG_FILE: &str = "gauge.yaml";

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Validate(args) => validate::run(args),
        Command::Show(args) => show::run(args),
        Command::Replay(args) => replay::run(args),
        Command::Run(args) => run::run(args),
        Command::Init(args) => init::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// Config file (explicit, or `./gauge.yaml` when present) overlaid with
/// command-line flags.
pub(crate) fn resolve_settings(args: &SessionArgs) -> Result<GaugeConfig, gauge_core::ConfigError> {
    let path = args.config.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    });
    let mut cfg = match path {
        Some(p) => {
            tracing::debug!(config = %p.display(), "loading config");
            load_config(&p)?
        }
        None => GaugeConfig::default(),
    };
    if let Some(catalog) = &args.catalog {
        cfg.catalog = catalog.clone();
    }
    if let Some(format) = args.format {
        cfg.output.format = format.into();
    }
    if let Some(out) = &args.output {
        cfg.output.path = Some(out.clone());
    }
    Ok(cfg)
}

/// Print or export a report according to the output settings.
pub(crate) fn emit_report(report: &RunReport, cfg: &GaugeConfig) -> anyhow::Result<()> {
    match cfg.output.path.as_deref() {
        Some(out) => {
            write_report(report, cfg.output.format, out)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            eprintln!("Report written to {}", out.display());
        }
        None => print!("{}", render(report, cfg.output.format)?),
    }
    Ok(())
}

/// 0 when every item passed, 1 otherwise.
pub(crate) fn decide_exit(report: &RunReport) -> i32 {
    if report.complete && report.summary.all_passed() {
        exit_codes::OK
    } else {
        exit_codes::FAILED
    }
}
