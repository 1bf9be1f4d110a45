use clap::{Parser, Subcommand, ValueEnum};
use gauge_core::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gauge",
    version,
    about = "Branching yes/no questionnaires with deterministic pass/fail verdicts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load and validate a catalog
    Validate(ValidateArgs),
    /// Print a catalog's item, branch and layer tree
    Show(ShowArgs),
    /// Replay a recorded answer script and report the verdicts
    Replay(ReplayArgs),
    /// Answer a catalog interactively
    Run(RunArgs),
    /// Write a starter gauge.yaml
    Init(InitArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl From<ReportFormat> for OutputFormat {
    fn from(f: ReportFormat) -> Self {
        match f {
            ReportFormat::Text => OutputFormat::Text,
            ReportFormat::Json => OutputFormat::Json,
            ReportFormat::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum ValidateOutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Catalog file path or built-in name (e.g. builtin:home-safety)
    #[arg(long, default_value = gauge_core::config::DEFAULT_CATALOG, env = "GAUGE_CATALOG")]
    pub catalog: String,

    #[arg(long, value_enum, default_value_t = ValidateOutputFormat::Text)]
    pub format: ValidateOutputFormat,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ShowArgs {
    #[arg(long, default_value = gauge_core::config::DEFAULT_CATALOG, env = "GAUGE_CATALOG")]
    pub catalog: String,
}

/// Settings shared by commands that produce a report. Flags override the
/// config file; without `--config`, `./gauge.yaml` is used when present.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct SessionArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "GAUGE_CATALOG")]
    pub catalog: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Answer script (YAML or JSON)
    #[arg(long)]
    pub script: PathBuf,

    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(clap::Args, Clone, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(clap::Args, Clone, Debug)]
pub struct InitArgs {
    #[arg(long, default_value = "gauge.yaml")]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_replay_flags() {
        let cli = Cli::try_parse_from([
            "gauge", "replay", "--script", "s.yaml", "--format", "csv", "--catalog", "x.yaml",
        ])
        .unwrap();
        match cli.cmd {
            Command::Replay(args) => {
                assert_eq!(args.script, PathBuf::from("s.yaml"));
                assert_eq!(args.session.format, Some(ReportFormat::Csv));
                assert_eq!(args.session.catalog.as_deref(), Some("x.yaml"));
                assert!(args.session.config.is_none());
            }
            _ => panic!("expected replay"),
        }
    }
}
