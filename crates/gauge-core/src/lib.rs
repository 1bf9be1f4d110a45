pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod report;
pub mod script;
pub mod session;

// Convenience re-exports
pub use catalog::{load_catalog, Answer, Catalog, CatalogError, LoadedCatalog};
pub use config::{load_config, ConfigError, GaugeConfig, OutputFormat};
pub use engine::{FinalVerdict, Verdict};
pub use errors::{EvaluationError, SessionError};
pub use report::RunReport;
pub use script::{load_script, replay, AnswerScript, Event, ScriptError};
pub use session::{Prompt, Questionnaire, Transition};
