//! Exit codes. Part of the CLI contract; scripts and CI depend on them.

pub const OK: i32 = 0; // Every item passed (or nothing to judge)
pub const FAILED: i32 = 1; // Some item failed, or the run is incomplete
pub const CONFIG_ERROR: i32 = 2; // Config, catalog or script could not be loaded
pub const SCRIPT_REJECTED: i32 = 3; // Answer script contained an invalid event
