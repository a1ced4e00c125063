//! Constants used throughout convext

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Environment variables consulted, in order, to resolve the current culture
pub const CULTURE_ENV_VARS: &[&str] = &["LC_ALL", "LC_NUMERIC", "LANG"];

/// Literal accepted as `true` by boolean coercion besides `"true"`
pub const TRUE_DIGIT: &str = "1";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
