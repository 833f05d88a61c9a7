pub const APP_NAME: &str = "issue-lens";

/// Prefix for environment variables consulted by the config resolver.
pub const ENV_PREFIX: &str = "ISSUE_LENS_";
/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "config.json";
/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ISSUE_LENS_CONFIG";

pub const DATA_PATH_PARAM: &str = "data_path";
pub const DEFAULT_DATA_PATH: &str = "data/issues.json";

// Exit statuses
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_DATA_ERROR: i32 = 65;

// Event types the analyses look for
pub const EVENT_COMMENTED: &str = "commented";
pub const EVENT_REOPENED: &str = "reopened";
