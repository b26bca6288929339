/// Name of the platform CLI's home directory, relative to `$CF_HOME` or `$HOME`.
pub const CF_DIR_NAME: &str = ".cf";

/// Session config file inside [`CF_DIR_NAME`].
pub const CONFIG_FILENAME: &str = "config.json";

/// Suffix appended to the application name for the default manifest path.
pub const MANIFEST_SUFFIX: &str = "_manifest.yml";

/// Health check type the platform assumes when none is configured.
pub const DEFAULT_HEALTH_CHECK_TYPE: &str = "port";

/// Request timeout for control-plane calls, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 60;
