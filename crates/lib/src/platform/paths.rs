use std::path::PathBuf;

use crate::consts::{CF_DIR_NAME, CONFIG_FILENAME};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  let userprofile = std::env::var("USERPROFILE").unwrap_or_default();
  PathBuf::from(userprofile)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  let home = std::env::var("HOME").unwrap_or_default();
  PathBuf::from(home)
}

/// Returns the platform CLI's state directory.
///
/// `$CF_HOME/.cf` when `CF_HOME` is set, `~/.cf` otherwise.
pub fn cf_dir() -> PathBuf {
  let base = std::env::var("CF_HOME")
    .ok()
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(home_dir);
  base.join(CF_DIR_NAME)
}

/// Returns the path of the session config file.
pub fn config_path() -> PathBuf {
  cf_dir().join(CONFIG_FILENAME)
}
