mod create_app_manifest;
mod quota;

pub use create_app_manifest::cmd_create_app_manifest;
pub use quota::cmd_quota;

use anyhow::Result;

use appmf_lib::platform::paths;
use appmf_lib::session::{CfConfig, SessionContext};

/// Load the session from the platform CLI's config and check endpoint and login.
fn load_session() -> Result<SessionContext> {
  let config = CfConfig::load(&paths::config_path())?;
  Ok(config.session()?)
}
