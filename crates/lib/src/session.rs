//! Session state: targeted endpoint, login, org and space.
//!
//! The session is read from the platform CLI's config file so an existing
//! `cf login` is reused. Only the keys below are read; everything else in the
//! file is ignored.
//!
//! ```json
//! {
//!   "Target": "https://api.example.com",
//!   "AccessToken": "bearer eyJhbGciOi...",
//!   "SSLDisabled": false,
//!   "OrganizationFields": { "GUID": "...", "Name": "my-org" },
//!   "SpaceFields": { "GUID": "...", "Name": "my-space" }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::api::ApiError;

/// Shown in place of the user name when the access token cannot be decoded.
const UNKNOWN_USER: &str = "unknown";

/// Errors that can occur while loading the session config.
#[derive(Debug, Error)]
pub enum SessionError {
  #[error("failed to read config file {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse config file {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    source: serde_json::Error,
  },
}

/// Name and identifier of a targeted org or space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TargetFields {
  #[serde(rename = "GUID")]
  pub guid: String,
  #[serde(rename = "Name")]
  pub name: String,
}

/// The subset of the platform CLI's `config.json` this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CfConfig {
  #[serde(rename = "Target")]
  pub target: String,
  #[serde(rename = "AccessToken")]
  pub access_token: String,
  #[serde(rename = "SSLDisabled")]
  pub ssl_disabled: bool,
  #[serde(rename = "OrganizationFields")]
  pub organization: TargetFields,
  #[serde(rename = "SpaceFields")]
  pub space: TargetFields,
}

impl CfConfig {
  /// Load the config file at `path`.
  ///
  /// A missing file is an empty config, which later fails with
  /// [`ApiError::NoEndpointSet`].
  pub fn load(path: &Path) -> Result<Self, SessionError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
      Err(e) => {
        return Err(SessionError::Read {
          path: path.to_path_buf(),
          source: e,
        });
      }
    };

    serde_json::from_str(&content).map_err(|e| SessionError::Parse {
      path: path.to_path_buf(),
      source: e,
    })
  }

  /// Check the endpoint and login and build a [`SessionContext`].
  ///
  /// Org and space are carried along when targeted; commands that need them
  /// call [`SessionContext::target`].
  pub fn session(&self) -> Result<SessionContext, ApiError> {
    if self.target.is_empty() {
      return Err(ApiError::NoEndpointSet);
    }
    if self.access_token.is_empty() {
      return Err(ApiError::Unauthenticated);
    }

    let user = user_from_token(&self.access_token).unwrap_or_else(|| {
      warn!("could not read the user name from the access token");
      UNKNOWN_USER.to_string()
    });

    Ok(SessionContext {
      api_endpoint: self.target.clone(),
      access_token: self.access_token.clone(),
      skip_ssl_validation: self.ssl_disabled,
      user,
      org: Some(self.organization.clone()).filter(|o| !o.guid.is_empty()),
      space: Some(self.space.clone()).filter(|s| !s.guid.is_empty()),
    })
  }
}

/// A validated, read-only view of the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
  pub api_endpoint: String,
  pub access_token: String,
  pub skip_ssl_validation: bool,
  pub user: String,
  pub org: Option<TargetFields>,
  pub space: Option<TargetFields>,
}

impl SessionContext {
  /// The targeted org and space, or the error for whichever is missing.
  pub fn target(&self) -> Result<(&TargetFields, &TargetFields), ApiError> {
    let org = self.org.as_ref().ok_or(ApiError::NoOrgTargeted)?;
    let space = self.space.as_ref().ok_or(ApiError::NoSpaceTargeted)?;
    Ok((org, space))
  }
}

/// Extract the `user_name` claim from a (possibly `bearer `-prefixed) JWT.
fn user_from_token(token: &str) -> Option<String> {
  let token = token
    .split_once(' ')
    .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
    .map_or(token, |(_, rest)| rest);
  let payload = token.split('.').nth(1)?;
  let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
  let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
  claims.get("user_name")?.as_str().map(str::to_string)
}
