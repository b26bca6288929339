//! Control-plane access.
//!
//! The manifest pipeline only talks to the platform through [`ControlPlane`],
//! which hands back raw resource payloads for the resource mapper. The HTTP
//! implementation lives in [`http`].

pub mod http;

use serde_json::Value;
use thiserror::Error;

pub use http::HttpClient;

/// Errors surfaced by the control plane and session checks.
///
/// The environment variants carry the exact message shown to users.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("No API endpoint set. Use 'cf login' or 'cf api' to target an endpoint.")]
  NoEndpointSet,

  #[error("Not logged in. Use 'cf login' to log in.")]
  Unauthenticated,

  #[error("No org targeted, use 'cf target -o ORG' to target an org.")]
  NoOrgTargeted,

  #[error("No space targeted, use 'cf target -s SPACE' to target a space.")]
  NoSpaceTargeted,

  #[error("{kind} {name} not found")]
  NotFound { kind: &'static str, name: String },

  #[error("request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("server error, status code: {status}, response: {body}")]
  Status { status: u16, body: String },

  #[error("invalid response from {url}: {reason}")]
  InvalidResponse { url: String, reason: String },
}

/// Read access to the platform's application, route and quota records.
///
/// Implementations return the raw `{ metadata, entity }` resources; turning
/// them into models is the job of [`crate::resource`].
pub trait ControlPlane {
  /// Look up an application by name in the targeted space.
  fn get_application(&self, name: &str) -> Result<Value, ApiError>;

  /// All routes bound to an application, in binding order, with their domain inlined.
  fn get_routes(&self, app_guid: &str) -> Result<Vec<Value>, ApiError>;

  /// A quota definition by identifier.
  fn get_quota(&self, guid: &str) -> Result<Value, ApiError>;
}
