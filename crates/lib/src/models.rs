//! Typed domain models produced by the resource mapper.
//!
//! Every attribute the control plane introduced after its initial API version
//! is either an `Option` or coalesced to its zero value during mapping, so a
//! model never depends on the API version it was read from.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::consts::DEFAULT_HEALTH_CHECK_TYPE;

/// A deployed application, as far as the manifest is concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationModel {
  pub guid: String,
  pub name: String,
  /// Memory limit in MB.
  pub memory: u64,
  /// Disk quota in MB.
  pub disk_quota: u64,
  pub instances: u64,
  pub stack: Option<String>,
  pub command: Option<String>,
  pub source: AppSource,
  pub health_check: HealthCheck,
  /// Environment variables. Sorted by key so rendering is deterministic.
  pub env: BTreeMap<String, serde_json::Value>,
  /// Names of bound service instances, in binding order.
  pub services: Vec<String>,
  /// Identifiers of bound routes, in binding order, when the record carried them.
  pub route_guids: Vec<String>,
  /// Bound routes, in binding order.
  pub routes: Vec<RouteModel>,
}

/// Where the application's runnable image comes from.
///
/// The two are mutually exclusive on the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum AppSource {
  /// Staged by a buildpack. `None` means the platform auto-detected it.
  Buildpack(Option<String>),
  /// A pre-built container image.
  Docker(DockerImage),
}

#[derive(Clone, PartialEq)]
pub struct DockerImage {
  pub image: String,
  pub username: Option<String>,
  /// Registry password, if the control plane returned one. Never rendered.
  pub password: Option<String>,
}

impl fmt::Debug for DockerImage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DockerImage")
      .field("image", &self.image)
      .field("username", &self.username)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthCheckType {
  Port,
  Process,
  Http,
  None,
  /// A type this crate does not know yet, carried through verbatim.
  Other(String),
}

impl HealthCheckType {
  pub fn parse(value: &str) -> Self {
    match value {
      "port" => Self::Port,
      "process" => Self::Process,
      "http" => Self::Http,
      "none" => Self::None,
      other => Self::Other(other.to_string()),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Port => DEFAULT_HEALTH_CHECK_TYPE,
      Self::Process => "process",
      Self::Http => "http",
      Self::None => "none",
      Self::Other(name) => name,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthCheck {
  pub kind: HealthCheckType,
  pub http_endpoint: Option<String>,
  /// Start timeout in seconds, 0 when unset.
  pub timeout: u64,
}

impl Default for HealthCheck {
  fn default() -> Self {
    Self {
      kind: HealthCheckType::Port,
      http_endpoint: None,
      timeout: 0,
    }
  }
}

/// A route bound to an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteModel {
  pub guid: String,
  /// Empty for hostname-less and TCP routes.
  pub host: String,
  pub domain: String,
  /// Present only for TCP routes.
  pub port: Option<u16>,
  /// Context path, empty when unset.
  pub path: String,
}

/// A quota definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaFields {
  pub guid: String,
  pub name: String,
  pub memory_limit: i64,
  pub instance_memory_limit: i64,
  pub routes_limit: i64,
  pub services_limit: i64,
  pub non_basic_services_allowed: bool,
  /// Raw text of the app instance limit; empty when the API predates it.
  pub app_instance_limit: String,
  /// 0 when the API predates the field.
  pub reserved_route_ports: i64,
}

/// Interpreted app instance limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceLimit {
  /// The control plane did not report a limit.
  Unspecified,
  Unlimited,
  Limited(u64),
}

impl fmt::Display for InstanceLimit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unspecified => write!(f, "unspecified"),
      Self::Unlimited => write!(f, "unlimited"),
      Self::Limited(n) => write!(f, "{}", n),
    }
  }
}

impl QuotaFields {
  /// Interprets [`QuotaFields::app_instance_limit`].
  ///
  /// Returns `None` when the text is neither a count nor an unlimited sentinel.
  pub fn instance_limit(&self) -> Option<InstanceLimit> {
    let raw = self.app_instance_limit.trim();
    if raw.is_empty() {
      return Some(InstanceLimit::Unspecified);
    }
    if raw == "-1" || raw.eq_ignore_ascii_case("unlimited") {
      return Some(InstanceLimit::Unlimited);
    }
    raw.parse().ok().map(InstanceLimit::Limited)
  }
}
