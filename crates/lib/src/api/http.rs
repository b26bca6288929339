//! Blocking HTTP client for the v2 control-plane API.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use super::{ApiError, ControlPlane};
use crate::consts::HTTP_TIMEOUT_SECS;
use crate::session::SessionContext;

/// [`ControlPlane`] over HTTP, authenticated with the session's access token.
#[derive(Debug, Clone)]
pub struct HttpClient {
  client: Client,
  endpoint: String,
  access_token: String,
  space_guid: Option<String>,
}

impl HttpClient {
  /// Build a client for the session's endpoint.
  ///
  /// Certificate verification is disabled when the session says so.
  pub fn new(session: &SessionContext) -> Result<Self, ApiError> {
    let endpoint = session.api_endpoint.trim_end_matches('/').to_string();
    let client = Client::builder()
      .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
      .danger_accept_invalid_certs(session.skip_ssl_validation)
      .build()
      .map_err(|source| ApiError::Transport {
        url: endpoint.clone(),
        source,
      })?;

    Ok(Self {
      client,
      endpoint,
      access_token: session.access_token.clone(),
      space_guid: session.space.as_ref().map(|s| s.guid.clone()),
    })
  }

  /// GET `path` (which may carry its own query string) plus `query`.
  ///
  /// A 404 becomes [`ApiError::NotFound`] for `kind`/`name`.
  fn get_json(&self, path: &str, query: &[(&str, String)], kind: &'static str, name: &str) -> Result<Value, ApiError> {
    let url = format!("{}{}", self.endpoint, path);
    debug!(%url, "GET");

    let response = self
      .client
      .get(&url)
      .query(query)
      .header(AUTHORIZATION, &self.access_token)
      .header(ACCEPT, "application/json")
      .header(USER_AGENT, concat!("appmf/", env!("CARGO_PKG_VERSION")))
      .send()
      .map_err(|source| ApiError::Transport {
        url: url.clone(),
        source,
      })?;

    let status = response.status();
    debug!(%url, status = status.as_u16(), "response");
    match status {
      StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthenticated),
      StatusCode::NOT_FOUND => {
        return Err(ApiError::NotFound {
          kind,
          name: name.to_string(),
        });
      }
      s if !s.is_success() => {
        let body = response.text().unwrap_or_default();
        return Err(ApiError::Status {
          status: s.as_u16(),
          body,
        });
      }
      _ => {}
    }

    response.json::<Value>().map_err(|e| ApiError::InvalidResponse {
      url,
      reason: e.to_string(),
    })
  }
}

fn resources(page: &Value, url: &str) -> Result<Vec<Value>, ApiError> {
  page
    .get("resources")
    .and_then(Value::as_array)
    .cloned()
    .ok_or_else(|| ApiError::InvalidResponse {
      url: url.to_string(),
      reason: "missing `resources` list".to_string(),
    })
}

impl ControlPlane for HttpClient {
  fn get_application(&self, name: &str) -> Result<Value, ApiError> {
    let space_guid = self.space_guid.as_deref().ok_or(ApiError::NoSpaceTargeted)?;
    let query = [
      ("q", format!("name:{}", name)),
      ("q", format!("space_guid:{}", space_guid)),
      ("inline-relations-depth", "2".to_string()),
    ];
    let page = self.get_json("/v2/apps", &query, "App", name)?;

    resources(&page, "/v2/apps")?
      .into_iter()
      .next()
      .ok_or_else(|| ApiError::NotFound {
        kind: "App",
        name: name.to_string(),
      })
  }

  fn get_routes(&self, app_guid: &str) -> Result<Vec<Value>, ApiError> {
    let mut routes = Vec::new();
    let mut path = format!("/v2/apps/{}/routes", app_guid);
    let mut query = vec![("inline-relations-depth", "1".to_string())];

    loop {
      let page = self.get_json(&path, &query, "App", app_guid)?;
      routes.extend(resources(&page, &path)?);

      match page.get("next_url").and_then(Value::as_str) {
        Some(next) if !next.is_empty() => {
          path = next.to_string();
          query.clear();
        }
        _ => break,
      }
    }

    debug!(app_guid, count = routes.len(), "fetched routes");
    Ok(routes)
  }

  fn get_quota(&self, guid: &str) -> Result<Value, ApiError> {
    self.get_json(&format!("/v2/quota_definitions/{}", guid), &[], "Quota", guid)
  }
}
