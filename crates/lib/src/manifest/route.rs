use super::ManifestError;
use crate::models::RouteModel;

/// Render a route as it appears under `routes` in a manifest.
///
/// - `host.domain/path` for HTTP routes
/// - `domain/path` when there is no hostname
/// - `domain:port` for TCP routes
///
/// A route with both a hostname and a port does not exist on the platform and
/// fails with [`ManifestError::InvalidRoute`].
pub fn render_route(route: &RouteModel) -> Result<String, ManifestError> {
  match (route.host.is_empty(), route.port) {
    (false, Some(port)) => Err(ManifestError::InvalidRoute {
      host: route.host.clone(),
      domain: route.domain.clone(),
      port,
    }),
    (true, Some(port)) => Ok(format!("{}:{}", route.domain, port)),
    (false, None) => Ok(format!("{}.{}{}", route.host, route.domain, route.path)),
    (true, None) => Ok(format!("{}{}", route.domain, route.path)),
  }
}
