//! The `create-app-manifest` pipeline.
//!
//! Fetch the application and its routes, map them, assemble the manifest and
//! write it. Each step runs only after the previous one succeeded, so no file
//! is touched unless the whole manifest could be built.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::api::{ApiError, ControlPlane};
use crate::manifest::{ManifestError, WriteError, assemble, default_manifest_path, write_manifest};
use crate::models::RouteModel;
use crate::resource::{MappingError, map_application, map_route};

/// Errors that can occur while creating a manifest.
#[derive(Debug, Error)]
pub enum CreateError {
  #[error("App {name} not found")]
  AppNotFound { name: String },

  #[error(transparent)]
  Api(ApiError),

  #[error("failed to build manifest: {0}")]
  Mapping(#[from] MappingError),

  #[error("failed to build manifest: {0}")]
  Assemble(#[from] ManifestError),

  #[error(transparent)]
  Write(#[from] WriteError),
}

/// What to build and where to put it.
#[derive(Debug, Clone)]
pub struct CreateOptions {
  pub app_name: String,
  /// Target file; `./<app>_manifest.yml` when `None`.
  pub path: Option<PathBuf>,
}

/// Build the manifest for one application and write it.
///
/// Returns the path the manifest was written to.
pub fn create_app_manifest<C>(client: &C, options: &CreateOptions) -> Result<PathBuf, CreateError>
where
  C: ControlPlane + ?Sized,
{
  debug!(app = %options.app_name, "fetching application");
  let raw_app = client.get_application(&options.app_name).map_err(|e| match e {
    ApiError::NotFound { .. } => CreateError::AppNotFound {
      name: options.app_name.clone(),
    },
    other => CreateError::Api(other),
  })?;
  let mut app = map_application(&raw_app)?;

  debug!(app = %app.name, guid = %app.guid, "fetching routes");
  let raw_routes = client.get_routes(&app.guid).map_err(CreateError::Api)?;
  let routes = raw_routes.iter().map(map_route).collect::<Result<Vec<_>, _>>()?;
  app.routes = order_by_binding(routes, &app.route_guids);

  let doc = assemble(std::slice::from_ref(&app))?;

  let path = options
    .path
    .clone()
    .unwrap_or_else(|| default_manifest_path(&options.app_name));
  write_manifest(&doc, &path)?;

  Ok(path)
}

/// Order routes like the application record lists them.
///
/// Routes the record does not mention keep their relative order at the end;
/// without identifiers on the record the listing order is kept as is.
fn order_by_binding(mut routes: Vec<RouteModel>, route_guids: &[String]) -> Vec<RouteModel> {
  if !route_guids.is_empty() {
    routes.sort_by_key(|route| {
      route_guids
        .iter()
        .position(|guid| *guid == route.guid)
        .unwrap_or(usize::MAX)
    });
  }
  routes
}
