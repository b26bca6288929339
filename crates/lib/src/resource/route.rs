use serde_json::Value;

use super::{MappingError, Resource};
use crate::models::RouteModel;

const KIND: &str = "route";

/// Map a route resource (listed with `inline-relations-depth=1`) into a
/// [`RouteModel`].
///
/// `host` and `path` default to empty; `port` is only present on TCP routes.
pub fn map_route(raw: &Value) -> Result<RouteModel, MappingError> {
  let Resource { guid, entity } = Resource::parse(raw, KIND)?;

  let domain = entity
    .inline("domain", "domain")?
    .ok_or_else(|| MappingError::malformed(KIND, "missing inlined `domain`"))?
    .required_str("name")?
    .to_string();

  let port = match entity.optional_i64("port")? {
    Some(port) => Some(
      u16::try_from(port).map_err(|_| MappingError::malformed(KIND, format!("port {} is out of range", port)))?,
    ),
    None => None,
  };

  Ok(RouteModel {
    guid: guid.to_string(),
    host: entity.optional_str("host")?.unwrap_or_default().to_string(),
    domain,
    port,
    path: entity.optional_str("path")?.unwrap_or_default().to_string(),
  })
}
