use serde_json::Value;

use super::{MappingError, Resource};
use crate::models::QuotaFields;

const KIND: &str = "quota";

/// Map a quota definition resource into [`QuotaFields`].
///
/// `app_instance_limit` and `total_reserved_route_ports` were added in later
/// API versions: when absent they become `""` and `0`. The instance limit is
/// kept as text so an unlimited sentinel survives mapping untouched.
pub fn map_quota(raw: &Value) -> Result<QuotaFields, MappingError> {
  let Resource { guid, entity } = Resource::parse(raw, KIND)?;

  Ok(QuotaFields {
    guid: guid.to_string(),
    name: entity.required_str("name")?.to_string(),
    memory_limit: entity.required_i64("memory_limit")?,
    instance_memory_limit: entity.required_i64("instance_memory_limit")?,
    routes_limit: entity.required_i64("total_routes")?,
    services_limit: entity.required_i64("total_services")?,
    non_basic_services_allowed: entity.required_bool("non_basic_services_allowed")?,
    app_instance_limit: entity.optional_text("app_instance_limit")?.unwrap_or_default(),
    reserved_route_ports: entity.optional_i64("total_reserved_route_ports")?.unwrap_or(0),
  })
}
