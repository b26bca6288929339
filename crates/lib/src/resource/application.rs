use std::collections::BTreeMap;

use serde_json::Value;

use super::{MappingError, Resource};
use crate::models::{AppSource, ApplicationModel, DockerImage, HealthCheck, HealthCheckType};

const KIND: &str = "application";

/// Map an application resource into an [`ApplicationModel`].
///
/// Expects the record as returned with `inline-relations-depth=2`, so that
/// `stack`, `service_bindings[].service_instance` and `routes` are inlined
/// when present. Routes themselves are attached later from the route
/// listing; only their identifiers are read here.
pub fn map_application(raw: &Value) -> Result<ApplicationModel, MappingError> {
  let Resource { guid, entity } = Resource::parse(raw, KIND)?;

  let name = entity.required_str("name")?.to_string();
  let memory = entity.required_u64("memory")?;
  let disk_quota = entity.required_u64("disk_quota")?;
  let instances = entity.required_u64("instances")?;

  let stack = match entity.inline("stack", "stack")? {
    Some(stack) => stack.non_empty_str("name")?.map(str::to_string),
    None => None,
  };

  let buildpack = entity.non_empty_str("buildpack")?;
  let docker_image = entity.non_empty_str("docker_image")?;
  let source = match (buildpack, docker_image) {
    (Some(_), Some(_)) => {
      return Err(MappingError::malformed(
        KIND,
        format!("`{}` has both a buildpack and a docker image", name),
      ));
    }
    (_, Some(image)) => {
      let (username, password) = match entity.optional_object("docker_credentials")? {
        Some(creds) => (
          non_empty(creds.get("username")),
          non_empty(creds.get("password")),
        ),
        None => (None, None),
      };
      AppSource::Docker(DockerImage {
        image: image.to_string(),
        username,
        password,
      })
    }
    (buildpack, None) => AppSource::Buildpack(buildpack.map(str::to_string)),
  };

  let kind = match entity.non_empty_str("health_check_type")? {
    Some(value) => HealthCheckType::parse(value),
    None => HealthCheckType::Port,
  };
  let health_check = HealthCheck {
    kind,
    http_endpoint: entity.non_empty_str("health_check_http_endpoint")?.map(str::to_string),
    timeout: entity.optional_u64("health_check_timeout")?.unwrap_or(0),
  };

  let env: BTreeMap<String, Value> = entity
    .optional_object("environment_json")?
    .map(|vars| vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    .unwrap_or_default();

  let mut services = Vec::new();
  for binding in entity.optional_array("service_bindings")? {
    let binding = Resource::parse(binding, "service binding")?;
    let instance = binding
      .entity
      .inline("service_instance", "service instance")?
      .ok_or_else(|| MappingError::malformed("service binding", "missing inlined `service_instance`"))?;
    services.push(instance.required_str("name")?.to_string());
  }

  let mut route_guids = Vec::new();
  for route in entity.optional_array("routes")? {
    route_guids.push(Resource::parse(route, "route")?.guid.to_string());
  }

  Ok(ApplicationModel {
    guid: guid.to_string(),
    name,
    memory,
    disk_quota,
    instances,
    stack,
    command: entity.non_empty_str("command")?.map(str::to_string),
    source,
    health_check,
    env,
    services,
    route_guids,
    routes: Vec::new(),
  })
}

fn non_empty(value: Option<&Value>) -> Option<String> {
  value
    .and_then(Value::as_str)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
}
