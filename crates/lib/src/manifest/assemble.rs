use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::{ApplicationEntry, ManifestDocument, ManifestError, format_megabytes, render_route};
use crate::models::{AppSource, ApplicationModel, HealthCheckType};

/// An optional manifest key: when it appears and how its value is produced.
///
/// Adding a key to manifests means adding one entry to [`SECTIONS`].
struct Section {
  key: &'static str,
  include: fn(&ApplicationModel) -> bool,
  render: fn(&ApplicationModel) -> Result<Value, ManifestError>,
}

const SECTIONS: &[Section] = &[
  Section {
    key: "buildpack",
    include: has_buildpack,
    render: render_buildpack,
  },
  Section {
    key: "command",
    include: has_command,
    render: render_command,
  },
  Section {
    key: "disk_quota",
    include: has_disk_quota,
    render: render_disk_quota,
  },
  Section {
    key: "docker",
    include: has_docker,
    render: render_docker,
  },
  Section {
    key: "env",
    include: has_env,
    render: render_env,
  },
  Section {
    key: "health-check-http-endpoint",
    include: has_http_endpoint,
    render: render_http_endpoint,
  },
  Section {
    key: "health-check-type",
    include: has_health_check_type,
    render: render_health_check_type,
  },
  Section {
    key: "instances",
    include: has_instances,
    render: render_instances,
  },
  Section {
    key: "memory",
    include: has_memory,
    render: render_memory,
  },
  Section {
    key: "routes",
    include: has_routes,
    render: render_routes,
  },
  Section {
    key: "services",
    include: has_services,
    render: render_services,
  },
  Section {
    key: "stack",
    include: has_stack,
    render: render_stack,
  },
  Section {
    key: "timeout",
    include: has_timeout,
    render: render_timeout,
  },
];

/// Assemble application models into a manifest document.
///
/// Each application starts with `name`; every other key whose include
/// predicate holds follows in lexicographic order. Applications keep the
/// order they were given in.
pub fn assemble(apps: &[ApplicationModel]) -> Result<ManifestDocument, ManifestError> {
  let mut sections: Vec<&Section> = SECTIONS.iter().collect();
  sections.sort_by_key(|section| section.key);

  let mut applications = Vec::with_capacity(apps.len());
  for app in apps {
    let mut entry = ApplicationEntry::default();
    entry.push("name", Value::from(app.name.as_str()));
    for section in &sections {
      if (section.include)(app) {
        entry.push(section.key, (section.render)(app)?);
      }
    }
    debug!(app = %app.name, keys = entry.keys().count(), "assembled manifest entry");
    applications.push(entry);
  }

  Ok(ManifestDocument { applications })
}

fn text(value: &Option<String>) -> Value {
  Value::from(value.clone().unwrap_or_default())
}

fn has_buildpack(app: &ApplicationModel) -> bool {
  matches!(&app.source, AppSource::Buildpack(Some(name)) if !name.is_empty())
}

fn render_buildpack(app: &ApplicationModel) -> Result<Value, ManifestError> {
  match &app.source {
    AppSource::Buildpack(name) => Ok(text(name)),
    AppSource::Docker(_) => Ok(Value::Null),
  }
}

fn has_command(app: &ApplicationModel) -> bool {
  app.command.as_deref().is_some_and(|c| !c.is_empty())
}

fn render_command(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(text(&app.command))
}

fn has_disk_quota(app: &ApplicationModel) -> bool {
  app.disk_quota > 0
}

fn render_disk_quota(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(Value::from(format_megabytes(app.disk_quota)))
}

fn has_docker(app: &ApplicationModel) -> bool {
  matches!(app.source, AppSource::Docker(_))
}

/// `image` and `username` only. The registry password is supplied at push
/// time and never belongs in a manifest.
fn render_docker(app: &ApplicationModel) -> Result<Value, ManifestError> {
  let mut docker = Mapping::new();
  if let AppSource::Docker(image) = &app.source {
    docker.insert(Value::from("image"), Value::from(image.image.as_str()));
    if let Some(username) = &image.username {
      docker.insert(Value::from("username"), Value::from(username.as_str()));
    }
  }
  Ok(Value::Mapping(docker))
}

fn has_env(app: &ApplicationModel) -> bool {
  !app.env.is_empty()
}

fn render_env(app: &ApplicationModel) -> Result<Value, ManifestError> {
  let mut env = Mapping::new();
  for (key, value) in &app.env {
    let value = serde_yaml::to_value(value).map_err(ManifestError::Serialize)?;
    env.insert(Value::from(key.as_str()), value);
  }
  Ok(Value::Mapping(env))
}

fn has_http_endpoint(app: &ApplicationModel) -> bool {
  app.health_check.kind == HealthCheckType::Http
    && app
      .health_check
      .http_endpoint
      .as_deref()
      .is_some_and(|endpoint| !endpoint.is_empty() && endpoint != "/")
}

fn render_http_endpoint(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(text(&app.health_check.http_endpoint))
}

fn has_health_check_type(app: &ApplicationModel) -> bool {
  app.health_check.kind != HealthCheckType::Port
}

fn render_health_check_type(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(Value::from(app.health_check.kind.as_str()))
}

fn has_instances(app: &ApplicationModel) -> bool {
  app.instances > 0
}

fn render_instances(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(Value::from(app.instances))
}

fn has_memory(app: &ApplicationModel) -> bool {
  app.memory > 0
}

fn render_memory(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(Value::from(format_megabytes(app.memory)))
}

fn has_routes(app: &ApplicationModel) -> bool {
  !app.routes.is_empty()
}

fn render_routes(app: &ApplicationModel) -> Result<Value, ManifestError> {
  let mut routes = Vec::with_capacity(app.routes.len());
  for route in &app.routes {
    let mut entry = Mapping::new();
    entry.insert(Value::from("route"), Value::from(render_route(route)?));
    routes.push(Value::Mapping(entry));
  }
  Ok(Value::Sequence(routes))
}

fn has_services(app: &ApplicationModel) -> bool {
  !app.services.is_empty()
}

fn render_services(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(Value::Sequence(
    app.services.iter().map(|s| Value::from(s.as_str())).collect(),
  ))
}

fn has_stack(app: &ApplicationModel) -> bool {
  app.stack.as_deref().is_some_and(|s| !s.is_empty())
}

fn render_stack(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(text(&app.stack))
}

fn has_timeout(app: &ApplicationModel) -> bool {
  app.health_check.timeout > 0
}

fn render_timeout(app: &ApplicationModel) -> Result<Value, ManifestError> {
  Ok(Value::from(app.health_check.timeout))
}
