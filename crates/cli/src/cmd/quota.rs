//! Implementation of the `appmf quota` command.

use anyhow::Result;

use appmf_lib::api::{ControlPlane, HttpClient};
use appmf_lib::resource::map_quota;

use super::load_session;
use crate::output::{entity, format_count_limit, format_memory_limit, print_json, print_ok, print_stat};

/// Execute the quota command.
///
/// Fetches the quota definition, maps it, and prints its limits either as a
/// table or, with `json`, as the mapped fields.
pub fn cmd_quota(guid: &str, json: bool) -> Result<()> {
  let session = load_session()?;
  let client = HttpClient::new(&session)?;

  if !json {
    println!("Getting quota {} as {}...", entity(guid), entity(&session.user));
  }

  let quota = map_quota(&client.get_quota(guid)?)?;

  if json {
    return print_json(&quota);
  }

  print_ok();
  println!();
  print_stat("Name", &quota.name);
  print_stat("Total memory", &format_memory_limit(quota.memory_limit));
  print_stat("Instance memory", &format_memory_limit(quota.instance_memory_limit));
  print_stat("Routes", &format_count_limit(quota.routes_limit));
  print_stat("Services", &format_count_limit(quota.services_limit));
  print_stat(
    "Paid service plans",
    if quota.non_basic_services_allowed {
      "allowed"
    } else {
      "disallowed"
    },
  );
  let instance_limit = match quota.instance_limit() {
    Some(limit) => limit.to_string(),
    None => quota.app_instance_limit.clone(),
  };
  print_stat("App instance limit", &instance_limit);
  print_stat("Reserved route ports", &format_count_limit(quota.reserved_route_ports));

  Ok(())
}
