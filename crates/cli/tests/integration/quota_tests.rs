//! quota command integration tests.

use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

fn mock_quota(env: &mut TestEnv, entity: serde_json::Value) {
  env
    .server
    .mock("GET", "/v2/quota_definitions/quota-guid")
    .with_body(json!({ "metadata": { "guid": "quota-guid" }, "entity": entity }).to_string())
    .create();
}

fn default_quota() -> serde_json::Value {
  json!({
    "name": "default",
    "memory_limit": 10240,
    "instance_memory_limit": -1,
    "total_routes": 1000,
    "total_services": 100,
    "non_basic_services_allowed": true
  })
}

#[test]
fn prints_quota_limits() {
  let mut env = TestEnv::logged_in();
  mock_quota(&mut env, default_quota());

  env
    .appmf_cmd()
    .args(["quota", "quota-guid"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Getting quota quota-guid as some-user..."))
    .stdout(predicate::str::contains("OK"))
    .stdout(predicate::str::contains("Name: default"))
    .stdout(predicate::str::contains("Total memory: 10G"))
    .stdout(predicate::str::contains("Instance memory: unlimited"))
    .stdout(predicate::str::contains("App instance limit: unspecified"))
    .stdout(predicate::str::contains("Reserved route ports: 0"));
}

#[test]
fn prints_quota_as_json() {
  let mut env = TestEnv::logged_in();
  let mut entity = default_quota();
  entity["app_instance_limit"] = json!("25");
  entity["total_reserved_route_ports"] = json!("5");
  mock_quota(&mut env, entity);

  let output = env.appmf_cmd().args(["quota", "quota-guid", "--json"]).output().unwrap();
  assert!(output.status.success());

  let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(parsed["name"], "default");
  assert_eq!(parsed["app_instance_limit"], "25");
  assert_eq!(parsed["reserved_route_ports"], 5);
  assert_eq!(parsed["memory_limit"], 10240);
}

#[test]
fn missing_quota_fails() {
  let mut env = TestEnv::logged_in();
  env
    .server
    .mock("GET", "/v2/quota_definitions/quota-guid")
    .with_status(404)
    .create();

  env
    .appmf_cmd()
    .args(["quota", "quota-guid"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("FAILED"))
    .stderr(predicate::str::contains("Quota quota-guid not found"));
}

#[test]
fn malformed_quota_fails() {
  let mut env = TestEnv::logged_in();
  let mut entity = default_quota();
  entity.as_object_mut().unwrap().remove("total_routes");
  mock_quota(&mut env, entity);

  env
    .appmf_cmd()
    .args(["quota", "quota-guid"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("malformed quota resource"));
}
