//! create-app-manifest command integration tests.

use std::path::Path;

use predicates::prelude::*;
use serde_json::json;

use super::common::{PORA_MANIFEST, TestEnv, pora_entity, route};

const PROGRESS: &str = "Creating an app manifest from current settings of app pora in org my-org / space my-space as some-user...";

#[test]
fn creates_manifest_in_working_directory() {
  let mut env = TestEnv::logged_in();
  let app = env.mock_app("pora-guid", pora_entity());
  let routes = env.mock_routes("pora-guid", vec![route("r1", "pora", "example.com", None)]);

  let expected_path = Path::new(".").join("pora_manifest.yml");
  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora"])
    .assert()
    .success()
    .stdout(predicate::str::contains(PROGRESS))
    .stdout(predicate::str::contains("OK"))
    .stdout(predicate::str::contains(format!(
      "Manifest file created successfully at {}",
      expected_path.display()
    )));

  app.assert();
  routes.assert();
  let written = std::fs::read_to_string(env.work_dir().join("pora_manifest.yml")).unwrap();
  assert_eq!(written, PORA_MANIFEST);
}

#[test]
fn creates_manifest_at_given_path() {
  let mut env = TestEnv::logged_in();
  env.mock_app("pora-guid", pora_entity());
  env.mock_routes("pora-guid", vec![route("r1", "pora", "example.com", None)]);
  let new_file = env.temp.path().join("new-file.yml");

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora", "-p"])
    .arg(&new_file)
    .assert()
    .success()
    .stdout(predicate::str::contains(format!(
      "Manifest file created successfully at {}",
      new_file.display()
    )));

  assert_eq!(std::fs::read_to_string(&new_file).unwrap(), PORA_MANIFEST);
}

#[test]
fn overwrites_existing_file() {
  let mut env = TestEnv::logged_in();
  env.mock_app("pora-guid", pora_entity());
  env.mock_routes("pora-guid", vec![route("r1", "pora", "example.com", None)]);
  let existing = env.temp.path().join("some-file");
  std::fs::write(&existing, "previous content\n".repeat(20)).unwrap();

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora", "-p"])
    .arg(&existing)
    .assert()
    .success()
    .stdout(predicate::str::contains("OK"));

  assert_eq!(std::fs::read_to_string(&existing).unwrap(), PORA_MANIFEST);
}

#[test]
fn directory_path_is_rejected() {
  let mut env = TestEnv::logged_in();
  env.mock_app("pora-guid", pora_entity());
  env.mock_routes("pora-guid", vec![route("r1", "pora", "example.com", None)]);
  let dir = env.temp.path().to_path_buf();

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora", "-p"])
    .arg(&dir)
    .assert()
    .code(1)
    .stdout(predicate::str::contains(PROGRESS))
    .stdout(predicate::str::contains("FAILED"))
    .stderr(predicate::str::contains(format!(
      "Error creating manifest file: open {}: is a directory",
      dir.display()
    )));
}

#[test]
fn missing_parent_directory_is_rejected() {
  let mut env = TestEnv::logged_in();
  env.mock_app("pora-guid", pora_entity());
  env.mock_routes("pora-guid", vec![route("r1", "pora", "example.com", None)]);
  let target = env.temp.path().join("nope").join("manifest.yml");

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora", "-p"])
    .arg(&target)
    .assert()
    .code(1)
    .stdout(predicate::str::contains("FAILED"))
    .stderr(predicate::str::contains(format!(
      "Error creating manifest file: open {}: no such file or directory",
      target.display()
    )));

  assert!(!env.temp.path().join("nope").exists());
}

#[test]
fn unknown_app_fails_after_progress_line() {
  let mut env = TestEnv::logged_in();
  env.mock_no_app();

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains(PROGRESS))
    .stdout(predicate::str::contains("FAILED"))
    .stderr(predicate::str::contains("App pora not found"));

  assert!(!env.work_dir().join("pora_manifest.yml").exists());
}

#[test]
fn docker_app_manifest() {
  let mut env = TestEnv::logged_in();
  let mut entity = pora_entity();
  entity["docker_image"] = json!("cloudfoundry/diego-docker-app-custom");
  entity["docker_credentials"] = json!({ "username": "some-docker-username", "password": "my-docker-password" });
  env.mock_app("pora-guid", entity);
  env.mock_routes("pora-guid", vec![route("r1", "pora", "example.com", None)]);

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora", "-v"])
    .assert()
    .success();

  let written = std::fs::read_to_string(env.work_dir().join("pora_manifest.yml")).unwrap();
  assert_eq!(
    written,
    "applications:
- name: pora
  disk_quota: 1G
  docker:
    image: cloudfoundry/diego-docker-app-custom
    username: some-docker-username
  instances: 1
  memory: 32M
  routes:
  - route: pora.example.com
  stack: cflinuxfs2
"
  );
}

#[test]
fn routes_without_hostname() {
  let mut env = TestEnv::logged_in();
  let mut entity = pora_entity();
  entity["buildpack"] = json!("staticfile_buildpack");
  env.mock_app("pora-guid", entity);
  env.mock_routes("pora-guid", vec![route("r1", "", "private.example.com", None)]);

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora"])
    .assert()
    .success();

  let written = std::fs::read_to_string(env.work_dir().join("pora_manifest.yml")).unwrap();
  assert!(written.contains("  buildpack: staticfile_buildpack\n"));
  assert!(written.contains("  routes:\n  - route: private.example.com\n"));
}

#[test]
fn invalid_route_fails_to_build_manifest() {
  let mut env = TestEnv::logged_in();
  env.mock_app("pora-guid", pora_entity());
  env.mock_routes("pora-guid", vec![route("r1", "pora", "tcp.example.com", Some(1024))]);

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("FAILED"))
    .stderr(predicate::str::contains("failed to build manifest"));

  assert!(!env.work_dir().join("pora_manifest.yml").exists());
}

#[test]
fn expired_token_is_reported_as_not_logged_in() {
  let mut env = TestEnv::logged_in();
  env
    .server
    .mock("GET", "/v2/apps")
    .match_query(mockito::Matcher::Any)
    .with_status(401)
    .create();

  env
    .appmf_cmd()
    .args(["create-app-manifest", "pora"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Not logged in. Use 'cf login' to log in."));
}
