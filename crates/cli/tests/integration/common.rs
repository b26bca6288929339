//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Unsigned JWT whose `user_name` claim is `some-user`.
pub const TOKEN: &str = "bearer eyJhbGciOiJub25lIn0.eyJ1c2VyX25hbWUiOiJzb21lLXVzZXIiLCJ1c2VyX2lkIjoidS0xIn0.sig";

/// Isolated test environment.
///
/// Each test gets its own `CF_HOME` with a logged-in, targeted session
/// pointing at a mock control plane, and its own working directory.
pub struct TestEnv {
  pub temp: TempDir,
  pub server: ServerGuard,
}

impl TestEnv {
  /// Logged in as `some-user`, targeting org `my-org` / space `my-space`.
  pub fn logged_in() -> Self {
    let temp = TempDir::new().unwrap();
    let server = Server::new();
    let env = Self { temp, server };

    let config = json!({
      "ConfigVersion": 3,
      "Target": env.server.url(),
      "AccessToken": TOKEN,
      "SSLDisabled": false,
      "OrganizationFields": { "GUID": "org-guid", "Name": "my-org" },
      "SpaceFields": { "GUID": "space-guid", "Name": "my-space" }
    });
    let cf_dir = env.temp.path().join(".cf");
    std::fs::create_dir_all(&cf_dir).unwrap();
    std::fs::write(cf_dir.join("config.json"), config.to_string()).unwrap();
    std::fs::create_dir_all(env.work_dir()).unwrap();
    env
  }

  /// Working directory the binary runs in.
  pub fn work_dir(&self) -> PathBuf {
    self.temp.path().join("work")
  }

  /// Get a pre-configured Command for the appmf binary.
  pub fn appmf_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("appmf");
    cmd.env("CF_HOME", self.temp.path());
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(self.work_dir());
    cmd
  }

  /// Serve `entity` as the only match for an app lookup.
  pub fn mock_app(&mut self, guid: &str, entity: Value) -> Mock {
    self
      .server
      .mock("GET", "/v2/apps")
      .match_query(Matcher::AllOf(vec![
        Matcher::Regex(format!("(^|&)q=name%3A{}(&|$)", entity["name"].as_str().unwrap())),
        Matcher::Regex("(^|&)q=space_guid%3Aspace-guid(&|$)".into()),
      ]))
      .match_header("authorization", TOKEN)
      .with_body(
        json!({
          "total_results": 1,
          "total_pages": 1,
          "next_url": null,
          "resources": [{ "metadata": { "guid": guid, "url": format!("/v2/apps/{}", guid) }, "entity": entity }]
        })
        .to_string(),
      )
      .create()
  }

  /// Serve an empty app lookup.
  pub fn mock_no_app(&mut self) -> Mock {
    self
      .server
      .mock("GET", "/v2/apps")
      .match_query(Matcher::Any)
      .with_body(r#"{"total_results":0,"total_pages":1,"next_url":null,"resources":[]}"#)
      .create()
  }

  /// Serve `routes` as the routes bound to `app_guid`.
  pub fn mock_routes(&mut self, app_guid: &str, routes: Vec<Value>) -> Mock {
    self
      .server
      .mock("GET", format!("/v2/apps/{}/routes", app_guid).as_str())
      .match_query(Matcher::Any)
      .with_body(
        json!({
          "total_results": routes.len(),
          "total_pages": 1,
          "next_url": null,
          "resources": routes
        })
        .to_string(),
      )
      .create()
  }
}

/// The entity of the buildpack app from the canonical example.
pub fn pora_entity() -> Value {
  json!({
    "name": "pora",
    "memory": 32,
    "disk_quota": 1024,
    "instances": 1,
    "buildpack": null,
    "detected_buildpack": "staticfile 1.4.0",
    "docker_image": null,
    "health_check_type": "port",
    "environment_json": {},
    "stack": { "metadata": { "guid": "stack-guid" }, "entity": { "name": "cflinuxfs2" } },
    "service_bindings": []
  })
}

/// A route resource with its domain inlined.
pub fn route(guid: &str, host: &str, domain: &str, port: Option<u16>) -> Value {
  json!({
    "metadata": { "guid": guid },
    "entity": {
      "host": host,
      "path": "",
      "port": port,
      "domain": { "metadata": { "guid": "domain-guid" }, "entity": { "name": domain } }
    }
  })
}

/// Manifest the canonical example must produce.
pub const PORA_MANIFEST: &str = "applications:
- name: pora
  disk_quota: 1G
  instances: 1
  memory: 32M
  routes:
  - route: pora.example.com
  stack: cflinuxfs2
";
