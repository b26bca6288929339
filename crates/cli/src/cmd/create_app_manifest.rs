//! Implementation of the `appmf create-app-manifest` command.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use appmf_lib::api::HttpClient;
use appmf_lib::create::{CreateOptions, create_app_manifest};

use super::load_session;
use crate::output::{entity, print_ok};

/// Execute the create-app-manifest command.
///
/// Environment problems (no endpoint, not logged in, no org or space) fail
/// before anything is printed. Afterwards the progress line is always shown,
/// followed by `OK` and the written path, or by the failure.
pub fn cmd_create_app_manifest(app_name: &str, path: Option<PathBuf>) -> Result<()> {
  let session = load_session()?;
  let (org, space) = session.target()?;

  println!(
    "Creating an app manifest from current settings of app {} in org {} / space {} as {}...",
    entity(app_name),
    entity(&org.name),
    entity(&space.name),
    entity(&session.user)
  );

  let client = HttpClient::new(&session)?;
  let options = CreateOptions {
    app_name: app_name.to_string(),
    path,
  };
  debug!(?options, endpoint = %session.api_endpoint, "creating manifest");

  let written = create_app_manifest(&client, &options)?;

  print_ok();
  println!();
  println!("Manifest file created successfully at {}", written.display());

  Ok(())
}
