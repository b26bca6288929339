mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{cmd_create_app_manifest, cmd_quota};
use crate::output::print_failed;

/// appmf - Rebuild application manifests from what is deployed
#[derive(Parser)]
#[command(name = "appmf")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Create an app manifest for an app that has been pushed successfully
  CreateAppManifest {
    /// Name of the application
    #[arg(value_name = "APP_NAME")]
    app_name: String,

    /// Specify a path for file creation. If path not specified, manifest file is created in current working directory.
    #[arg(short = 'p', value_name = "PATH")]
    path: Option<PathBuf>,
  },

  /// Show the limits of a quota definition
  Quota {
    /// Identifier of the quota definition
    #[arg(value_name = "QUOTA_GUID")]
    guid: String,

    /// Print the quota as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::CreateAppManifest { app_name, path } => cmd_create_app_manifest(&app_name, path),
    Commands::Quota { guid, json } => cmd_quota(&guid, json),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_failed(&e.to_string());
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: bool) {
  let default_filter = if verbose {
    "warn,appmf=debug,appmf_lib=debug"
  } else {
    "warn"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
