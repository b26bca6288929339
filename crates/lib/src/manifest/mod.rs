//! Application manifest synthesis.
//!
//! Turns typed application models into the canonical manifest document and
//! writes it to disk:
//! - [`format_megabytes`]: memory and disk quantities in short form
//! - [`render_route`]: a bound route as its canonical URL form
//! - [`assemble`]: models into an ordered [`ManifestDocument`]
//! - [`write_manifest`]: the document to a file, with the overwrite policy

mod assemble;
mod route;
mod types;
mod units;
mod writer;

use thiserror::Error;

pub use assemble::assemble;
pub use route::render_route;
pub use types::{ApplicationEntry, ManifestDocument};
pub use units::format_megabytes;
pub use writer::{WriteError, default_manifest_path, write_manifest};

/// Errors that can occur while assembling a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// A route carries both a hostname and a port.
  #[error("invalid route {host}.{domain}:{port}: a route cannot have both a hostname and a port")]
  InvalidRoute { host: String, domain: String, port: u16 },

  /// The document could not be encoded as YAML.
  #[error("failed to serialize manifest: {0}")]
  Serialize(#[source] serde_yaml::Error),
}
