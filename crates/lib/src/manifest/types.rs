//! The manifest document tree.
//!
//! The document is YAML with a single `applications` key:
//!
//! ```yaml
//! applications:
//! - name: pora
//!   disk_quota: 1G
//!   instances: 1
//!   memory: 32M
//!   routes:
//!   - route: pora.example.com
//!   stack: cflinuxfs2
//! ```
//!
//! Key order inside an application is decided by the assembler and kept
//! verbatim by serialization.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::Value;

use super::ManifestError;

/// A complete manifest.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ManifestDocument {
  pub applications: Vec<ApplicationEntry>,
}

impl ManifestDocument {
  /// Encode the document as YAML text, ending with a newline.
  pub fn to_yaml(&self) -> Result<String, ManifestError> {
    serde_yaml::to_string(self).map_err(ManifestError::Serialize)
  }
}

/// One application's keys, in output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationEntry {
  fields: Vec<(&'static str, Value)>,
}

impl ApplicationEntry {
  pub(crate) fn push(&mut self, key: &'static str, value: Value) {
    self.fields.push((key, value));
  }

  /// Keys in output order.
  pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.fields.iter().map(|(key, _)| *key)
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
  }
}

impl Serialize for ApplicationEntry {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.fields.len()))?;
    for (key, value) in &self.fields {
      map.serialize_entry(key, value)?;
    }
    map.end()
  }
}
