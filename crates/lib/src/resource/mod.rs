//! Mapping of raw control-plane payloads into typed models.
//!
//! The control plane returns loosely-typed JSON in a `{ "metadata": {...},
//! "entity": {...} }` envelope. Mapping is a pure function from that JSON to a
//! model in [`crate::models`]: fields introduced by later API versions coalesce
//! to their zero value when absent, while always-present fields fail the
//! mapping with [`MappingError::MalformedResource`].

mod application;
mod quota;
mod route;

use serde_json::{Map, Value};
use thiserror::Error;

pub use application::map_application;
pub use quota::map_quota;
pub use route::map_route;

/// Errors that can occur while mapping a resource.
#[derive(Debug, Error)]
pub enum MappingError {
  /// A required field is absent or has an incompatible representation.
  #[error("malformed {kind} resource: {reason}")]
  MalformedResource { kind: &'static str, reason: String },
}

impl MappingError {
  pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
    Self::MalformedResource {
      kind,
      reason: reason.into(),
    }
  }
}

/// A `{ metadata, entity }` resource envelope.
pub(crate) struct Resource<'a> {
  pub guid: &'a str,
  pub entity: Entity<'a>,
}

impl<'a> Resource<'a> {
  pub fn parse(raw: &'a Value, kind: &'static str) -> Result<Self, MappingError> {
    let guid = raw
      .get("metadata")
      .and_then(|m| m.get("guid"))
      .and_then(Value::as_str)
      .ok_or_else(|| MappingError::malformed(kind, "missing required field `metadata.guid`"))?;
    let entity = raw
      .get("entity")
      .and_then(Value::as_object)
      .ok_or_else(|| MappingError::malformed(kind, "missing required field `entity`"))?;
    Ok(Self {
      guid,
      entity: Entity { kind, fields: entity },
    })
  }
}

/// Typed access to the fields of a resource entity.
///
/// An explicit JSON `null` is treated the same as an absent field.
pub(crate) struct Entity<'a> {
  kind: &'static str,
  fields: &'a Map<String, Value>,
}

impl<'a> Entity<'a> {
  fn get(&self, field: &str) -> Option<&'a Value> {
    self.fields.get(field).filter(|v| !v.is_null())
  }

  fn missing(&self, field: &str) -> MappingError {
    MappingError::malformed(self.kind, format!("missing required field `{}`", field))
  }

  fn invalid(&self, field: &str, expected: &str, found: &Value) -> MappingError {
    MappingError::malformed(
      self.kind,
      format!("field `{}` should be {}, found {}", field, expected, found),
    )
  }

  pub fn required_str(&self, field: &str) -> Result<&'a str, MappingError> {
    self.optional_str(field)?.ok_or_else(|| self.missing(field))
  }

  pub fn optional_str(&self, field: &str) -> Result<Option<&'a str>, MappingError> {
    match self.get(field) {
      None => Ok(None),
      Some(Value::String(s)) => Ok(Some(s.as_str())),
      Some(other) => Err(self.invalid(field, "a string", other)),
    }
  }

  /// Like [`Entity::optional_str`], but treats an empty string as absent.
  pub fn non_empty_str(&self, field: &str) -> Result<Option<&'a str>, MappingError> {
    Ok(self.optional_str(field)?.filter(|s| !s.is_empty()))
  }

  pub fn required_i64(&self, field: &str) -> Result<i64, MappingError> {
    self.optional_i64(field)?.ok_or_else(|| self.missing(field))
  }

  /// Integer field, sent either as a JSON number or as numeric text.
  pub fn optional_i64(&self, field: &str) -> Result<Option<i64>, MappingError> {
    match self.get(field) {
      None => Ok(None),
      Some(value) => parse_integer(value)
        .map(Some)
        .ok_or_else(|| self.invalid(field, "an integer", value)),
    }
  }

  pub fn required_u64(&self, field: &str) -> Result<u64, MappingError> {
    let value = self.required_i64(field)?;
    u64::try_from(value).map_err(|_| self.invalid(field, "a non-negative integer", &Value::from(value)))
  }

  pub fn optional_u64(&self, field: &str) -> Result<Option<u64>, MappingError> {
    match self.optional_i64(field)? {
      None => Ok(None),
      Some(value) => u64::try_from(value)
        .map(Some)
        .map_err(|_| self.invalid(field, "a non-negative integer", &Value::from(value))),
    }
  }

  pub fn required_bool(&self, field: &str) -> Result<bool, MappingError> {
    match self.get(field) {
      None => Err(self.missing(field)),
      Some(Value::Bool(b)) => Ok(*b),
      Some(other) => Err(self.invalid(field, "a boolean", other)),
    }
  }

  /// Field kept as text in the model, whatever its JSON representation.
  pub fn optional_text(&self, field: &str) -> Result<Option<String>, MappingError> {
    match self.get(field) {
      None => Ok(None),
      Some(Value::String(s)) => Ok(Some(s.clone())),
      Some(Value::Number(n)) => Ok(Some(n.to_string())),
      Some(other) => Err(self.invalid(field, "a number or numeric text", other)),
    }
  }

  pub fn optional_object(&self, field: &str) -> Result<Option<&'a Map<String, Value>>, MappingError> {
    match self.get(field) {
      None => Ok(None),
      Some(Value::Object(map)) => Ok(Some(map)),
      Some(other) => Err(self.invalid(field, "an object", other)),
    }
  }

  pub fn optional_array(&self, field: &str) -> Result<&'a [Value], MappingError> {
    match self.get(field) {
      None => Ok(&[]),
      Some(Value::Array(items)) => Ok(items.as_slice()),
      Some(other) => Err(self.invalid(field, "an array", other)),
    }
  }

  /// The entity of an inlined related resource (e.g. `stack`, `domain`).
  pub fn inline(&self, field: &str, kind: &'static str) -> Result<Option<Entity<'a>>, MappingError> {
    match self.optional_object(field)? {
      None => Ok(None),
      Some(related) => related
        .get("entity")
        .and_then(Value::as_object)
        .map(|fields| Some(Entity { kind, fields }))
        .ok_or_else(|| MappingError::malformed(self.kind, format!("inlined `{}` has no entity", field))),
    }
  }
}

fn parse_integer(value: &Value) -> Option<i64> {
  match value {
    Value::Number(n) => n.as_i64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}
