//! CLI output formatting utilities.
//!
//! Status indicators follow the platform CLI: a progress line, then `OK` or
//! `FAILED` on stdout, with failure details on stderr.

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};

use appmf_lib::manifest::format_megabytes;

/// Highlight a value (app, org, space or user name) inside a message.
pub fn entity(value: &str) -> String {
  value
    .if_supports_color(Stream::Stdout, |s| s.cyan())
    .to_string()
}

pub fn print_ok() {
  println!("{}", "OK".if_supports_color(Stream::Stdout, |s| s.green()));
}

/// Print the failure indicator on stdout and the message on stderr.
pub fn print_failed(message: &str) {
  println!("{}", "FAILED".if_supports_color(Stream::Stdout, |s| s.red()));
  eprintln!("{}", message);
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Format a memory limit in MB, where `-1` means unlimited.
pub fn format_memory_limit(mb: i64) -> String {
  match u64::try_from(mb) {
    Ok(mb) => format_megabytes(mb),
    Err(_) => "unlimited".to_string(),
  }
}

/// Format a count limit, where `-1` means unlimited.
pub fn format_count_limit(count: i64) -> String {
  if count < 0 {
    "unlimited".to_string()
  } else {
    count.to_string()
  }
}
