use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use super::{ManifestDocument, ManifestError};
use crate::consts::MANIFEST_SUFFIX;

/// Errors that can occur while writing a manifest file.
///
/// Messages follow the platform CLI: the operation, the path, then the OS reason.
#[derive(Debug, Error)]
pub enum WriteError {
  #[error("Error creating manifest file: open {}: is a directory", path.display())]
  TargetIsDirectory { path: PathBuf },

  #[error("Error creating manifest file: open {}: no such file or directory", path.display())]
  PathNotFound { path: PathBuf },

  /// The path has no final file name component (empty, or ending in `..`).
  #[error("Error creating manifest file: open {path:?}: not a file name")]
  NoFileName { path: PathBuf },

  #[error("Error creating manifest file: open {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },

  #[error(transparent)]
  Render(#[from] ManifestError),
}

/// Default manifest location: `./<app>_manifest.yml`.
pub fn default_manifest_path(app_name: &str) -> PathBuf {
  Path::new(".").join(format!("{}{}", app_name, MANIFEST_SUFFIX))
}

/// Write a manifest document to `path`.
///
/// An existing file is replaced without asking, keeping its permissions; a
/// symlink is followed and its destination replaced. A directory target or a
/// missing parent directory is an error; no directories are created.
///
/// The content goes to a uniquely named temporary file in the target's
/// directory, which is then renamed over the target. Readers never observe a
/// partially written manifest, and a failed write leaves nothing behind.
pub fn write_manifest(doc: &ManifestDocument, path: &Path) -> Result<(), WriteError> {
  let target = resolve_target(path);

  if target.is_dir() {
    return Err(WriteError::TargetIsDirectory {
      path: path.to_path_buf(),
    });
  }
  if target.file_name().is_none() {
    return Err(WriteError::NoFileName {
      path: path.to_path_buf(),
    });
  }

  let parent = match target.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  if !parent.is_dir() {
    return Err(WriteError::PathNotFound {
      path: path.to_path_buf(),
    });
  }

  let content = doc.to_yaml()?;
  let write_err = |source: io::Error| WriteError::Write {
    path: path.to_path_buf(),
    source,
  };

  let mut temp = temp_file_in(parent).map_err(write_err)?;
  debug!(temp = %temp.path().display(), "writing manifest to temporary file");
  temp.write_all(content.as_bytes()).map_err(write_err)?;
  if let Ok(existing) = fs::metadata(&target) {
    temp
      .as_file()
      .set_permissions(existing.permissions())
      .map_err(write_err)?;
  }
  temp.persist(&target).map_err(|e| write_err(e.error))?;

  info!(path = %path.display(), bytes = content.len(), "manifest written");
  Ok(())
}

/// Follow a symlinked target. A dangling link is replaced like a plain file.
fn resolve_target(path: &Path) -> PathBuf {
  match fs::symlink_metadata(path) {
    Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
    _ => path.to_path_buf(),
  }
}

/// New files get the usual `0o666 & !umask` mode rather than the private
/// default of temporary files.
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
  let mut builder = tempfile::Builder::new();
  builder.prefix(".appmf-").suffix(".tmp");
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(fs::Permissions::from_mode(0o666));
  }
  builder.tempfile_in(dir)
}
