//! Resolution of configured paths into stable file identities.

use anyhow::{bail, Context, Result};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Expand a leading `~` component to the current user's home directory.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let Some(home) = dirs::home_dir() else {
                bail!(
                    "Cannot expand '~' in {}: home directory is unknown",
                    path.display()
                );
            };
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve a configured path into the canonical absolute path used as the
/// file's identity.
///
/// Files that do not exist yet, or cannot be reached, still get a stable
/// identity: the deepest resolvable ancestor is canonicalized and the rest of
/// the path is appended. Fails only when the path itself cannot be made
/// absolute (`~` without a home directory, no current directory).
pub fn resolve_identity(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .context("Failed to determine current directory")?
            .join(expanded)
    };

    match absolute.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(e) => {
            // Unreachable paths (parent is a file, symlink loop, no permission)
            // still get an identity; probing them reports an infinite age.
            if e.kind() != ErrorKind::NotFound {
                debug!(
                    path = %absolute.display(),
                    error = %e,
                    "cannot canonicalize path; using normalized form"
                );
            }
            Ok(canonicalize_existing_prefix(&normalize_lexically(&absolute)))
        }
    }
}

fn canonicalize_existing_prefix(absolute: &Path) -> PathBuf {
    for ancestor in absolute.ancestors().skip(1) {
        if let Ok(canonical) = ancestor.canonicalize() {
            return match absolute.strip_prefix(ancestor) {
                Ok(tail) => canonical.join(tail),
                Err(_) => absolute.to_path_buf(),
            };
        }
    }
    absolute.to_path_buf()
}
