// src/path_guard.rs
// Every read, write or serve of a project file goes through `resolve` first.

use crate::error::{EditorError, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolves `relative_path` against `root` and returns the canonical absolute
/// path, or `OutOfBounds` if the result is not inside the canonical root.
///
/// The target itself does not have to exist, so the same check guards writes.
pub fn resolve(root: &Path, relative_path: &str) -> Result<PathBuf> {
    let relative = Path::new(relative_path);
    if relative
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(EditorError::OutOfBounds(relative_path.to_string()));
    }

    let canonical_root = fs::canonicalize(root).map_err(|e| EditorError::io(root, e))?;

    // An absolute `relative_path` replaces the root here and is caught by the prefix check.
    let joined: PathBuf = canonical_root
        .join(relative)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    let resolved = canonicalize_lenient(&joined).map_err(|e| EditorError::io(&joined, e))?;
    if !resolved.starts_with(&canonical_root) {
        log::warn!(
            "[PATH_GUARD] Rejected '{}' (resolved outside {})",
            relative_path,
            canonical_root.display()
        );
        return Err(EditorError::OutOfBounds(relative_path.to_string()));
    }
    Ok(resolved)
}

// Canonicalizes the deepest existing ancestor and re-appends the missing tail.
// `path` must not contain `..` components.
fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        match fs::canonicalize(existing) {
            Ok(mut base) => {
                for name in missing.iter().rev() {
                    base.push(name);
                }
                return Ok(base);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(name), Some(parent)) = (existing.file_name(), existing.parent()) else {
                    return Err(e);
                };
                missing.push(name.to_os_string());
                existing = parent;
            }
            Err(e) => return Err(e),
        }
    }
}
