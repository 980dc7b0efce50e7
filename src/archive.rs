// src/archive.rs
// ZIP import: deterministic extraction directories and in-process extraction.

use crate::error::{EditorError, Result};
use crate::path_guard;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

pub const IMPORTS_DIR: &str = "imports";
const FALLBACK_BASE_NAME: &str = "project";

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Replaces every run of characters outside `[A-Za-z0-9._-]` with one hyphen,
/// collapses repeated hyphens and trims them from both ends.
pub fn sanitize_base_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if is_safe_char(c) { c } else { '-' };
        if c == '-' && sanitized.ends_with('-') {
            continue;
        }
        sanitized.push(c);
    }
    let trimmed = sanitized.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `{data_root}/imports/{sanitized archive stem}-{now_millis}`. Nothing is created.
pub fn create_extraction_dir(data_root: &Path, zip_path: &Path, now_millis: i64) -> PathBuf {
    let stem = zip_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    data_root
        .join(IMPORTS_DIR)
        .join(format!("{}-{}", sanitize_base_name(&stem), now_millis))
}

/// Extracts every entry of `zip_path` under `destination`, creating it if needed.
/// Entries that would land outside `destination` abort the import.
pub fn extract_zip_archive(zip_path: &Path, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination).map_err(|e| EditorError::io(destination, e))?;

    let file = fs::File::open(zip_path).map_err(|e| EditorError::io(zip_path, e))?;
    let mut archive = ZipArchive::new(file)?;
    log::info!(
        "[ARCHIVE] Extracting {} entries from {} into {}",
        archive.len(),
        zip_path.display(),
        destination.display()
    );

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(enclosed) = entry.enclosed_name() else {
            return Err(EditorError::OutOfBounds(entry.name().to_string()));
        };
        let target = path_guard::resolve(destination, &enclosed.to_string_lossy())?;

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| EditorError::io(&target, e))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| EditorError::io(parent, e))?;
        }
        let mut out = fs::File::create(&target).map_err(|e| EditorError::io(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| EditorError::io(&target, e))?;
        written += 1;
    }
    Ok(written)
}
