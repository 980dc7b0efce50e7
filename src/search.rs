// src/search.rs
// Case-insensitive substring search over every text file of a project.

use crate::error::{EditorError, Result};
use crate::indexer::{flatten_files, is_text_extension, walk_tree};
use crate::path_guard;
use crate::types::{SearchHit, TreeNode};
use std::fs;
use std::path::Path;

pub const MAX_SNIPPET_CHARS: usize = 240;

/// Re-walks the project on every call so results always reflect disk.
/// A read failure on any file aborts the whole search. Files whose real
/// location is outside the root (symlinks) are skipped.
pub fn search(root: &Path, query: &str) -> Result<Vec<SearchHit>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let needle = query.to_lowercase();

    let tree = walk_tree(root)?;
    let mut hits = Vec::new();
    for node in flatten_files(&tree) {
        let TreeNode::File { path, ext, .. } = node else {
            continue;
        };
        if !is_text_extension(ext) {
            continue;
        }
        let absolute = match path_guard::resolve(root, path) {
            Ok(absolute) => absolute,
            Err(EditorError::OutOfBounds(_)) => {
                log::warn!("[SEARCH] Skipping {}: resolves outside the project", path);
                continue;
            }
            Err(e) => return Err(e),
        };
        let bytes = fs::read(&absolute).map_err(|source| EditorError::Search {
            path: absolute.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        hits.extend(search_lines(path, &content, &needle));
    }

    log::info!("[SEARCH] '{}' in {}: {} hits", query, root.display(), hits.len());
    Ok(hits)
}

/// `needle` must already be lowercased. Lines split on `\n` and `\r\n`.
pub fn search_lines(path: &str, content: &str, needle: &str) -> Vec<SearchHit> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(needle))
        .map(|(idx, line)| SearchHit {
            path: path.to_string(),
            line: idx + 1,
            snippet: snippet_of(line),
        })
        .collect()
}

fn snippet_of(line: &str) -> String {
    line.trim().chars().take(MAX_SNIPPET_CHARS).collect()
}
