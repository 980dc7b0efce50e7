// src/indexer.rs
// Builds the navigable project tree and the flat list of pages.

use crate::error::{EditorError, Result};
use crate::ignore_handler::ExcludedDirs;
use crate::types::{ProjectIndex, TreeNode};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Extensions that show up in the tree. Everything else is silently omitted.
pub const INDEXABLE_EXTENSIONS: &[&str] = &[
    "html", "css", "js", "svg", "png", "webp", "ico", "xml", "webmanifest", "json", "txt", "php",
];

/// Indexable extensions whose contents are searched as text.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "html", "css", "js", "svg", "xml", "webmanifest", "json", "txt", "php",
];

pub const PAGE_EXTENSION: &str = "html";

/// Lowercased extension of `name` if it is indexable.
pub fn indexable_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_string_lossy().to_lowercase();
    INDEXABLE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

pub fn is_text_extension(ext: &str) -> bool {
    TEXT_EXTENSIONS.contains(&ext)
}

// --- Sibling ordering ---

// Root-collation punctuation order. Characters not listed sort after these,
// by code point, and still before digits.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Primary {
    Space,
    Punctuation(u32),
    Digit(u32),
    Letter(char),
    Other(char),
}

// Field order is comparison order: base letters, then accents, then case.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    primary: Vec<Primary>,
    accents: Vec<Vec<char>>,
    uppercase: Vec<bool>,
}

fn primary_weight(c: char) -> Primary {
    if c.is_whitespace() {
        Primary::Space
    } else if c.is_alphabetic() {
        Primary::Letter(c.to_lowercase().next().unwrap_or(c))
    } else if c.is_numeric() {
        Primary::Digit(c.to_digit(10).unwrap_or(c as u32))
    } else if let Some(rank) = PUNCTUATION_ORDER.chars().position(|p| p == c) {
        Primary::Punctuation(rank as u32)
    } else if c.is_control() {
        Primary::Other(c)
    } else {
        Primary::Punctuation(PUNCTUATION_ORDER.len() as u32 + c as u32)
    }
}

fn collation_key(name: &str) -> CollationKey {
    let mut key = CollationKey::default();
    // Decomposed form splits "é" into "e" plus a combining accent.
    for c in name.nfd() {
        if is_combining_mark(c) {
            if let Some(marks) = key.accents.last_mut() {
                marks.push(c);
            }
            continue;
        }
        key.primary.push(primary_weight(c));
        key.accents.push(Vec::new());
        key.uppercase.push(c.is_uppercase());
    }
    key
}

/// Sibling order shown in the tree, close to `localeCompare` with the root locale:
/// punctuation before digits before letters, accents ignored until base letters
/// tie, then unaccented before accented, then lowercase before uppercase.
/// Raw code point order breaks any remaining tie.
pub fn locale_order(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

// --- Tree walk ---

pub fn build_index(root: &Path) -> Result<ProjectIndex> {
    let tree = walk_tree(root)?;
    let pages = collect_pages(&tree);
    log::info!(
        "[INDEX] Indexed {}: {} top-level entries, {} pages",
        root.display(),
        tree.len(),
        pages.len()
    );
    Ok(ProjectIndex { tree, pages })
}

struct ListedEntry {
    name: String,
    absolute: PathBuf,
    is_dir: bool,
}

// One open directory during the walk.
struct Frame {
    name: String,
    relative: String,
    pending: std::vec::IntoIter<ListedEntry>,
    children: Vec<TreeNode>,
}

/// Walks `root` with an explicit stack and returns its sorted children.
/// The first filesystem error aborts the whole walk.
pub fn walk_tree(root: &Path) -> Result<Vec<TreeNode>> {
    let excluded = ExcludedDirs::new(root);
    let mut stack = vec![Frame {
        name: String::new(),
        relative: String::new(),
        pending: list_directory(root, &excluded)?.into_iter(),
        children: Vec::new(),
    }];

    loop {
        let Some(top) = stack.last_mut() else {
            return Ok(Vec::new());
        };

        match top.pending.next() {
            // Descend into directories immediately so siblings keep their sorted order.
            Some(entry) => {
                let relative = join_relative(&top.relative, &entry.name);
                if entry.is_dir {
                    let listed = list_directory(&entry.absolute, &excluded)?;
                    stack.push(Frame {
                        name: entry.name,
                        relative,
                        pending: listed.into_iter(),
                        children: Vec::new(),
                    });
                } else if let Some(ext) = indexable_extension(&entry.name) {
                    top.children.push(TreeNode::File {
                        name: entry.name,
                        path: relative,
                        ext,
                    });
                }
            }
            // Directory exhausted: fold it into its parent, or finish at the root.
            None => {
                let Some(finished) = stack.pop() else {
                    return Ok(Vec::new());
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(TreeNode::Directory {
                        name: finished.name,
                        path: finished.relative,
                        children: finished.children,
                    }),
                    None => return Ok(finished.children),
                }
            }
        }
    }
}

// Lists one directory, dropping excluded directories, sorted by name.
fn list_directory(dir: &Path, excluded: &ExcludedDirs) -> Result<Vec<ListedEntry>> {
    let indexing_error = |source| EditorError::Indexing {
        path: dir.to_path_buf(),
        source,
    };

    let mut listed = Vec::new();
    for entry_result in fs::read_dir(dir).map_err(indexing_error)? {
        let entry = entry_result.map_err(indexing_error)?;
        let file_type = entry.file_type().map_err(|source| EditorError::Indexing {
            path: entry.path(),
            source,
        })?;
        let absolute = entry.path();
        // Symlinks report their own type here, so linked directories are not followed.
        let is_dir = file_type.is_dir();
        if excluded.is_excluded(&absolute, is_dir) {
            log::debug!("[INDEX] Skipping excluded directory {}", absolute.display());
            continue;
        }
        listed.push(ListedEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            absolute,
            is_dir,
        });
    }
    listed.sort_by(|a, b| locale_order(&a.name, &b.name));
    Ok(listed)
}

// Relative paths always use `/`, whatever the host separator is.
fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

// --- Flattening ---

/// Pre-order, depth-first list of `.html` file paths.
pub fn collect_pages(tree: &[TreeNode]) -> Vec<String> {
    flatten_files(tree)
        .into_iter()
        .filter_map(|node| match node {
            TreeNode::File { path, ext, .. } if ext == PAGE_EXTENSION => Some(path.clone()),
            _ => None,
        })
        .collect()
}

/// Pre-order, depth-first list of every file node.
pub fn flatten_files(tree: &[TreeNode]) -> Vec<&TreeNode> {
    let mut files = Vec::new();
    let mut stack: Vec<&TreeNode> = tree.iter().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            TreeNode::Directory { children, .. } => stack.extend(children.iter().rev()),
            TreeNode::File { .. } => files.push(node),
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn names(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(TreeNode::name).collect()
    }

    #[test]
    fn builds_sorted_tree_with_allowed_extensions_only() {
        let dir = tempdir().unwrap();
        write(dir.path(), "index.html", "<h1>Hi</h1>");
        write(dir.path(), "Styles.CSS", "body{}");
        write(dir.path(), "about.html", "");
        write(dir.path(), "notes.md", "# skipped");
        write(dir.path(), "assets/logo.svg", "<svg/>");
        write(dir.path(), "assets/archive.zip", "PK");

        let tree = walk_tree(dir.path()).unwrap();
        assert_eq!(names(&tree), vec!["about.html", "assets", "index.html", "Styles.CSS"]);

        match &tree[1] {
            TreeNode::Directory { path, children, .. } => {
                assert_eq!(path, "assets");
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].path(), "assets/logo.svg");
            }
            other => panic!("expected directory, got {other:?}"),
        }
        match &tree[3] {
            TreeNode::File { ext, .. } => assert_eq!(ext, "css"),
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[test]
    fn excluded_directories_contribute_nothing() {
        let dir = tempdir().unwrap();
        write(dir.path(), ".git/config.txt", "x");
        write(dir.path(), "node_modules/pkg/index.js", "x");
        write(dir.path(), "docs/deep/node_modules/x/page.html", "x");
        write(dir.path(), "docs/deep/.git/HEAD.txt", "x");
        write(dir.path(), "docs/deep/kept.html", "x");

        let index = build_index(dir.path()).unwrap();
        assert_eq!(index.pages, vec!["docs/deep/kept.html"]);
        let all: Vec<&str> = flatten_files(&index.tree).into_iter().map(TreeNode::path).collect();
        assert_eq!(all, vec!["docs/deep/kept.html"]);
    }

    #[test]
    fn pages_follow_pre_order() {
        let dir = tempdir().unwrap();
        write(dir.path(), "b.html", "");
        write(dir.path(), "a/z.html", "");
        write(dir.path(), "a/b/c.html", "");
        write(dir.path(), "a/a.css", "");
        write(dir.path(), "c/d.html", "");

        let index = build_index(dir.path()).unwrap();
        assert_eq!(index.pages, vec!["a/b/c.html", "a/z.html", "b.html", "c/d.html"]);
        assert_eq!(index.pages, collect_pages(&index.tree));
    }

    #[test]
    fn empty_directories_are_kept() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let tree = walk_tree(dir.path()).unwrap();
        assert_eq!(
            tree,
            vec![TreeNode::Directory {
                name: "empty".to_string(),
                path: "empty".to_string(),
                children: vec![],
            }]
        );
    }

    #[test]
    fn missing_root_is_an_indexing_failure() {
        let dir = tempdir().unwrap();
        let result = build_index(&dir.path().join("nope"));
        assert!(matches!(result, Err(EditorError::Indexing { .. })));
    }

    #[test]
    fn locale_order_is_case_insensitive() {
        let mut names = vec!["b.html", "B.css", "a.js", "A.js", "_x.txt"];
        names.sort_by(|a, b| locale_order(a, b));
        assert_eq!(names, vec!["_x.txt", "a.js", "A.js", "B.css", "b.html"]);
    }

    #[test]
    fn locale_order_follows_root_collation_for_punctuation_and_accents() {
        let mut names = vec!["rz.html", "résumé.html", "a.html", "a_b.html"];
        names.sort_by(|a, b| locale_order(a, b));
        assert_eq!(names, vec!["a_b.html", "a.html", "résumé.html", "rz.html"]);

        let mut names = vec!["e.html", "É.html", "é.html", "E.html", "2.html", "-a.html"];
        names.sort_by(|a, b| locale_order(a, b));
        assert_eq!(names, vec!["-a.html", "2.html", "e.html", "E.html", "é.html", "É.html"]);

        assert_eq!(locale_order("a-b", "a_b"), Ordering::Greater);
        assert_eq!(locale_order("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accented_names_sort_beside_their_base_letter_in_the_tree() {
        let dir = tempdir().unwrap();
        for name in ["a.html", "a_b.html", "résumé.html", "rz.html"] {
            write(dir.path(), name, "");
        }
        let tree = walk_tree(dir.path()).unwrap();
        assert_eq!(names(&tree), vec!["a_b.html", "a.html", "résumé.html", "rz.html"]);
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        assert_eq!(indexable_extension("PAGE.HTML").as_deref(), Some("html"));
        assert_eq!(indexable_extension("site.webmanifest").as_deref(), Some("webmanifest"));
        assert_eq!(indexable_extension("README"), None);
        assert_eq!(indexable_extension("photo.jpg"), None);
        assert!(is_text_extension("php"));
        assert!(!is_text_extension("png"));
    }
}
