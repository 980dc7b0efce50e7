// src/ignore_handler.rs
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use std::path::Path;

/// Directories that are never descended into, at any depth.
pub const EXCLUDED_DIR_PATTERNS: &[&str] = &[".git/", "node_modules/"];

#[derive(Debug)]
pub struct ExcludedDirs {
    gitignore: Gitignore,
}

impl ExcludedDirs {
    pub fn new(project_root: &Path) -> Self {
        Self::with_patterns(project_root, EXCLUDED_DIR_PATTERNS)
    }

    pub fn with_patterns(project_root: &Path, patterns: &[&str]) -> Self {
        let mut builder = GitignoreBuilder::new(project_root);
        for pattern in patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                log::error!("[EXCLUDED_DIRS] Failed to add pattern '{}': {}", pattern, e);
            }
        }

        let gitignore = match builder.build() {
            Ok(gi) => gi,
            Err(e) => {
                log::error!("[EXCLUDED_DIRS] Failed to build matcher: {}. Nothing will be excluded.", e);
                Gitignore::empty()
            }
        };

        ExcludedDirs { gitignore }
    }

    /// `absolute_path` must live under the project root this matcher was built for.
    /// Only directories can be excluded; files are filtered by extension instead.
    pub fn is_excluded(&self, absolute_path: &Path, is_dir: bool) -> bool {
        if !is_dir {
            return false;
        }
        match self.gitignore.matched(absolute_path, true) {
            Match::Ignore(_) => true,
            Match::None | Match::Whitelist(_) => false,
        }
    }
}
