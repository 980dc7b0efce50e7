// src/types.rs
use serde::{Deserialize, Serialize};

/// One entry of the indexed project structure. `path` is always relative to the
/// project root and uses forward slashes regardless of platform.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Directory {
        name: String,
        path: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        path: String,
        /// Lowercase, without the leading dot.
        ext: String,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Directory { path, .. } | TreeNode::File { path, .. } => path,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ProjectIndex {
    pub tree: Vec<TreeNode>,
    /// Relative paths of every `.html` file, pre-order over `tree`.
    pub pages: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: String,
    /// 1-based.
    pub line: usize,
    pub snippet: String,
}

// What the open-folder / open-archive commands hand back to the frontend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OpenedProject {
    /// For archives this is the extraction directory.
    pub project_root: String,
    #[serde(default)]
    pub source_zip: Option<String>,
    #[serde(flatten)]
    pub index: ProjectIndex,
}
