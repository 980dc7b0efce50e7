// src/project.rs
// The open project and the operations the frontend performs on it.
// Every operation takes the project root explicitly; nothing reads ambient state.

use crate::archive::{create_extraction_dir, extract_zip_archive};
use crate::error::{EditorError, Result};
use crate::indexer::build_index;
use crate::path_guard;
use crate::types::{OpenedProject, SearchHit};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSession {
    pub root: PathBuf,
    /// Set when the project was imported from an archive.
    pub source_zip: Option<PathBuf>,
}

/// Holds at most one open project. Opening another replaces it.
///
/// The index handed out on open is kept too, so a frontend that attaches after
/// the project was opened (the launch-archive case) can still fetch it.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<ProjectSession>,
    opened: Option<OpenedProject>,
}

impl SessionState {
    pub fn current(&self) -> Option<&ProjectSession> {
        self.current.as_ref()
    }

    /// What the last successful open returned, if a project is loaded.
    pub fn opened(&self) -> Option<&OpenedProject> {
        self.opened.as_ref()
    }

    pub fn root(&self) -> Result<&Path> {
        self.current
            .as_ref()
            .map(|session| session.root.as_path())
            .ok_or(EditorError::NotLoaded)
    }

    pub fn replace(&mut self, session: ProjectSession, opened: OpenedProject) -> Option<ProjectSession> {
        log::info!("[SESSION] Active project is now {}", session.root.display());
        self.opened = Some(opened);
        self.current.replace(session)
    }
}

pub fn open_folder(path: &Path) -> Result<(ProjectSession, OpenedProject)> {
    if !path.is_dir() {
        log::warn!("[PROJECT] Not a directory: {}", path.display());
        return Err(EditorError::NotFound);
    }
    let index = build_index(path)?;
    let session = ProjectSession {
        root: path.to_path_buf(),
        source_zip: None,
    };
    let opened = OpenedProject {
        project_root: path.to_string_lossy().to_string(),
        source_zip: None,
        index,
    };
    Ok((session, opened))
}

/// Extracts `zip_path` into a fresh directory under `imports_root` and indexes it.
pub fn open_archive(
    imports_root: &Path,
    zip_path: &Path,
    now_millis: i64,
) -> Result<(ProjectSession, OpenedProject)> {
    let extraction_dir = create_extraction_dir(imports_root, zip_path, now_millis);
    let written = extract_zip_archive(zip_path, &extraction_dir)?;
    log::info!(
        "[PROJECT] Imported {} files from {} into {}",
        written,
        zip_path.display(),
        extraction_dir.display()
    );

    let index = build_index(&extraction_dir)?;
    let opened = OpenedProject {
        project_root: extraction_dir.to_string_lossy().to_string(),
        source_zip: Some(zip_path.to_string_lossy().to_string()),
        index,
    };
    let session = ProjectSession {
        root: extraction_dir,
        source_zip: Some(zip_path.to_path_buf()),
    };
    Ok((session, opened))
}

pub fn read_file(root: &Path, relative_path: &str) -> Result<String> {
    let target = path_guard::resolve(root, relative_path)?;
    let bytes = fs::read(&target).map_err(|e| EditorError::io(&target, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Overwrites the file with `content` byte for byte. Not transactional: a failed
/// write leaves the caller's buffer and the disk diverged.
pub fn write_file(root: &Path, relative_path: &str, content: &str) -> Result<()> {
    let target = path_guard::resolve(root, relative_path)?;
    fs::write(&target, content).map_err(|e| EditorError::io(&target, e))?;
    log::info!("[PROJECT] Saved {} ({} bytes)", relative_path, content.len());
    Ok(())
}

/// Copies a user-picked file over a project asset. Only the destination is guarded.
pub fn replace_asset(root: &Path, target_relative_path: &str, source: &Path) -> Result<()> {
    let destination = path_guard::resolve(root, target_relative_path)?;
    fs::copy(source, &destination).map_err(|e| EditorError::io(source, e))?;
    log::info!(
        "[PROJECT] Replaced {} with {}",
        target_relative_path,
        source.display()
    );
    Ok(())
}

pub fn search(root: &Path, query: &str) -> Result<Vec<SearchHit>> {
    crate::search::search(root, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_session_is_not_loaded() {
        let state = SessionState::default();
        assert!(matches!(state.root(), Err(EditorError::NotLoaded)));
        assert!(state.current().is_none());
    }

    #[test]
    fn opening_replaces_previous_project() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let mut state = SessionState::default();

        let (session, opened) = open_folder(first.path()).unwrap();
        assert!(state.replace(session, opened).is_none());
        let (session, opened) = open_folder(second.path()).unwrap();
        let previous = state.replace(session, opened).unwrap();

        assert_eq!(previous.root, first.path());
        assert_eq!(state.root().unwrap(), second.path());
        assert_eq!(
            state.opened().map(|opened| opened.project_root.clone()),
            Some(second.path().to_string_lossy().to_string())
        );
    }

    #[test]
    fn opened_project_stays_available_after_open() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Hi</h1>").unwrap();
        let mut state = SessionState::default();
        assert!(state.opened().is_none());

        let (session, opened) = open_folder(dir.path()).unwrap();
        state.replace(session, opened.clone());
        assert_eq!(state.opened(), Some(&opened));
        assert_eq!(state.opened().unwrap().index.pages, vec!["index.html"]);
    }

    #[test]
    fn open_folder_rejects_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("index.html");
        fs::write(&file, "x").unwrap();
        assert!(matches!(open_folder(&file), Err(EditorError::NotFound)));
    }

    #[test]
    fn write_then_read_round_trips_exactly() {
        let dir = tempdir().unwrap();
        let text = "  <p>Ünïcödé\r\n\ttabs</p>\n\n";
        write_file(dir.path(), "page.html", text).unwrap();
        assert_eq!(read_file(dir.path(), "page.html").unwrap(), text);
    }

    #[test]
    fn reads_and_writes_are_guarded() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            write_file(dir.path(), "../escape.html", "x"),
            Err(EditorError::OutOfBounds(_))
        ));
        assert!(matches!(
            read_file(dir.path(), "../../etc/passwd"),
            Err(EditorError::OutOfBounds(_))
        ));
        assert!(matches!(read_file(dir.path(), "missing.html"), Err(EditorError::Io { .. })));
    }

    #[test]
    fn replace_asset_copies_bytes_into_project() {
        let project = tempdir().unwrap();
        let picked = tempdir().unwrap();
        fs::create_dir(project.path().join("img")).unwrap();
        fs::write(project.path().join("img/hero.png"), [1u8, 2, 3]).unwrap();
        let source = picked.path().join("new.png");
        fs::write(&source, [9u8, 8, 7, 6]).unwrap();

        replace_asset(project.path(), "img/hero.png", &source).unwrap();
        assert_eq!(fs::read(project.path().join("img/hero.png")).unwrap(), vec![9, 8, 7, 6]);
        assert!(matches!(
            replace_asset(project.path(), "../hero.png", &source),
            Err(EditorError::OutOfBounds(_))
        ));
    }
}
