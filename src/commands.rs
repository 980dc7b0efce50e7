// src/commands.rs
// Tauri command handlers. Each one pulls the active root out of the session and
// passes it explicitly to the library call.

use crate::config::EditorConfig;
use crate::project::{self, ProjectSession, SessionState};
use crate::types::{OpenedProject, SearchHit};
use chrono::Utc;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tauri::{command, AppHandle, Emitter, State};

pub const PROJECT_LOADED_EVENT: &str = "project-loaded";

// --- Shared State ---

pub struct AppState {
    pub conn: Arc<Mutex<Connection>>,
    pub session: Mutex<SessionState>,
    pub config: EditorConfig,
}

impl AppState {
    /// Root of the open project, if any, cloned out of the lock.
    pub fn current_root(&self) -> Option<PathBuf> {
        let guard = self.session.lock().ok()?;
        guard.current().map(|session| session.root.clone())
    }

    fn require_root(&self) -> Result<PathBuf, String> {
        let guard = self
            .session
            .lock()
            .map_err(|e| format!("Session lock failed: {}", e))?;
        guard
            .root()
            .map(|root| root.to_path_buf())
            .map_err(|e| e.to_string())
    }

    // Session and its index are swapped under one lock so readers never see a mix.
    fn activate(&self, session: ProjectSession, opened: &OpenedProject) -> Result<(), String> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| format!("Session lock failed: {}", e))?;
        guard.replace(session, opened.clone());
        Ok(())
    }
}

// --- Blocking Helpers ---

// Runs blocking project work off the async runtime, flattening join errors.
async fn run_blocking<T, F>(label: &'static str, work: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
{
    match tauri::async_runtime::spawn_blocking(work).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            log::error!("[CMD] {} failed: {}", label, e);
            Err(e.to_string())
        }
        Err(join_err) => {
            let err_msg = format!("{} task failed unexpectedly (panic or join error): {}", label, join_err);
            log::error!("[CMD] {}", err_msg);
            Err(err_msg)
        }
    }
}

// --- Project Commands ---

#[command(async)]
pub async fn open_project_folder(state: State<'_, AppState>, path: String) -> Result<OpenedProject, String> {
    log::info!("[CMD] Opening folder: {}", path);
    let (session, opened) =
        run_blocking("open folder", move || project::open_folder(&PathBuf::from(path))).await?;
    state.activate(session, &opened)?;
    Ok(opened)
}

#[command(async)]
pub async fn open_project_archive(state: State<'_, AppState>, path: String) -> Result<OpenedProject, String> {
    log::info!("[CMD] Opening archive: {}", path);
    let imports_root = state.config.imports_root.clone();
    let (session, opened) = run_blocking("open archive", move || {
        project::open_archive(&imports_root, &PathBuf::from(path), Utc::now().timestamp_millis())
    })
    .await?;
    state.activate(session, &opened)?;
    Ok(opened)
}

/// The project currently open, or `None`. The frontend calls this on load so a
/// project opened before it was listening (launch archive) is not missed.
#[command]
pub fn current_project(state: State<AppState>) -> Result<Option<OpenedProject>, String> {
    let guard = state
        .session
        .lock()
        .map_err(|e| format!("Session lock failed: {}", e))?;
    Ok(guard.opened().cloned())
}

// --- File Commands ---

#[command]
pub fn read_project_file(state: State<AppState>, relative_path: String) -> Result<String, String> {
    let root = state.require_root()?;
    project::read_file(&root, &relative_path).map_err(|e| e.to_string())
}

#[command]
pub fn write_project_file(
    state: State<AppState>,
    relative_path: String,
    content: String,
) -> Result<(), String> {
    let root = state.require_root()?;
    project::write_file(&root, &relative_path, &content).map_err(|e| e.to_string())
}

#[command]
pub fn replace_project_asset(
    state: State<AppState>,
    target_relative_path: String,
    source_absolute_path: String,
) -> Result<(), String> {
    let root = state.require_root()?;
    project::replace_asset(&root, &target_relative_path, &PathBuf::from(source_absolute_path))
        .map_err(|e| e.to_string())
}

// --- Search ---

#[command(async)]
pub async fn search_project(state: State<'_, AppState>, query: String) -> Result<Vec<SearchHit>, String> {
    let root = state.require_root()?;
    // Blank queries never touch the disk, so skip the blocking pool entirely.
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    run_blocking("search", move || project::search(&root, &query)).await
}

// --- Launch Archive ---

/// Opens an archive passed on the command line and announces it to the frontend.
/// The event is best effort; `current_project` covers a frontend that was not listening yet.
pub fn open_launch_archive(app_handle: AppHandle, state: &AppState, zip_path: String) {
    log::info!("[LAUNCH] Auto-opening archive from arguments: {}", zip_path);
    let result = project::open_archive(
        &state.config.imports_root,
        &PathBuf::from(&zip_path),
        Utc::now().timestamp_millis(),
    );
    match result {
        Ok((session, opened)) => {
            if let Err(e) = state.activate(session, &opened) {
                log::error!("[LAUNCH] {}", e);
                return;
            }
            if let Err(e) = app_handle.emit(PROJECT_LOADED_EVENT, &opened) {
                log::error!("[LAUNCH] Failed to emit {}: {}", PROJECT_LOADED_EVENT, e);
            }
        }
        Err(e) => log::error!("[LAUNCH] Could not open {}: {}", zip_path, e),
    }
}
