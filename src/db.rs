// src/db.rs
use crate::error::{EditorError, Result};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "site_editor.db";

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE_NAME)
}

// Opens (creating if needed) the settings database inside the app data dir.
pub fn init_connection(data_dir: &Path) -> Result<Connection> {
    fs::create_dir_all(data_dir).map_err(|e| EditorError::io(data_dir, e))?;
    let path = db_path(data_dir);
    log::info!("Settings database path: {}", path.display());
    let conn = Connection::open(&path)?;
    init_db_tables(&conn)?;
    Ok(conn)
}

pub fn init_db_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS app_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );
        "#,
    )?;
    log::debug!("Database tables initialized successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_database_in_missing_data_dir() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("nested/app");
        let conn = init_connection(&data_dir).unwrap();
        assert!(db_path(&data_dir).exists());
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM app_settings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
