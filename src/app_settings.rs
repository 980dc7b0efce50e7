// src/app_settings.rs
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM app_settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO app_settings (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

#[cfg(feature = "desktop")]
pub mod commands {
    use crate::commands::AppState;
    use tauri::{command, State};

    #[command]
    pub fn get_app_setting_cmd(state: State<AppState>, key: String) -> Result<Option<String>, String> {
        let conn_guard = state
            .conn
            .lock()
            .map_err(|e| format!("DB lock failed for get_app_setting: {}", e))?;
        super::get_setting(&conn_guard, &key)
            .map_err(|e| format!("Failed to query app_settings for key '{}': {}", key, e))
    }

    #[command]
    pub fn set_app_setting_cmd(state: State<AppState>, key: String, value: String) -> Result<(), String> {
        let conn_guard = state
            .conn
            .lock()
            .map_err(|e| format!("DB lock failed for set_app_setting: {}", e))?;
        super::set_setting(&conn_guard, &key, &value)
            .map_err(|e| format!("Failed to set app_setting for key '{}': {}", key, e))
    }
}
