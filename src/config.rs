// src/config.rs
// Runtime configuration derived from the app data dir and the settings table.

use crate::app_settings::get_setting;
use crate::error::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Overrides where imported archives are extracted (`{imports_root}/imports/...`).
pub const IMPORTS_ROOT_KEY: &str = "imports_root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub imports_root: PathBuf,
}

impl EditorConfig {
    /// `data_dir` is the app data dir, used when no `imports_root` override is set.
    pub fn load(conn: &Connection, data_dir: &Path) -> Result<Self> {
        let imports_root = match get_setting(conn, IMPORTS_ROOT_KEY)? {
            Some(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
            _ => data_dir.to_path_buf(),
        };
        log::info!("[CONFIG] Archive imports go under {}", imports_root.display());
        Ok(EditorConfig { imports_root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_settings::set_setting;
    use crate::db::init_db_tables;

    #[test]
    fn imports_default_to_data_dir() {
        let conn = Connection::open_in_memory().unwrap();
        init_db_tables(&conn).unwrap();
        let config = EditorConfig::load(&conn, Path::new("/data")).unwrap();
        assert_eq!(config.imports_root, PathBuf::from("/data"));
    }

    #[test]
    fn imports_root_setting_overrides_default() {
        let conn = Connection::open_in_memory().unwrap();
        init_db_tables(&conn).unwrap();
        set_setting(&conn, IMPORTS_ROOT_KEY, " /mnt/sites ").unwrap();
        let config = EditorConfig::load(&conn, Path::new("/data")).unwrap();
        assert_eq!(config.imports_root, PathBuf::from("/mnt/sites"));

        set_setting(&conn, IMPORTS_ROOT_KEY, "   ").unwrap();
        let config = EditorConfig::load(&conn, Path::new("/data")).unwrap();
        assert_eq!(config.imports_root, PathBuf::from("/data"));
    }
}
