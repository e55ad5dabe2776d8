//! Key-value record store backing the save system.
//!
//! Natively each logical key is one JSON file under `saves/`, written
//! atomically (temp file, then rename). On the web the same keys go to
//! window.localStorage.

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::fs;
    use std::path::PathBuf;

    const SAVE_DIR: &str = "saves";

    fn record_path(key: &str) -> PathBuf {
        PathBuf::from(SAVE_DIR).join(format!("{key}.json"))
    }

    pub fn write_record(key: &str, payload: &str) -> Result<(), String> {
        fs::create_dir_all(SAVE_DIR)
            .map_err(|e| format!("Failed to create save directory: {e}"))?;
        let path = record_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(|e| format!("Failed to write {key}: {e}"))?;
        fs::rename(&tmp, &path).map_err(|e| format!("Failed to commit {key}: {e}"))?;
        Ok(())
    }

    pub fn read_record(key: &str) -> Result<Option<String>, String> {
        let path = record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| format!("Failed to read {key}: {e}"))
    }

    pub fn delete_record(key: &str) -> Result<(), String> {
        let path = record_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| format!("Failed to delete {key}: {e}"))?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod backend {
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .ok_or_else(|| "No window".to_string())?
            .local_storage()
            .map_err(|_| "localStorage unavailable".to_string())?
            .ok_or_else(|| "localStorage unavailable".to_string())
    }

    pub fn write_record(key: &str, payload: &str) -> Result<(), String> {
        storage()?
            .set_item(key, payload)
            .map_err(|_| format!("Failed to write {key}"))
    }

    pub fn read_record(key: &str) -> Result<Option<String>, String> {
        storage()?
            .get_item(key)
            .map_err(|_| format!("Failed to read {key}"))
    }

    pub fn delete_record(key: &str) -> Result<(), String> {
        storage()?
            .remove_item(key)
            .map_err(|_| format!("Failed to delete {key}"))
    }
}

pub use backend::{delete_record, read_record, write_record};

/// Autosaved history of the current run.
pub const STATES_KEY: &str = "states";
/// Named saved games.
pub const SAVED_GAMES_KEY: &str = "savedGames";
