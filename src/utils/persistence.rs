//! JSON persistence helpers for files under ~/.banamatix/.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR: &str = ".banamatix";
const ACTIVE_THEME_FILE: &str = "active_theme.json";

/// Get the ~/.banamatix/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(DATA_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.banamatix/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load JSON from `path`, returning `T::default()` if missing or invalid.
pub fn load_json_from<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to `path`.
pub fn save_json_to<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Load a JSON file from ~/.banamatix/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    match data_path(filename) {
        Ok(path) => load_json_from(&path),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.banamatix/.
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<()> {
    save_json_to(&data_path(filename)?, data)
}

/// Locally remembered theme, so the front end starts in the last applied theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTheme {
    pub theme_id: Option<String>,
}

pub fn load_active_theme() -> ActiveTheme {
    load_json_or_default(ACTIVE_THEME_FILE)
}

pub fn save_active_theme(theme_id: &str) -> io::Result<()> {
    save_json(
        ACTIVE_THEME_FILE,
        &ActiveTheme {
            theme_id: Some(theme_id.to_string()),
        },
    )
}
