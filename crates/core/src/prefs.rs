//! File-backed preference store.
//!
//! The counterpart of the web client's local storage: a flat string-keyed
//! map of JSON values held in a single file. Reads never fail — a missing
//! file, unreadable JSON, or a value of the wrong shape falls back to the
//! documented default. Writes rewrite the whole map through a sibling
//! temp file and rename.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::folders;
use crate::settings::{Settings, Theme};
use crate::types::Timestamp;

/// Preference key for the custom folder list (sentinel-joined form).
pub const KEY_CUSTOM_FOLDERS: &str = "custom_folders";

/// Preference key for the last-active timestamp (RFC 3339).
pub const KEY_LAST_ACTIVE: &str = "last_active_at";

/// Preference key for the settings bag.
pub const KEY_SETTINGS: &str = "settings";

/// Preference key for the theme preference.
pub const KEY_THEME: &str = "theme";

/// A string-keyed JSON preference file.
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the full map; any failure yields an empty map.
    fn load(&self) -> BTreeMap<String, Value> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    fn save(&self, map: &BTreeMap<String, Value>) -> Result<(), CoreError> {
        let text = serde_json::to_string_pretty(map)
            .map_err(|e| CoreError::Internal(format!("preference serialization failed: {e}")))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)
            .map_err(|e| CoreError::Internal(format!("preference write failed: {e}")))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| CoreError::Internal(format!("preference rename failed: {e}")))?;
        Ok(())
    }

    /// Read one value. `None` when the key is missing or the stored value
    /// does not deserialize to `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.load()
            .remove(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Write one value, keeping all other keys.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let mut map = self.load();
        let json = serde_json::to_value(value)
            .map_err(|e| CoreError::Internal(format!("preference serialization failed: {e}")))?;
        map.insert(key.to_string(), json);
        self.save(&map)
    }

    /// Remove one key. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut map = self.load();
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.save(&map)
    }

    // -----------------------------------------------------------------------
    // Typed accessors for the documented keys
    // -----------------------------------------------------------------------

    /// Custom folder list; `[]` when missing or malformed.
    pub fn custom_folders(&self) -> Vec<String> {
        self.get::<String>(KEY_CUSTOM_FOLDERS)
            .map(|joined| folders::split(&joined))
            .unwrap_or_default()
    }

    /// Normalize and store the folder list in its joined form.
    pub fn set_custom_folders<S: AsRef<str>>(&self, names: &[S]) -> Result<(), CoreError> {
        let normalized = folders::normalize(names.iter().map(AsRef::as_ref));
        self.set(KEY_CUSTOM_FOLDERS, &folders::join(&normalized))
    }

    /// Last-active timestamp, if one was recorded and parses.
    pub fn last_active(&self) -> Option<Timestamp> {
        self.get(KEY_LAST_ACTIVE)
    }

    /// Record the last-active timestamp.
    pub fn touch_last_active(&self, at: Timestamp) -> Result<(), CoreError> {
        self.set(KEY_LAST_ACTIVE, &at)
    }

    /// Settings bag; defaults when missing or malformed.
    pub fn settings(&self) -> Settings {
        self.get(KEY_SETTINGS).unwrap_or_default()
    }

    pub fn set_settings(&self, settings: &Settings) -> Result<(), CoreError> {
        self.set(KEY_SETTINGS, settings)
    }

    /// Theme preference; default theme when missing or malformed.
    pub fn theme(&self) -> Theme {
        self.get(KEY_THEME).unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), CoreError> {
        self.set(KEY_THEME, &theme)
    }
}
