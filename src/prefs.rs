//! Preference store.
//!
//! Small key/value persistence for UI preferences (theme, page size). The
//! file-backed store keeps a JSON object at `~/.accountdash/preferences.json`
//! and rewrites the whole file on every set; the in-memory store backs tests
//! and embedded callers.
//!
//! Preference failures never take the dashboard down. Reads fall back to
//! defaults and writes log a warning and report the error.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde_json::Value;

use crate::error::DashboardError;

/// Preference key for the active theme.
pub const THEME_KEY: &str = "dashboardTheme";

/// Preference key for the table page size.
pub const PAGE_SIZE_KEY: &str = "pageSize";

/// Key/value persistence seam for UI preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), DashboardError>;
}

// =============================================================================
// Theme
// =============================================================================

/// Display theme. `Auto` follows the system setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    /// Next theme in the toggle cycle: auto, light, dark, auto.
    pub fn cycled(self) -> Self {
        match self {
            Theme::Auto => Theme::Light,
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Theme::Auto),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Read the stored theme, defaulting to `Auto` on absence or junk.
pub fn load_theme(store: &dyn PreferenceStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|v| v.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or_default()
}

/// Persist the theme, logging on failure.
pub fn save_theme(store: &mut dyn PreferenceStore, theme: Theme) {
    if let Err(e) = store.set(THEME_KEY, Value::String(theme.as_str().to_string())) {
        log::warn!("Failed to persist theme preference: {e}");
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// JSON-file store at `~/.accountdash/preferences.json`.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store at the default home-directory location.
    pub fn default_location() -> Result<Self, DashboardError> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Preferences("Could not find home directory".into()))?;
        Ok(Self {
            path: home.join(".accountdash").join("preferences.json"),
        })
    }

    /// Store at an explicit path (tests).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> BTreeMap<String, Value> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("Preference file unreadable ({e}); starting fresh");
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, map: &BTreeMap<String, Value>) -> Result<(), DashboardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DashboardError::Preferences(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| DashboardError::Preferences(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| DashboardError::Preferences(e.to_string()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.read_all().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), DashboardError> {
        // Read-modify-write; last writer wins, which is fine for a
        // single-user preference file.
        let mut map = self.read_all();
        map.insert(key.to_string(), value);
        self.write_all(&map)
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Volatile store for tests and callers that do not want disk state.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    map: BTreeMap<String, Value>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), DashboardError> {
        self.map.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_theme_cycle() {
        assert_eq!(Theme::Auto.cycled(), Theme::Light);
        assert_eq!(Theme::Light.cycled(), Theme::Dark);
        assert_eq!(Theme::Dark.cycled(), Theme::Auto);
    }

    #[test]
    fn test_theme_round_trip_through_store() {
        let mut store = MemoryPreferenceStore::default();
        assert_eq!(load_theme(&store), Theme::Auto);

        save_theme(&mut store, Theme::Dark);
        assert_eq!(load_theme(&store), Theme::Dark);

        // Junk values fall back to auto instead of erroring.
        store.set(THEME_KEY, json!("neon")).unwrap();
        assert_eq!(load_theme(&store), Theme::Auto);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut store = FilePreferenceStore::at_path(path.clone());
        store.set(PAGE_SIZE_KEY, json!(50)).unwrap();
        store.set(THEME_KEY, json!("light")).unwrap();

        let reopened = FilePreferenceStore::at_path(path);
        assert_eq!(reopened.get(PAGE_SIZE_KEY), Some(json!(50)));
        assert_eq!(load_theme(&reopened), Theme::Light);
    }

    #[test]
    fn test_file_store_survives_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{broken").unwrap();

        let mut store = FilePreferenceStore::at_path(path);
        assert_eq!(store.get(THEME_KEY), None);
        store.set(THEME_KEY, json!("dark")).unwrap();
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::at_path(dir.path().join("nope.json"));
        assert_eq!(store.get(PAGE_SIZE_KEY), None);
    }
}
