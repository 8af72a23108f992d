//! Persisted endpoint settings.
//!
//! Two independent string entries, `settings.baseUrl` and
//! `settings.modelName`, live in a [`KeyValueStore`]. An empty string means
//! "unset". Values are stored exactly as given; no URL validation happens
//! here.

pub mod store;

use std::fmt;

use tracing::warn;

use crate::core::error::ChatError;
pub use store::{
    default_settings_path, path_display, KeyValueStore, MemoryStore, TomlFileStore,
    SETTINGS_FILE_NAME,
};

pub const BASE_URL_KEY: &str = "settings.baseUrl";
pub const MODEL_NAME_KEY: &str = "settings.modelName";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub model_name: String,
}

impl Settings {
    pub fn new(base_url: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model_name: model_name.into(),
        }
    }

    pub fn has_base_url(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    pub fn has_model_name(&self) -> bool {
        !self.model_name.trim().is_empty()
    }

    /// Both fields set, so a chat request can be attempted.
    pub fn is_configured(&self) -> bool {
        self.has_base_url() && self.has_model_name()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_unset(value: &str) -> &str {
            if value.is_empty() {
                "(unset)"
            } else {
                value
            }
        }
        writeln!(f, "  base-url: {}", or_unset(&self.base_url))?;
        write!(f, "  model: {}", or_unset(&self.model_name))
    }
}

/// Reads and writes [`Settings`] through any key-value backend.
pub struct SettingsStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Never fails: unreadable or missing entries come back as empty strings.
    pub fn load(&self) -> Settings {
        Settings {
            base_url: self.load_entry(BASE_URL_KEY),
            model_name: self.load_entry(MODEL_NAME_KEY),
        }
    }

    /// Writes both entries. If either write fails the whole save is reported
    /// as one persistence failure; the caller retries by saving again.
    pub fn save(&self, settings: &Settings) -> Result<(), ChatError> {
        self.backend.set_item(BASE_URL_KEY, &settings.base_url)?;
        self.backend.set_item(MODEL_NAME_KEY, &settings.model_name)?;
        Ok(())
    }

    fn load_entry(&self, key: &str) -> String {
        match self.backend.get_item(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                warn!(key, error = %err, "failed to load setting");
                String::new()
            }
        }
    }
}

impl SettingsStore<TomlFileStore> {
    pub fn open_at(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(TomlFileStore::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{ErrorKind, StoreError};
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_without_prior_save_is_empty() {
        let store = SettingsStore::new(MemoryStore::new());
        assert_eq!(store.load(), Settings::new("", ""));

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SettingsStore::open_at(temp_dir.path().join("settings.toml"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn save_then_load_round_trips_arbitrary_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SettingsStore::open_at(temp_dir.path().join("settings.toml"));

        let cases = [
            Settings::new("http://localhost:11434", "llama3.1:8b"),
            Settings::new("", "only-a-model"),
            Settings::new("https://example.com/v2/", ""),
            Settings::new("", ""),
            Settings::new("  padded  ", "quote \" and 'apostrophe'"),
            Settings::new("http://例え.jp", "模型-émoji-🦀"),
        ];

        for settings in cases {
            store.save(&settings).expect("save should succeed");
            assert_eq!(store.load(), settings);
        }
    }

    #[test]
    fn save_writes_the_two_fixed_keys() {
        let backend = MemoryStore::new();
        let store = SettingsStore::new(&backend);
        store
            .save(&Settings::new("http://x", "m1"))
            .expect("save should succeed");

        assert_eq!(
            backend.get_item("settings.baseUrl").expect("get").as_deref(),
            Some("http://x")
        );
        assert_eq!(
            backend.get_item("settings.modelName").expect("get").as_deref(),
            Some("m1")
        );
    }

    #[test]
    fn unreadable_file_loads_as_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "[[[ broken").expect("seed file");

        let store = SettingsStore::open_at(&path);
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn save_recovers_from_an_unreadable_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "[[[ broken").expect("seed file");
        let store = SettingsStore::open_at(&path);

        store
            .save(&Settings::new("http://x", "m1"))
            .expect("save should succeed over a corrupt file");
        assert_eq!(store.load(), Settings::new("http://x", "m1"));

        store
            .save(&Settings::new("http://y", "m2"))
            .expect("later saves keep working");
        assert_eq!(store.load(), Settings::new("http://y", "m2"));
    }

    /// Accepts the first write, rejects every later one.
    struct FlakyStore {
        inner: MemoryStore,
        writes: Cell<usize>,
    }

    impl KeyValueStore for FlakyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
            let count = self.writes.get();
            self.writes.set(count + 1);
            if count >= 1 {
                return Err(StoreError::Write {
                    path: "flaky".into(),
                    source: std::io::Error::other("quota exceeded"),
                });
            }
            self.inner.set_item(key, value)
        }
    }

    #[test]
    fn partial_write_surfaces_as_single_persistence_error() {
        let store = SettingsStore::new(FlakyStore {
            inner: MemoryStore::new(),
            writes: Cell::new(0),
        });

        let err = store
            .save(&Settings::new("http://x", "m1"))
            .expect_err("second key should fail");
        assert_eq!(err.kind(), ErrorKind::PersistenceError);
        // The first key landed; no rollback is attempted.
        assert_eq!(store.load().base_url, "http://x");
    }

    #[test]
    fn write_failure_on_disk_is_persistence_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file, not dir").expect("seed blocker");
        let store = SettingsStore::open_at(blocker.join("settings.toml"));

        let err = store
            .save(&Settings::new("http://x", "m1"))
            .expect_err("save should fail");
        assert_eq!(err.kind(), ErrorKind::PersistenceError);
    }

    #[test]
    fn configured_requires_both_non_blank_fields() {
        assert!(Settings::new("http://x", "m1").is_configured());
        assert!(!Settings::new("http://x", "").is_configured());
        assert!(!Settings::new("", "m1").is_configured());
        assert!(!Settings::new("   ", "m1").is_configured());
    }

    #[test]
    fn display_marks_unset_fields() {
        let rendered = Settings::new("http://x", "").to_string();
        assert_eq!(rendered, "  base-url: http://x\n  model: (unset)");
    }
}
