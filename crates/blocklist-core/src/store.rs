//! Persisted JSON store of blocklist entries

use crate::error::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timestamp format used for entry dates, e.g. "2024-01-01 12:00:00 +0000"
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S +0000";

/// One contact fact: a normalized number and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Normalized phone number, digits and a leading `+` only
    pub number: String,
    /// Display name annotated with the source column label,
    /// e.g. "John Smith (Mobile Phone)"
    pub name: String,
    /// When the entry was first imported (UTC)
    pub date_created: String,
    /// When the entry was last written (UTC)
    pub date_modified: String,
}

impl Entry {
    /// Create an entry with both dates set to the given run timestamp
    pub fn new(number: impl Into<String>, name: impl Into<String>, date: &str) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            date_created: date.to_string(),
            date_modified: date.to_string(),
        }
    }
}

/// The persisted store: a named, ordered list of entries.
///
/// Field order matters: `name` before `entries` keeps the serialized
/// JSON stable for textual diffs of the store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Store name, defaults to the store file's base name
    pub name: String,
    /// Entries in first-seen order, unique by number after cleanup
    pub entries: Vec<Entry>,
}

impl Store {
    /// Create a new empty store
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Load a store from JSON, or create an empty one named after the
    /// file stem if the file does not exist. A file that exists but is
    /// not a valid store is an error, not an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new(store_name_from_path(path)));
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| Error::StoreParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the store to JSON, but only when it has entries.
    ///
    /// Skipping the write on an empty result protects a prior store
    /// from being overwritten by an import where everything was
    /// filtered out. Returns whether the file was written.
    pub fn save_if_nonempty<P: AsRef<Path>>(&self, path: P) -> Result<bool> {
        if self.entries.is_empty() {
            return Ok(false);
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(true)
    }
}

/// Store name derived from the store file's base name, without extension
fn store_name_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("out")
        .to_string()
}

/// Current UTC time in the store's timestamp format
pub fn run_timestamp() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = Store::load(dir.path().join("blocklist.json")).unwrap();

        assert_eq!(store.name, "blocklist");
        assert!(store.entries.is_empty());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let mut store = Store::new("out");
        store
            .entries
            .push(Entry::new("+41791234567", "John (phone)", "2024-01-01 12:00:00 +0000"));

        assert!(store.save_if_nonempty(&path).unwrap());

        let loaded = Store::load(&path).unwrap();
        assert_eq!(loaded.name, "out");
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].number, "+41791234567");
        assert_eq!(loaded.entries[0].date_created, "2024-01-01 12:00:00 +0000");
    }

    #[test]
    fn test_empty_store_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let store = Store::new("out");
        assert!(!store.save_if_nonempty(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_serialized_field_order_is_name_then_entries() {
        let store = Store::new("mylist");
        let json = serde_json::to_string(&store).unwrap();

        let name_pos = json.find("\"name\"").unwrap();
        let entries_pos = json.find("\"entries\"").unwrap();
        assert!(name_pos < entries_pos);
    }

    #[test]
    fn test_malformed_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Store::load(&path).unwrap_err();
        assert!(matches!(err, Error::StoreParse { .. }));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, r#"{"something": "else"}"#).unwrap();

        let err = Store::load(&path).unwrap_err();
        assert!(matches!(err, Error::StoreParse { .. }));
    }

    #[test]
    fn test_run_timestamp_format() {
        let ts = run_timestamp();
        assert!(ts.ends_with(" +0000"));
        assert_eq!(ts.len(), "2024-01-01 12:00:00 +0000".len());
    }
}
