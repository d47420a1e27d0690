//! JSON file backend.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;

use super::{RecordMap, RecordStore, StoreError};

/// Stores the catalog as one pretty-printed JSON object.
///
/// Every write rewrites the file in place. A crash mid-write can leave a
/// truncated file behind; there is no temporary file or atomic rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, action: &'static str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStore for JsonFileStore {
    /// A missing (or blank) file reads as an empty catalog.
    fn read(&self) -> Result<RecordMap, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "catalog file absent; starting empty");
                return Ok(RecordMap::new());
            }
            Err(err) => return Err(self.io_error("read", err)),
        };

        if text.trim().is_empty() {
            return Ok(RecordMap::new());
        }

        let records: RecordMap = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "catalog file read");
        Ok(records)
    }

    fn write(&self, records: &RecordMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.io_error("create directory for", err))?;
            }
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser)?;

        fs::write(&self.path, buf).map_err(|err| self.io_error("write", err))?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "catalog file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoredRecord;
    use serde_json::json;

    fn record(kind: &str, fields: serde_json::Value) -> StoredRecord {
        StoredRecord {
            kind: kind.to_string(),
            fields,
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn write_creates_parent_directory_and_round_trips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books").join("index.json"));

        let mut records = RecordMap::new();
        records.insert("b".to_string(), record("ShowcaseItem", json!({ "identifier": "b" })));
        records.insert("a".to_string(), record("AudioBook", json!({ "identifier": "a" })));
        store.write(&records).unwrap();

        let back = store.read().unwrap();
        assert_eq!(back, records);
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn write_uses_four_space_indent_and_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{\"stale\": {\"kind\": \"X\", \"fields\": {}}}").unwrap();
        let store = JsonFileStore::new(&path);

        let mut records = RecordMap::new();
        records.insert("978-1".to_string(), record("ShowcaseItem", json!({})));
        store.write(&records).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"978-1\": {\n        \"kind\""));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).read().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
