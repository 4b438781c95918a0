//! JSON file counter store: one `<key>.json` per key in a directory.
//!
//! Writes go to a temporary file that is renamed over the target, so a crash
//! mid-write leaves the previous record intact.
//!
//! Both calls are plain blocking `std::fs` calls. Records are small and a gate
//! device writes at scan rate, which keeps them well inside the
//! [`CounterStore`] latency contract.

use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::StoreError;
use crate::ports::CounterStore;

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
                _ => '_',
            })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl CounterStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let raw = match fs::read(self.path_for(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load("scanner.stats").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));
        let value = json!({"session": 3, "sessionStart": 1000});
        store.save("scanner.stats", &value).unwrap();
        assert_eq!(store.load("scanner.stats").unwrap(), Some(value));
        assert!(dir.path().join("nested/scanner.stats.json").exists());
        assert!(!dir.path().join("nested/scanner.stats.json.tmp").exists());
    }

    #[test]
    fn test_overwrite_replaces_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save("k", &json!(1)).unwrap();
        store.save("k", &json!(2)).unwrap();
        assert_eq!(store.load("k").unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("scanner.stats.json"), b"{oops").unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.load("scanner.stats"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_key_is_sanitized() {
        let store = JsonFileStore::new("/tmp/x");
        assert_eq!(store.path_for("a/b"), PathBuf::from("/tmp/x/a_b.json"));
    }
}
