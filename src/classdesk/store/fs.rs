use super::KeyValueStore;
use crate::error::{ClassdeskError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const STORAGE_FILENAME: &str = "storage.json";
const BACKUP_FILENAME: &str = "storage.json.bak";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join(STORAGE_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ClassdeskError::Io)?;
        }
        Ok(())
    }

    /// Where an unparseable storage file is moved before starting over.
    pub fn backup_path(&self) -> PathBuf {
        self.root.join(BACKUP_FILENAME)
    }

    /// An unparseable file is moved to `storage.json.bak` and reads as empty.
    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        let data_file = self.storage_path();
        if !data_file.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&data_file).map_err(ClassdeskError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let backup = self.backup_path();
                tracing::warn!(
                    path = %data_file.display(),
                    backup = %backup.display(),
                    error = %e,
                    "storage file is not valid JSON, starting over"
                );
                if let Err(e) = fs::rename(&data_file, &backup) {
                    tracing::warn!(error = %e, "could not set the storage file aside");
                }
                Ok(BTreeMap::new())
            }
        }
    }

    fn save_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(entries).map_err(ClassdeskError::Serialization)?;
        let tmp_file = self
            .root
            .join(format!(".storage-{}.tmp", std::process::id()));
        fs::write(&tmp_file, content).map_err(ClassdeskError::Io)?;
        fs::rename(&tmp_file, self.storage_path()).map_err(ClassdeskError::Io)?;
        tracing::debug!(entries = entries.len(), "storage file written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.save_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load_entries()?;
        if entries.remove(key).is_some() {
            self.save_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("nested"));
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!store.storage_path().exists());
    }

    #[test]
    fn set_then_get_across_instances() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());
        store.set("dashboard.theme", "dark").unwrap();

        let reopened = FileStore::new(temp.path().to_path_buf());
        assert_eq!(
            reopened.get("dashboard.theme").unwrap(),
            Some("dark".to_string())
        );
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        store.remove("never-set").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());
        store.set("k", "v").unwrap();

        for entry in fs::read_dir(temp.path()).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn unreadable_storage_file_is_set_aside() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(STORAGE_FILENAME), "{truncated").unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());

        assert_eq!(store.get("k").unwrap(), None);
        assert_eq!(
            fs::read_to_string(store.backup_path()).unwrap(),
            "{truncated"
        );
        assert!(!store.storage_path().exists());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }
}
