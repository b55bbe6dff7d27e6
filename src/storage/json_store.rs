// JSON file persistence for the seen set: `{ "job_ids": [...] }`
use super::seen::SeenSet;
use crate::model::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SeenFile {
    #[serde(default)]
    job_ids: Vec<String>,
}

pub struct JsonSeenStore {
    path: PathBuf,
}

impl JsonSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted ids. A missing or unreadable file is treated as
    /// "nothing seen yet".
    pub fn load(&self) -> SeenSet {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No seen-jobs file at {}, starting fresh", self.path.display());
                return SeenSet::new();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return SeenSet::new();
            }
        };

        match serde_json::from_str::<SeenFile>(&content) {
            Ok(file) => {
                let seen = SeenSet::from_ids(file.job_ids);
                info!("Loaded {} seen job ids from {}", seen.len(), self.path.display());
                seen
            }
            Err(e) => {
                warn!("Ignoring corrupt seen-jobs file {}: {}", self.path.display(), e);
                SeenSet::new()
            }
        }
    }

    /// Overwrites the file with the full set.
    pub fn save(&self, seen: &SeenSet) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = SeenFile {
            job_ids: seen.sorted_ids(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JobIdentifier;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("job-sniper-{}-{}", name, rand::random::<u64>()))
            .join("sent_jobs.json")
    }

    #[test]
    fn missing_file_loads_empty() {
        let store = JsonSeenStore::new(temp_path("missing"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ job_ids: [oops").unwrap();
        assert!(JsonSeenStore::new(&path).load().is_empty());

        fs::write(&path, r#"{"job_ids": [1, 2, 3]}"#).unwrap();
        assert!(JsonSeenStore::new(&path).load().is_empty());
    }

    #[test]
    fn file_without_key_loads_empty() {
        let path = temp_path("nokey");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"other": true}"#).unwrap();
        assert!(JsonSeenStore::new(&path).load().is_empty());
    }

    #[test]
    fn save_overwrites_with_full_set() {
        let path = temp_path("save");
        let store = JsonSeenStore::new(&path);

        store.save(&SeenSet::from_ids(["111", "222"])).unwrap();
        store.save(&SeenSet::from_ids(["333"])).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains(&JobIdentifier("333".into())));

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["job_ids"], serde_json::json!(["333"]));
    }
}
