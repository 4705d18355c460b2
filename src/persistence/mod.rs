use std::{
    collections::{
        HashMap,
        VecDeque,
    },
    fs,
    path::PathBuf,
};

use serde::{
    de::DeserializeOwned,
    Deserialize,
    Serialize,
};

use crate::{
    core::EdulearnError,
    gamification::UserProgress,
};

const APP_NAME: &str = "edulearn";

pub const PROGRESS_KEY: &str = "progress";
pub const RECENT_DOCS_KEY: &str = "recent_docs";

const MAX_RECENT_DOCS: usize = 5;

/// String key-value storage seam. Implementations may lose data (quota,
/// corruption); readers always degrade to defaults instead of failing.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), EdulearnError>;
}

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

/// One JSON file per key under the local app data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        Self { dir: get_app_data_dir() }
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        let _ = fs::create_dir_all(&dir);
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EdulearnError> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// Volatile store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EdulearnError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read a JSON value from the store; a missing or corrupt entry comes back
/// as the default, never as an error.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Corrupt \"{key}\" entry, using defaults: {e}");
            T::default()
        }
    }
}

/// Write a JSON value to the store. Failures are logged and swallowed;
/// persistence must never block generation.
pub fn save<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to encode \"{key}\": {e}");
            return;
        }
    };
    if let Err(e) = store.set(key, &json) {
        log::warn!("Failed to persist \"{key}\": {e}");
    }
}

pub fn load_progress(store: &dyn KeyValueStore) -> UserProgress {
    load_or_default(store, PROGRESS_KEY)
}

pub fn save_progress(store: &mut dyn KeyValueStore, progress: &UserProgress) {
    save(store, PROGRESS_KEY, progress);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentDocumentEntry {
    pub name: String,
    pub pages: u32,
    pub processed_at: chrono::DateTime<chrono::Utc>,
}

/// Most-recently processed documents, newest first, capped at five.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentDocuments {
    entries: VecDeque<RecentDocumentEntry>,
}

impl RecentDocuments {
    pub fn add(&mut self, name: &str, pages: u32) {
        self.entries.retain(|entry| entry.name != name);
        self.entries.push_front(RecentDocumentEntry {
            name: name.to_string(),
            pages,
            processed_at: chrono::Utc::now(),
        });
        while self.entries.len() > MAX_RECENT_DOCS {
            self.entries.pop_back();
        }
    }

    pub fn entries(&self) -> &VecDeque<RecentDocumentEntry> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn load_recent_documents(store: &dyn KeyValueStore) -> RecentDocuments {
    load_or_default(store, RECENT_DOCS_KEY)
}

pub fn save_recent_documents(store: &mut dyn KeyValueStore, recent: &RecentDocuments) {
    save(store, RECENT_DOCS_KEY, recent);
}
