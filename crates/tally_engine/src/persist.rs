use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::store::{MetaStore, StoreError};

/// Ensure the store directory exists; create if missing.
pub fn ensure_store_dir(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| StoreError::StoreDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(StoreError::StoreDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| StoreError::StoreDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| StoreError::StoreDir(e.to_string()))?;
    Ok(())
}

/// File-backed metadata store: one JSON document per post.
///
/// Every mutation rewrites the post's document through a temp file and an
/// atomic rename, so `replace` is a single observable step and readers never
/// see a half-written or missing document.
#[derive(Debug)]
pub struct FileMetaStore {
    dir: PathBuf,
}

impl FileMetaStore {
    pub fn new(dir: PathBuf) -> Result<Self, StoreError> {
        ensure_store_dir(&dir)?;
        Ok(Self { dir })
    }

    fn post_path(&self, post_id: u64) -> PathBuf {
        self.dir.join(format!("post_{post_id}.json"))
    }

    fn load(&self, post_id: u64) -> Result<BTreeMap<String, String>, StoreError> {
        let path = self.post_path(post_id);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))
    }

    fn write_atomic(&self, post_id: u64, fields: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let target = self.post_path(post_id);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        let raw = serde_json::to_string_pretty(fields)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        tmp.write_all(raw.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MetaStore for FileMetaStore {
    async fn get(&self, post_id: u64, field: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load(post_id)?.get(field).cloned())
    }

    async fn set(&self, post_id: u64, field: &str, value: &str) -> Result<(), StoreError> {
        let mut fields = self.load(post_id)?;
        fields.insert(field.to_string(), value.to_string());
        self.write_atomic(post_id, &fields)
    }

    async fn delete(&self, post_id: u64, field: &str) -> Result<(), StoreError> {
        let mut fields = self.load(post_id)?;
        if fields.remove(field).is_some() {
            self.write_atomic(post_id, &fields)?;
        }
        Ok(())
    }

    async fn replace(&self, post_id: u64, field: &str, value: &str) -> Result<(), StoreError> {
        // One rewrite and one rename; the field is never observably absent.
        self.set(post_id, field, value).await
    }
}
