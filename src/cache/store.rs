use crate::error::CacheError;
use crate::seal::{SealedSummary, Sealer, UnsealPolicy, is_valid_task_id, now_ms};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CACHE_FILE_VERSION: u32 = 1;

fn default_cache_file_version() -> u32 {
    CACHE_FILE_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default = "default_cache_file_version")]
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: CACHE_FILE_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON-file backed map of task id to sealed summary token.
#[derive(Debug)]
pub struct SummaryCache {
    path: PathBuf,
    file: CacheFile,
}

impl SummaryCache {
    /// Open the cache at `path`. A missing file is an empty cache.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let file = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let file: CacheFile = serde_json::from_str(&contents)?;
            if file.version != CACHE_FILE_VERSION {
                return Err(CacheError::UnsupportedVersion(file.version));
            }
            file
        } else {
            CacheFile::default()
        };

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.file.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.entries.is_empty()
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.file.entries.keys().map(String::as_str)
    }

    pub fn get_token(&self, task_id: &str) -> Option<&str> {
        self.file.entries.get(task_id).map(String::as_str)
    }

    /// Store `token` for `task_id`, replacing and returning any previous one.
    pub fn put(&mut self, task_id: &str, token: &str) -> Result<Option<String>, CacheError> {
        if !is_valid_task_id(task_id) {
            return Err(CacheError::InvalidTaskId(task_id.to_string()));
        }

        let mut next = self.file.clone();
        let previous = next.entries.insert(task_id.to_string(), token.to_string());
        self.commit(next)?;
        tracing::info!(task_id, replaced = previous.is_some(), "stored sealed summary");
        Ok(previous)
    }

    /// Unseal the summary stored for `task_id`.
    ///
    /// The token must verify under `sealer`, belong to `task_id` and satisfy
    /// `policy`; otherwise it is dropped from the cache and `None` returned.
    pub fn load(
        &mut self,
        sealer: &Sealer,
        task_id: &str,
        policy: &UnsealPolicy,
    ) -> Result<Option<SealedSummary>, CacheError> {
        self.load_at(sealer, task_id, policy, now_ms())
    }

    pub fn load_at(
        &mut self,
        sealer: &Sealer,
        task_id: &str,
        policy: &UnsealPolicy,
        now_ms: i64,
    ) -> Result<Option<SealedSummary>, CacheError> {
        let Some(token) = self.get_token(task_id) else {
            return Ok(None);
        };

        let policy = policy.clone().for_task(task_id);
        if let Some(payload) = sealer.unseal_with_at(token, &policy, now_ms) {
            return Ok(Some(payload));
        }

        let mut next = self.file.clone();
        next.entries.remove(task_id);
        self.commit(next)?;
        tracing::info!(task_id, "evicted unusable sealed summary");
        Ok(None)
    }

    pub fn remove(&mut self, task_id: &str) -> Result<bool, CacheError> {
        if !self.file.entries.contains_key(task_id) {
            return Ok(false);
        }
        let mut next = self.file.clone();
        next.entries.remove(task_id);
        self.commit(next)?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), CacheError> {
        let next = CacheFile {
            entries: BTreeMap::new(),
            ..self.file.clone()
        };
        self.commit(next)
    }

    /// Write `next` to disk and only then make it the in-memory state.
    fn commit(&mut self, next: CacheFile) -> Result<(), CacheError> {
        self.persist(&next)?;
        self.file = next;
        Ok(())
    }

    fn persist(&self, file: &CacheFile) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(file)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let result = self.write_then_rename(&tmp_path, json.as_bytes());
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn write_then_rename(&self, tmp_path: &Path, contents: &[u8]) -> Result<(), CacheError> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut tmp = options.open(tmp_path)?;
        tmp.write_all(contents)?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}
