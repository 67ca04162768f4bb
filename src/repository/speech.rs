//! Speech store backed by a flat JSON file
//!
//! The file is the sole source of truth: every operation re-reads it, and
//! all mutations serialize through one async mutex so a read-modify-write
//! cannot interleave with another across the file I/O await points.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, SlugcastError};
use crate::models::SpeechEntry;

/// Maximum number of entries retained in the store; oldest are evicted first
pub const MAX_ENTRIES: usize = 50;

struct StoreInner {
    path: PathBuf,
    lock: Mutex<()>,
}

/// Repository for speech entry storage
#[derive(Clone)]
pub struct SpeechRepository {
    inner: Arc<StoreInner>,
}

impl SpeechRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: path.into(),
                lock: Mutex::new(()),
            }),
        }
    }

    /// Path of the backing store file
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Append an entry, evicting from the front once over capacity
    pub async fn append(&self, entry: SpeechEntry) -> Result<()> {
        let _guard = self.inner.lock.lock().await;

        let mut entries = self.load().await?;
        entries.push(entry);

        if entries.len() > MAX_ENTRIES {
            let excess = entries.len() - MAX_ENTRIES;
            entries.drain(..excess);
            debug!(evicted = excess, "speech store over capacity");
        }

        self.persist(&entries).await
    }

    /// All stored entries, oldest first; empty when no store exists yet
    pub async fn read_all(&self) -> Result<Vec<SpeechEntry>> {
        let _guard = self.inner.lock.lock().await;
        self.load().await
    }

    /// Truncate the store to an empty sequence
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.inner.lock.lock().await;
        self.persist(&[]).await
    }

    /// Raw file contents for diagnostics; `None` when no store exists
    pub async fn raw_contents(&self) -> Result<Option<String>> {
        let _guard = self.inner.lock.lock().await;
        match fs::read_to_string(&self.inner.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn load(&self) -> Result<Vec<SpeechEntry>> {
        let content = match fs::read_to_string(&self.inner.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            SlugcastError::CorruptStore(format!(
                "{} is not a speech entry array: {}",
                self.inner.path.display(),
                e
            ))
        })
    }

    async fn persist(&self, entries: &[SpeechEntry]) -> Result<()> {
        if let Some(parent) = self.inner.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.inner.path, json)
            .await
            .map_err(|e| SlugcastError::Storage(format!("write failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir) -> SpeechRepository {
        SpeechRepository::new(dir.path().join("data.json"))
    }

    #[tokio::test]
    async fn test_read_all_on_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        assert_eq!(repo.read_all().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_append_then_read_all_preserves_order() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        repo.append(SpeechEntry::now("first")).await.unwrap();
        repo.append(SpeechEntry::now("second")).await.unwrap();

        let entries = repo.read_all().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "first");
        assert_eq!(entries[1].text, "second");
    }

    #[tokio::test]
    async fn test_append_creates_missing_parent_dir() {
        let dir = TempDir::new().unwrap();
        let repo = SpeechRepository::new(dir.path().join(".data").join("data.json"));

        repo.append(SpeechEntry::now("hello")).await.unwrap();
        assert_eq!(repo.read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_eviction_drops_oldest_beyond_capacity() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        for i in 0..=MAX_ENTRIES {
            repo.append(SpeechEntry::now(format!("e{}", i))).await.unwrap();
        }

        let entries = repo.read_all().await.unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].text, "e1");
        assert_eq!(entries[MAX_ENTRIES - 1].text, format!("e{}", MAX_ENTRIES));
    }

    #[tokio::test]
    async fn test_clear_truncates_to_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        repo.append(SpeechEntry::now("gone soon")).await.unwrap();
        repo.clear().await.unwrap();

        assert_eq!(repo.read_all().await.unwrap(), vec![]);
        // Store file still exists and is a readable empty array.
        assert_eq!(repo.raw_contents().await.unwrap().unwrap().trim(), "[]");
    }

    #[tokio::test]
    async fn test_corrupt_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        std::fs::write(repo.path(), "{ not an array").unwrap();

        let err = repo.read_all().await.unwrap_err();
        assert!(matches!(err, SlugcastError::CorruptStore(_)));

        let err = repo.append(SpeechEntry::now("nope")).await.unwrap_err();
        assert!(matches!(err, SlugcastError::CorruptStore(_)));
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_empty_sequence() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        std::fs::write(repo.path(), "").unwrap();
        assert_eq!(repo.read_all().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_store_file_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        repo.append(SpeechEntry::now("hello")).await.unwrap();

        let raw = repo.raw_contents().await.unwrap().unwrap();
        assert!(raw.contains("\n"));
        assert!(raw.contains("\"text\": \"hello\""));
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_no_entries() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        let mut tasks = Vec::new();
        for i in 0..10 {
            let repo = repo.clone();
            tasks.push(tokio::spawn(async move {
                repo.append(SpeechEntry::now(format!("c{}", i))).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.read_all().await.unwrap().len(), 10);
    }
}
