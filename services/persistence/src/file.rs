//! Local file backend
//!
//! The ledger is a single JSON document (a top-level array of match
//! records) at a fixed path. Parent directories are created on write.
//!
//! A missing file reads as an empty ledger. So does a corrupt one: the
//! next successful write replaces it.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use types::matches::MatchRecord;

use crate::normalize::{decode_ledger, encode_ledger};
use crate::store::{Backend, LedgerStore, StoreError};

/// Default ledger location, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/matches.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "matches.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl LedgerStore for FileStore {
    fn backend(&self) -> Backend {
        Backend::File
    }

    async fn read(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match decode_ledger(&bytes) {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ledger file is corrupt; reading as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write(&self, matches: &[MatchRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let document = encode_ledger(matches)?;

        // Write to tmp, then rename over the previous document
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, document.as_bytes()).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use types::ids::RecordedAt;
    use types::matches::Outcome;

    fn record(a: &str, b: &str, outcome: Outcome, millis: i64) -> MatchRecord {
        MatchRecord {
            participant_a: a.into(),
            participant_b: b.into(),
            outcome,
            recorded_at: RecordedAt::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("matches.json"));
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data").join("nested").join("matches.json");
        let store = FileStore::new(&path);

        let ledger = vec![record("alice", "bob", Outcome::AWins, 1)];
        store.write(&ledger).await.unwrap();

        assert!(path.exists());
        assert!(!store.tmp_path().exists());
        assert_eq!(store.read().await.unwrap(), ledger);
    }

    #[tokio::test]
    async fn test_document_is_a_top_level_array() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("matches.json"));
        store
            .write(&[record("alice", "bob", Outcome::BWins, 0)])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "participantA": "alice",
                "participantB": "bob",
                "outcome": "B_WINS",
                "recordedAt": "1970-01-01T00:00:00.000Z",
            }])
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty_and_is_recoverable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("matches.json");
        std::fs::write(&path, b"[{\"participantA\": ").unwrap();
        let store = FileStore::new(&path);

        assert!(store.read().await.unwrap().is_empty());

        let ledger = vec![record("carol", "dave", Outcome::Draw, 7)];
        store.write(&ledger).await.unwrap();
        assert_eq!(store.read().await.unwrap(), ledger);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_only_latest_ledger() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("matches.json"));
        store
            .write(&[record("alice", "bob", Outcome::AWins, 1), record("bob", "carol", Outcome::Draw, 2)])
            .await
            .unwrap();
        store.write(&[]).await.unwrap();
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_legacy_document_is_readable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("matches.json");
        std::fs::write(
            &path,
            r#"[{"player1":"alice","player2":"bob","result":"player1","date":"2024-05-01T12:00:00.000Z"}]"#,
        )
        .unwrap();

        let ledger = FileStore::new(&path).read().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].outcome, Outcome::AWins);
    }

    #[tokio::test]
    async fn test_directory_in_place_of_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        assert!(matches!(store.read().await, Err(StoreError::Io(_))));
    }
}
