//! Backend selection
//!
//! The single construction point for the ledger store. Selection depends
//! only on what the environment makes available and is done once per
//! process:
//!
//! 1. KV credentials configured → `KvStore`
//! 2. Data file location writable → `FileStore`
//! 3. Otherwise → `MemoryStore`

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, OpenOptions};
use tracing::{info, warn};

use crate::file::{FileStore, DEFAULT_DATA_FILE};
use crate::kv::{KvStore, DEFAULT_KEY};
use crate::memory::MemoryStore;
use crate::store::LedgerStore;

/// Connection details for the managed KV store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvSettings {
    pub url: String,
    pub token: String,
    pub key: String,
}

/// What the environment offers for ledger storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub kv: Option<KvSettings>,
    pub data_file: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            kv: None,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl KvSettings {
    /// Both URL and token are required; an empty value counts as absent.
    pub fn from_parts(url: Option<String>, token: Option<String>, key: Option<String>) -> Option<Self> {
        let url = url.filter(|v| !v.trim().is_empty())?;
        let token = token.filter(|v| !v.trim().is_empty())?;
        Some(Self {
            url,
            token,
            key: key
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_KEY.to_string()),
        })
    }
}

/// Pick and construct the ledger store.
pub async fn probe(settings: &StoreSettings) -> Arc<dyn LedgerStore> {
    if let Some(kv) = &settings.kv {
        info!(url = %kv.url, key = %kv.key, "ledger backend: kv");
        return Arc::new(KvStore::new(kv.url.clone(), kv.token.clone(), kv.key.clone()));
    }

    match check_writable(&settings.data_file).await {
        Ok(()) => {
            info!(path = %settings.data_file.display(), "ledger backend: file");
            Arc::new(FileStore::new(settings.data_file.clone()))
        }
        Err(e) => {
            warn!(
                path = %settings.data_file.display(),
                error = %e,
                "data file not writable; ledger backend: memory (not persisted)"
            );
            Arc::new(MemoryStore::new())
        }
    }
}

/// Check that the ledger file can be written without disturbing its contents.
async fn check_writable(path: &Path) -> io::Result<()> {
    if fs::metadata(path).await.is_ok() {
        OpenOptions::new().append(true).open(path).await?;
        return Ok(());
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).await?;

    let marker = parent.join(".ledger-probe");
    fs::write(&marker, b"").await?;
    fs::remove_file(&marker).await
}
