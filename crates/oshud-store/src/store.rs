//! # Salary Store
//!
//! Handle to the payroll data file.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Salary Store                                       │
//! │                                                                         │
//! │  SalaryStore::open(path).await                                          │
//! │       │                                                                 │
//! │       │  missing file → empty document                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │   Arc<RwLock<SalaryDocument>>           │  shared by repositories   │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │  mutate(): change a copy, persist, then commit                  │
//! │       ▼                                                                 │
//! │  salaries.json.tmp ──rename──► salaries.json                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed write leaves both the file and the in-memory document untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::SalaryDocument;
use crate::error::{StoreError, StoreResult};
use crate::repository::history::SalaryHistoryRepository;
use crate::repository::roster::RosterRepository;

/// Shared handle to the payroll document.
///
/// Cloning is cheap; every clone sees the same document.
#[derive(Debug, Clone)]
pub struct SalaryStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// `None` for in-memory stores, which never touch the disk.
    path: Option<PathBuf>,
    document: RwLock<SalaryDocument>,
}

impl SalaryStore {
    /// Opens the data file at `path`.
    ///
    /// A missing file is an empty document; the file is created on the
    /// first write.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        info!(path = %path.display(), "Opening salary store");

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("Data file missing, starting empty");
                SalaryDocument::default()
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };

        Ok(Self::build(Some(path), document))
    }

    /// Creates a store that lives only in memory (for testing).
    pub fn in_memory(document: SalaryDocument) -> Self {
        Self::build(None, document)
    }

    fn build(path: Option<PathBuf>, document: SalaryDocument) -> Self {
        SalaryStore {
            inner: Arc::new(Inner {
                path,
                document: RwLock::new(document),
            }),
        }
    }

    /// Returns the salary history repository.
    pub fn history(&self) -> SalaryHistoryRepository {
        SalaryHistoryRepository::new(self.clone())
    }

    /// Returns the roster repository.
    pub fn roster(&self) -> RosterRepository {
        RosterRepository::new(self.clone())
    }

    /// Copy of the whole document.
    pub async fn snapshot(&self) -> SalaryDocument {
        self.inner.document.read().await.clone()
    }

    /// Runs `f` with read access to the document.
    pub(crate) async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SalaryDocument) -> R,
    {
        let document = self.inner.document.read().await;
        f(&document)
    }

    /// Applies `f` to a copy of the document, persists it, then commits.
    ///
    /// If `f` or the write fails, nothing changes.
    pub(crate) async fn mutate<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut SalaryDocument) -> StoreResult<R>,
    {
        let mut document = self.inner.document.write().await;

        let mut draft = document.clone();
        let result = f(&mut draft)?;

        if let Some(path) = &self.inner.path {
            persist(path, &draft).await?;
        }

        *document = draft;
        Ok(result)
    }
}

/// Writes the document next to `path` and renames it into place.
async fn persist(path: &Path, document: &SalaryDocument) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Document persisted");
    Ok(())
}
