use std::{path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed document store.
///
/// Persists a single serializable document to a JSON file and keeps an
/// in-memory mirror behind an `RwLock`. Every save rewrites the whole file;
/// there is no diffing, no append log, and no cross-process locking. Intended
/// for small datasets where a database is overkill.
#[derive(Clone)]
pub struct JsonDocStore<T> {
    inner: Arc<RwLock<T>>,
    file_path: PathBuf,
}

impl<T> JsonDocStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync,
{
    /// Initialize the store from a path.
    ///
    /// A missing file is created with the given default document (parent
    /// directories included). An existing file that cannot be read or parsed
    /// is an error; corrupt data is never silently replaced.
    pub async fn new<P: Into<PathBuf>>(path: P, default: T) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let doc: T = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("{}: {}", file_path.display(), e)))?,
            Err(_) => {
                let bytes = serde_json::to_vec_pretty(&default)
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                fs::write(&file_path, bytes)
                    .await
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                default
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(doc)), file_path }))
    }

    async fn save(&self) -> Result<(), ServiceError> {
        let doc = self.inner.read().await;
        let data = serde_json::to_vec_pretty(&*doc).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Borrow the document under a read lock and map it through `f`.
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let doc = self.inner.read().await;
        f(&doc)
    }

    /// Clone the whole in-memory document.
    pub async fn snapshot(&self) -> T {
        let doc = self.inner.read().await;
        doc.clone()
    }

    /// Read-modify-write helper: apply `f` to the document under a write
    /// lock, then persist the whole file. When `f` fails the mirror is rolled
    /// back to its prior state, so memory and file cannot diverge. Not atomic
    /// with respect to other processes touching the same file.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut T) -> Result<R, ServiceError>,
    {
        let mut doc = self.inner.write().await;
        let before = doc.clone();
        let out = match f(&mut doc) {
            Ok(out) => out,
            Err(e) => {
                *doc = before;
                return Err(e);
            }
        };
        drop(doc);
        self.save().await?;
        Ok(out)
    }

    /// Serialize the in-memory document back to the file in full.
    pub async fn persist(&self) -> Result<(), ServiceError> {
        self.save().await
    }

    /// Re-read the file into the in-memory mirror, discarding it.
    pub async fn reload(&self) -> Result<(), ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("{}: {}", self.file_path.display(), e)))?;
        let doc: T = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Storage(format!("{}: {}", self.file_path.display(), e)))?;
        let mut guard = self.inner.write().await;
        *guard = doc;
        Ok(())
    }
}
