//! Database handle

use crate::bucket::Bucket;
use crate::error::{StoreError, StoreResult};
use redb::Database;
use redb::backends::InMemoryBackend;
use std::path::Path;
use std::sync::Arc;

/// Path that opens a database living only in memory.
pub const MEMORY_PATH: &str = ":memory:";

/// An open redb database holding any number of buckets.
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
    is_memory: bool,
}

impl Store {
    /// Open or create a store
    ///
    /// # Arguments
    /// * `path` - Database path. Use `:memory:` for an in-memory database,
    ///   or a file path for persistent storage. Missing parent directories
    ///   are created.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let is_memory = path == Path::new(MEMORY_PATH);

        let db = if is_memory {
            Database::builder().create_with_backend(InMemoryBackend::new())?
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Database::create(path)?
        };

        tracing::debug!(path = %path.display(), memory = is_memory, "store opened");

        Ok(Self {
            db: Arc::new(db),
            is_memory,
        })
    }

    /// Create the named bucket if missing and return a handle to it.
    pub fn bucket(&self, name: &str) -> StoreResult<Bucket> {
        if name.is_empty() {
            return Err(StoreError::InvalidBucket(name.to_string()));
        }

        let bucket = Bucket::new(self.db.clone(), name);
        bucket.create()?;
        Ok(bucket)
    }

    /// Check if this is an in-memory store
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }
}
