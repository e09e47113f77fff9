//! Named buckets of ordered keys

use crate::error::StoreResult;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::sync::Arc;

/// A key/value pair read from a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    pub value: Vec<u8>,
}

/// A named table of string keys kept in bytewise order.
///
/// Every operation runs in its own transaction; writes are committed before
/// the call returns, so a subsequent read always observes them.
#[derive(Clone)]
pub struct Bucket {
    db: Arc<Database>,
    name: String,
}

impl Bucket {
    pub(crate) fn new(db: Arc<Database>, name: &str) -> Self {
        Self {
            db,
            name: name.to_string(),
        }
    }

    fn definition(&self) -> TableDefinition<'_, &'static str, &'static [u8]> {
        TableDefinition::new(&self.name)
    }

    pub(crate) fn create(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            write_txn.open_table(self.definition())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Bucket name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or overwrite a value
    pub fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(self.definition())?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;

        tracing::trace!(bucket = %self.name, key, len = value.len(), "put");
        Ok(())
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(self.definition())?;

        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    /// Delete a key, returning whether it existed
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(self.definition())?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;

        Ok(existed)
    }

    /// All items in key order
    pub fn items(&self) -> StoreResult<Vec<Item>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(self.definition())?;

        let mut items = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            items.push(Item {
                key: key.value().to_string(),
                value: value.value().to_vec(),
            });
        }

        Ok(items)
    }

    /// Items whose key starts with `prefix`, in key order
    pub fn prefix_items(&self, prefix: &str) -> StoreResult<Vec<Item>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(self.definition())?;

        let mut items = Vec::new();
        for entry in table.range::<&str>(prefix..)? {
            let (key, value) = entry?;
            let key = key.value();
            // Keys sharing the prefix are contiguous; stop at the first miss.
            if !key.starts_with(prefix) {
                break;
            }
            items.push(Item {
                key: key.to_string(),
                value: value.value().to_vec(),
            });
        }

        Ok(items)
    }

    /// Items with `min <= key < max`, in key order
    pub fn range_items(&self, min: &str, max: &str) -> StoreResult<Vec<Item>> {
        if min >= max {
            return Ok(Vec::new());
        }

        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(self.definition())?;

        let mut items = Vec::new();
        for entry in table.range::<&str>(min..max)? {
            let (key, value) = entry?;
            items.push(Item {
                key: key.value().to_string(),
                value: value.value().to_vec(),
            });
        }

        Ok(items)
    }

    /// Number of items
    pub fn len(&self) -> StoreResult<usize> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(self.definition())?;

        Ok(table.len()? as usize)
    }

    /// Check if the bucket is empty
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove every item
    pub fn clear(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(self.definition())?;
            table.retain(|_, _| false)?;
        }
        write_txn.commit()?;

        Ok(())
    }
}
