use std::path::Path;

use parking_lot::Mutex;
use rocksdb::{DB, IteratorMode, Options, WriteBatch, WriteOptions};

use crate::store::{BlockRecord, BlockStore, StoreError};

/// A persistent [`BlockStore`] on RocksDB using the insert-and-converge
/// strategy.
///
/// Every allocation inserts a fresh row keyed by the big-endian block
/// number (so the keyspace is ordered by block) and deletes all lower keys
/// in the same write batch. Correctness rests only on "never decreasing":
/// stray older rows are harmless and get swept by a later allocation, the
/// newest row alone is authoritative.
///
/// Writes are synced to disk before an allocation returns; a block number
/// that was handed out and then forgotten in a crash would be reissued,
/// breaking uniqueness.
pub struct RocksBlockStore {
    db: DB,
    /// Serializes read-modify-write of the tail key. RocksDB orders the
    /// writes themselves; this guards the "read last key" step.
    write_lock: Mutex<()>,
}

impl RocksBlockStore {
    /// Opens (creating if missing) the counter database at `path`.
    ///
    /// # Errors
    ///
    /// Fails when the database cannot be opened, e.g. the path is not
    /// writable or is locked by another process.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut options = Options::default();
        options.create_if_missing(true);
        let db = DB::open(&options, path)?;
        Ok(Self {
            db,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the newest persisted record, or `None` on an empty store.
    fn last_record(&self) -> Result<Option<BlockRecord>, StoreError> {
        let mut iter = self.db.iterator(IteratorMode::End);
        match iter.next() {
            None => Ok(None),
            Some(kv) => {
                let (key, value) = kv?;
                let block = u64::from_be_bytes(key.as_ref().try_into().map_err(|_| {
                    StoreError::Corrupt {
                        context: format!("block key of {} bytes", key.len()),
                    }
                })?);
                let shard = *value.first().ok_or_else(|| StoreError::Corrupt {
                    context: "empty shard value".to_owned(),
                })?;
                Ok(Some(BlockRecord { block, shard }))
            }
        }
    }
}

impl BlockStore for RocksBlockStore {
    fn allocate(&self, bootstrap_shard: u8) -> Result<BlockRecord, StoreError> {
        let _guard = self.write_lock.lock();

        let previous = self.last_record()?;
        let record = match previous {
            Some(last) => BlockRecord {
                block: last.block + 1,
                shard: last.shard,
            },
            None => BlockRecord {
                block: 1,
                shard: bootstrap_shard,
            },
        };

        let mut batch = WriteBatch::default();
        batch.put(record.block.to_be_bytes(), [record.shard]);
        // Converge: sweep every older row now that a newer one exists.
        batch.delete_range(0_u64.to_be_bytes(), record.block.to_be_bytes());

        let mut write_options = WriteOptions::default();
        write_options.set_sync(true);
        self.db.write_opt(batch, &write_options)?;

        Ok(record)
    }
}

impl From<rocksdb::Error> for StoreError {
    fn from(err: rocksdb::Error) -> Self {
        Self::Unavailable {
            context: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use portable_atomic::{AtomicU64, Ordering};

    use super::*;

    /// A scratch database directory, removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            static COUNTER: AtomicU64 = AtomicU64::new(0);
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "suid-rocks-test-{}-{n}",
                std::process::id()
            ));
            Self(path)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn blocks_start_at_one_and_increase() {
        let dir = ScratchDir::new();
        let store = RocksBlockStore::open(&dir.0).unwrap();
        let a = store.allocate(0).unwrap();
        let b = store.allocate(0).unwrap();
        assert_eq!((a.block, b.block), (1, 2));
        assert_eq!((a.shard, b.shard), (0, 0));
    }

    #[test]
    fn counter_survives_reopen() {
        let dir = ScratchDir::new();
        {
            let store = RocksBlockStore::open(&dir.0).unwrap();
            for _ in 0..5 {
                store.allocate(1).unwrap();
            }
        }
        let store = RocksBlockStore::open(&dir.0).unwrap();
        let next = store.allocate(0).unwrap();
        assert_eq!(next.block, 6);
        // The persisted shard wins over the bootstrap default.
        assert_eq!(next.shard, 1);
    }

    #[test]
    fn converges_to_a_single_row() {
        let dir = ScratchDir::new();
        let store = RocksBlockStore::open(&dir.0).unwrap();
        for _ in 0..10 {
            store.allocate(0).unwrap();
        }
        let rows = store.db.iterator(IteratorMode::Start).count();
        assert_eq!(rows, 1);
    }
}
