use std::sync::OnceLock;

use portable_atomic::{AtomicU64, Ordering};

use crate::store::{BlockRecord, BlockStore, StoreError};

/// An in-process [`BlockStore`] using the native-atomic-increment strategy.
///
/// The counter is a single atomic word; `fetch_add` gives every caller a
/// distinct, strictly increasing block with no lock. The shard is latched by
/// whichever allocation gets there first and is immutable afterwards.
///
/// State does not survive the process, so this store suits tests and
/// single-run tools; deployments that must never reissue a block across
/// restarts want a persistent backend instead.
#[derive(Debug, Default)]
pub struct MemoryBlockStore {
    /// Last block handed out; 0 means none yet, matching an empty table.
    last_block: AtomicU64,
    shard: OnceLock<u8>,
}

impl MemoryBlockStore {
    /// Creates an empty store: no blocks issued, shard unresolved.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resolved shard, or `None` before the first allocation.
    #[must_use]
    pub fn shard(&self) -> Option<u8> {
        self.shard.get().copied()
    }
}

impl BlockStore for MemoryBlockStore {
    fn allocate(&self, bootstrap_shard: u8) -> Result<BlockRecord, StoreError> {
        let shard = *self.shard.get_or_init(|| bootstrap_shard);
        // Relaxed suffices: uniqueness comes from the atomicity of the RMW,
        // and no other memory is published alongside the counter.
        let block = self.last_block.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(BlockRecord { block, shard })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread::scope;

    use super::*;

    #[test]
    fn blocks_start_at_one_and_increase() {
        let store = MemoryBlockStore::new();
        let a = store.allocate(0).unwrap();
        let b = store.allocate(0).unwrap();
        let c = store.allocate(0).unwrap();
        assert_eq!((a.block, b.block, c.block), (1, 2, 3));
    }

    #[test]
    fn bootstrap_shard_is_latched_once() {
        let store = MemoryBlockStore::new();
        assert_eq!(store.shard(), None);

        let first = store.allocate(1).unwrap();
        assert_eq!(first.shard, 1);
        assert_eq!(store.shard(), Some(1));

        // A different default is ignored once a record exists.
        let second = store.allocate(0).unwrap();
        assert_eq!(second.shard, 1);
    }

    #[test]
    fn concurrent_allocations_never_overlap() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 500;

        let store = MemoryBlockStore::new();
        let mut all = Vec::new();

        scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        (0..PER_THREAD)
                            .map(|_| store.allocate(0).unwrap().block)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                all.extend(handle.join().unwrap());
            }
        });

        let unique: HashSet<_> = all.iter().copied().collect();
        assert_eq!(unique.len(), THREADS * PER_THREAD);
        assert_eq!(*all.iter().max().unwrap(), (THREADS * PER_THREAD) as u64);
    }
}
