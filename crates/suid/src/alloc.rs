use core::marker::PhantomData;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{Error, Result};
use crate::id::SuidId;
use crate::store::BlockStore;

/// Upper bound on blocks handed out per request.
///
/// Requests above the cap are clamped, not rejected; a caller that wants
/// more issues further requests.
pub const MAX_REQUEST_BLOCKS: usize = 8;

/// Hands out fresh ID blocks from a persisted counter.
///
/// The allocator is the only component that touches the [`BlockStore`]; it
/// resolves the shard on first use (bootstrapping an empty store with the
/// configured default), bounds request sizes, and packs the store's block
/// numbers into block Suids. It keeps no mutable state of its own and is
/// freely shared behind an `Arc`.
///
/// Allocated blocks are never handed back: if a caller discards them, that
/// slice of the ID space is simply spent. This is the price of requiring no
/// coordination between shards or callers.
#[derive(Debug)]
pub struct BlockAllocator<ID, S>
where
    ID: SuidId,
    S: BlockStore,
{
    store: S,
    bootstrap_shard: u8,
    _id: PhantomData<fn() -> ID>,
}

impl<ID, S> BlockAllocator<ID, S>
where
    ID: SuidId,
    S: BlockStore,
{
    /// Creates an allocator over `store`.
    ///
    /// `bootstrap_shard` seeds the counter record if the store is empty; an
    /// already-bootstrapped store keeps its persisted shard and the value
    /// here is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShardOutOfRange`] when `bootstrap_shard` does not
    /// fit the layout's shard field. This is a configuration mistake and is
    /// reported before any storage is touched.
    pub fn new(store: S, bootstrap_shard: u8) -> Result<Self> {
        if u64::from(bootstrap_shard) > ID::max_shard() {
            return Err(Error::ShardOutOfRange {
                shard: u64::from(bootstrap_shard),
                shard_count: ID::shard_count(),
            });
        }
        Ok(Self {
            store,
            bootstrap_shard,
            _id: PhantomData,
        })
    }

    /// Allocates `count` fresh blocks and returns their block Suids in
    /// allocation order.
    ///
    /// `count` is clamped into `1..=`[`MAX_REQUEST_BLOCKS`]; out-of-range
    /// values are never an error. Each returned id has a strictly greater
    /// block than the one before it, sequence zero, and the store's shard -
    /// a block Suid is itself a valid, issuable id, the first of its block.
    ///
    /// # Errors
    ///
    /// Propagates the store's error if any allocation fails; no ids are
    /// returned in that case. Blocks the store burned before failing stay
    /// burned - there is no rollback path.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), err))]
    pub fn next_blocks(&self, count: usize) -> Result<Vec<ID>> {
        let count = count.clamp(1, MAX_REQUEST_BLOCKS);
        let mut blocks = Vec::with_capacity(count);
        for _ in 0..count {
            blocks.push(self.next_block()?);
        }
        Ok(blocks)
    }

    /// Allocates a single fresh block.
    ///
    /// # Errors
    ///
    /// Propagates the store's error. A failed allocation must surface to
    /// the caller; retrying here would burn additional blocks behind the
    /// caller's back.
    pub fn next_block(&self) -> Result<ID> {
        let record = self.store.allocate(self.bootstrap_shard)?;
        if record.block > ID::max_block() {
            return Err(Error::BlockSpaceExhausted {
                block: record.block,
            });
        }
        if u64::from(record.shard) > ID::max_shard() {
            // The persisted shard is authoritative, but a record written by
            // a wider layout cannot be packed into this one.
            return Err(Error::ShardOutOfRange {
                shard: u64::from(record.shard),
                shard_count: ID::shard_count(),
            });
        }
        Ok(ID::from_parts(record.block, 0, u64::from(record.shard)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread::scope;

    use portable_atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::codec::SuidTextExt;
    use crate::id::{Suid, SuidCompact};
    use crate::store::{BlockRecord, MemoryBlockStore, StoreError};

    /// Counts allocations and can be told to start failing.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryBlockStore,
        calls: AtomicU64,
        fail_after: Option<u64>,
    }

    impl CountingStore {
        fn failing_after(calls: u64) -> Self {
            Self {
                fail_after: Some(calls),
                ..Self::default()
            }
        }
    }

    impl BlockStore for CountingStore {
        fn allocate(&self, bootstrap_shard: u8) -> Result<BlockRecord, StoreError> {
            let seen = self.calls.fetch_add(1, Ordering::Relaxed);
            if self.fail_after.is_some_and(|limit| seen >= limit) {
                return Err(StoreError::Unavailable {
                    context: "mock store offline".to_owned(),
                });
            }
            self.inner.allocate(bootstrap_shard)
        }
    }

    #[test]
    fn empty_store_yields_consecutive_block_ids() {
        // The concrete scenario: block-width 46, sequence-width 6,
        // shard-width 1, shard 0, empty counter table.
        let allocator =
            BlockAllocator::<Suid, _>::new(MemoryBlockStore::new(), 0).unwrap();
        let blocks = allocator.next_blocks(3).unwrap();

        assert_eq!(blocks.len(), 3);
        for (i, id) in blocks.iter().enumerate() {
            assert_eq!(id.block(), i as u64 + 1);
            assert_eq!(id.sequence(), 0);
            assert_eq!(id.shard(), 0);
            assert!(id.is_block());
        }
        assert!(blocks.windows(2).all(|w| w[0] < w[1]));

        // The first block id round-trips through text.
        let text = blocks[0].to_text();
        assert_eq!(Suid::from_text(&text).unwrap(), blocks[0]);
    }

    #[test]
    fn count_is_clamped_low() {
        let store = CountingStore::default();
        let allocator = BlockAllocator::<Suid, _>::new(store, 0).unwrap();
        let blocks = allocator.next_blocks(0).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(allocator.store.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn count_is_clamped_high() {
        let store = CountingStore::default();
        let allocator = BlockAllocator::<Suid, _>::new(store, 0).unwrap();
        let blocks = allocator.next_blocks(1000).unwrap();
        assert_eq!(blocks.len(), MAX_REQUEST_BLOCKS);
        assert_eq!(
            allocator.store.calls.load(Ordering::Relaxed),
            MAX_REQUEST_BLOCKS as u64
        );
    }

    #[test]
    fn bootstrap_shard_must_fit_the_layout() {
        // Canonical layout has a single shard bit.
        let err = BlockAllocator::<Suid, _>::new(MemoryBlockStore::new(), 2).unwrap_err();
        assert!(matches!(
            err,
            Error::ShardOutOfRange {
                shard: 2,
                shard_count: 2
            }
        ));

        // The compact layout accepts shards up to 3.
        assert!(BlockAllocator::<SuidCompact, _>::new(MemoryBlockStore::new(), 3).is_ok());
    }

    #[test]
    fn second_bootstrap_default_has_no_effect() {
        let store = Arc::new(MemoryBlockStore::new());
        {
            let allocator =
                BlockAllocator::<SuidCompact, _>::new(Arc::clone(&store), 2).unwrap();
            assert_eq!(allocator.next_block().unwrap().shard(), 2);
        }
        // A second allocator with a different default sees the stored shard.
        let allocator = BlockAllocator::<SuidCompact, _>::new(store, 0).unwrap();
        assert_eq!(allocator.next_block().unwrap().shard(), 2);
    }

    #[test]
    fn storage_failure_yields_no_partial_result() {
        let store = CountingStore::failing_after(2);
        let allocator = BlockAllocator::<Suid, _>::new(store, 0).unwrap();
        let err = allocator.next_blocks(5).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Unavailable { .. })));

        // The two blocks burned before the failure stay burned.
        let record = allocator.store.inner.allocate(0).unwrap();
        assert_eq!(record.block, 3);
    }

    #[test]
    fn concurrent_requests_never_overlap() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 50;

        let allocator =
            Arc::new(BlockAllocator::<Suid, _>::new(MemoryBlockStore::new(), 0).unwrap());
        let mut all = Vec::new();

        scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let allocator = Arc::clone(&allocator);
                    s.spawn(move || {
                        let mut seen = Vec::new();
                        for _ in 0..ROUNDS {
                            for id in allocator.next_blocks(4).unwrap() {
                                seen.push(id.block());
                            }
                        }
                        seen
                    })
                })
                .collect();
            for handle in handles {
                all.extend(handle.join().unwrap());
            }
        });

        let unique: HashSet<_> = all.iter().copied().collect();
        assert_eq!(unique.len(), THREADS * ROUNDS * 4);
    }
}
