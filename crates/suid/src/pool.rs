use core::cell::Cell;
use std::sync::Arc;

use crate::alloc::BlockAllocator;
use crate::error::Result;
use crate::id::SuidId;
use crate::store::BlockStore;

/// The in-flight block a pool is issuing from.
#[derive(Debug, Clone, Copy)]
struct PoolState {
    block: u64,
    shard: u64,
    /// Next sequence to issue; one past [`SuidId::max_sequence`] means the
    /// block is spent.
    sequence: u64,
}

/// A per-caller cache that turns one allocated block into many ids.
///
/// The pool holds at most one block and issues sequential ids from it
/// without touching storage; only when the sequence space is spent does it
/// pull a fresh block through its [`BlockAllocator`]. Ids from a single
/// pool are unique and strictly increasing. Ids from different pools are
/// unique too (each pool draws distinct blocks), but their relative order
/// is unspecified.
///
/// A pool is **not** thread-safe and deliberately so: give each worker
/// (thread, connection, request-handling task) its own instance and no
/// locking is needed, at the cost of the unissued tail of each pool's
/// block when it is dropped. Wrapping one shared pool in a mutex is the
/// alternative policy - choose one, never mix them on the same instance.
///
/// Dropping a pool discards its in-flight block; the remaining sequence
/// space is spent, never reused.
pub struct SuidPool<ID, S>
where
    ID: SuidId,
    S: BlockStore,
{
    allocator: Arc<BlockAllocator<ID, S>>,
    state: Cell<Option<PoolState>>,
}

impl<ID, S> SuidPool<ID, S>
where
    ID: SuidId,
    S: BlockStore,
{
    /// Creates an empty pool; the first [`SuidPool::next`] call allocates.
    #[must_use]
    pub fn new(allocator: Arc<BlockAllocator<ID, S>>) -> Self {
        Self {
            allocator,
            state: Cell::new(None),
        }
    }

    /// Issues the next id.
    ///
    /// Refills from the allocator when no block is held or the held block
    /// is spent; otherwise this is pure arithmetic. The first id issued
    /// from a fresh block is the block id itself (sequence zero).
    ///
    /// # Errors
    ///
    /// Propagates the allocator's error when a refill fails. The pool is
    /// left empty in that case; a later call may succeed and will allocate
    /// a fresh block.
    pub fn next(&self) -> Result<ID> {
        let state = match self.state.get() {
            Some(state) if state.sequence <= ID::max_sequence() => state,
            _ => {
                self.state.set(None);
                let block = self.allocator.next_block()?;
                PoolState {
                    block: block.block(),
                    shard: block.shard(),
                    sequence: 0,
                }
            }
        };

        let id = ID::from_parts(state.block, state.sequence, state.shard);
        self.state.set(Some(PoolState {
            sequence: state.sequence + 1,
            ..state
        }));
        Ok(id)
    }

    /// Ids still issuable from the held block; zero when a refill is due.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        match self.state.get() {
            Some(state) => ID::sequence_space().saturating_sub(state.sequence),
            None => 0,
        }
    }
}
