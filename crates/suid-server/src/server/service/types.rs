use suid::{BlockAllocator, Suid, SuidPool};

/// Block store backend used by the service.
///
/// Builds with the `rocksdb` feature persist the counter on disk; without
/// it the counter lives in memory and resets with the process, which is
/// only suitable for development.
#[cfg(feature = "rocksdb")]
pub type Store = suid::RocksBlockStore;
#[cfg(not(feature = "rocksdb"))]
pub type Store = suid::MemoryBlockStore;

/// The allocator shared by all request handlers.
pub type Allocator = BlockAllocator<Suid, Store>;

/// The server-side pool backing single-id issuance.
pub type Pool = SuidPool<Suid, Store>;
