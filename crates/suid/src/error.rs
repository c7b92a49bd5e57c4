use crate::codec::CodecError;
use crate::store::StoreError;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for Suid allocation and decoding.
///
/// Codec failures and storage failures keep their own error types
/// ([`CodecError`], [`StoreError`]) so callers that only ever parse, or only
/// ever allocate, can match on the narrower enum; this type is what the
/// allocator and pool surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured bootstrap shard does not fit the layout's shard field.
    ///
    /// This is a configuration error and is raised eagerly when an allocator
    /// is constructed, before any storage is touched.
    #[error("shard {shard} is out of range for this layout (valid: 0..{shard_count})")]
    ShardOutOfRange { shard: u64, shard_count: u64 },

    /// The persisted counter handed out a block number beyond the layout's
    /// block field.
    ///
    /// With a 43-bit-or-wider block field this takes trillions of
    /// allocations; if it ever happens the deployment's ID space is spent and
    /// issuing must stop.
    #[error("block {block} exceeds the layout's block space")]
    BlockSpaceExhausted { block: u64 },

    /// Text decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The persisted counter could not be read or advanced.
    #[error(transparent)]
    Store(#[from] StoreError),
}
