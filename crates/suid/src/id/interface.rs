use core::fmt;
use core::hash::Hash;

/// Trait for layout-compatible Suid identifiers.
///
/// A Suid packs a `block`, `sequence`, and `shard` partition into the low 53
/// bits of a `u64`; the top 11 bits are reserved and always zero so the value
/// survives a round trip through an IEEE-754 double.
///
/// Concrete layouts are declared with [`define_suid!`], which fixes the field
/// widths at compile time. Two deployments only interoperate if they use the
/// same layout type.
///
/// [`define_suid!`]: crate::define_suid
pub trait SuidId:
    Copy + Clone + fmt::Display + PartialOrd + Ord + PartialEq + Eq + Hash + fmt::Debug
{
    /// Number of reserved high bits (always 11).
    const RESERVED_BITS: u32;
    /// Width of the block field in bits.
    const BLOCK_BITS: u32;
    /// Width of the sequence field in bits.
    const SEQUENCE_BITS: u32;
    /// Width of the shard field in bits.
    const SHARD_BITS: u32;

    /// Whether text rendering applies the replacement-symbol compression.
    ///
    /// Only layouts whose sequence and shard fields together span exactly two
    /// radix-32 tokens (10 bits) gain anything from this: for those, every
    /// block id ends in a replacement symbol and is recognizable by sight.
    const COMPRESSED_TEXT: bool;

    /// Packs the given components. Panics if any component overflows its
    /// field; overflow here is a programming error, never user input.
    #[must_use]
    fn from_parts(block: u64, sequence: u64, shard: u64) -> Self;

    /// Extracts the block number.
    fn block(&self) -> u64;

    /// Extracts the sequence (the pool-local id within the block).
    fn sequence(&self) -> u64;

    /// Extracts the shard id.
    fn shard(&self) -> u64;

    /// Returns the maximum value the block field can hold.
    fn max_block() -> u64;

    /// Returns the maximum value the sequence field can hold.
    fn max_sequence() -> u64;

    /// Returns the maximum value the shard field can hold.
    fn max_shard() -> u64;

    /// Number of ids a single block yields (`max_sequence() + 1`).
    fn sequence_space() -> u64 {
        Self::max_sequence() + 1
    }

    /// Number of shards this layout supports (`max_shard() + 1`).
    fn shard_count() -> u64 {
        Self::max_shard() + 1
    }

    /// Returns `true` if this is a block id (sequence is zero).
    ///
    /// Block ids are the only ids a server ever distributes; the pool fills
    /// in the sequence bits. A block id is itself a valid, issuable id.
    fn is_block(&self) -> bool {
        self.sequence() == 0
    }

    /// Returns `true` if the reserved bits are unset.
    fn is_valid(&self) -> bool;

    /// Returns a copy with any set reserved bits cleared.
    #[must_use]
    fn into_valid(self) -> Self;

    /// Converts this type into its raw `u64` representation.
    fn to_raw(&self) -> u64;

    /// Converts a raw `u64` into this type.
    fn from_raw(raw: u64) -> Self;
}
