/// Declares a packed Suid layout from four required field widths:
/// `reserved`, `block`, `sequence`, and `shard`.
///
/// Fields are laid out from **most significant bit (MSB)** to **least
/// significant bit (LSB)** in that exact order:
///
/// ```text
///  Bit Index:  63          53 52        n n-1      m m-1     0
///              +--------------+-----------+----------+--------+
///  Field:      | reserved(11) | block (B) | seq. (S) | sh.(H) |
///              +--------------+-----------+----------+--------+
///              |<------- MSB ------ 64 bits ------ LSB ------>|
/// ```
///
/// The reserved field is fixed at 11 bits so every value fits the safe
/// integer range of an IEEE-754 double, and the four widths **must sum to
/// the width of the backing integer**; both are enforced with compile-time
/// assertions. The `compressed` flag selects whether [`to_text`] renders with
/// the replacement-symbol compression (see [`codec`]).
///
/// ```text
/// define_suid!(
///     <TypeName>, <IntegerType>,
///     reserved: <bits>,
///     block: <bits>,
///     sequence: <bits>,
///     shard: <bits>,
///     compressed: <bool>
/// );
/// ```
///
/// ## Example
///
/// ```rust
/// use suid::{SuidId, define_suid};
///
/// define_suid!(
///     MyId, u64,
///     reserved: 11,
///     block: 44,
///     sequence: 7,
///     shard: 2,
///     compressed: false
/// );
///
/// let id = MyId::from_parts(9, 3, 1);
/// assert_eq!(id.block(), 9);
/// assert_eq!(id.sequence(), 3);
/// assert_eq!(id.shard(), 1);
/// ```
///
/// [`to_text`]: crate::SuidTextExt::to_text
/// [`codec`]: crate::codec
#[macro_export]
macro_rules! define_suid {
    (
        $(#[$meta:meta])*
        $name:ident, $int:ty,
        reserved: $reserved_bits:expr,
        block: $block_bits:expr,
        sequence: $sequence_bits:expr,
        shard: $shard_bits:expr,
        compressed: $compressed:expr
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name {
            id: $int,
        }

        const _: () = {
            // Compile-time check: total bit width _must_ equal the backing
            // type. This is to avoid aliasing surprises.
            assert!(
                $reserved_bits + $block_bits + $sequence_bits + $shard_bits == <$int>::BITS,
                "Layout must match underlying type width"
            );
            // 64 - 11 = 53 significant bits, the IEEE-754 double-safe budget.
            assert!(
                $reserved_bits == 11,
                "Reserved field is fixed at 11 bits"
            );
        };

        impl $name {
            pub const RESERVED_BITS: u32 = $reserved_bits;
            pub const BLOCK_BITS: u32 = $block_bits;
            pub const SEQUENCE_BITS: u32 = $sequence_bits;
            pub const SHARD_BITS: u32 = $shard_bits;

            pub const SHARD_SHIFT: u32 = 0;
            pub const SEQUENCE_SHIFT: u32 = Self::SHARD_SHIFT + Self::SHARD_BITS;
            pub const BLOCK_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
            pub const RESERVED_SHIFT: u32 = Self::BLOCK_SHIFT + Self::BLOCK_BITS;

            pub const BLOCK_MASK: $int = (1 << Self::BLOCK_BITS) - 1;
            pub const SEQUENCE_MASK: $int = (1 << Self::SEQUENCE_BITS) - 1;
            pub const SHARD_MASK: $int = (1 << Self::SHARD_BITS) - 1;

            const fn valid_mask() -> $int {
                (Self::BLOCK_MASK << Self::BLOCK_SHIFT)
                    | (Self::SEQUENCE_MASK << Self::SEQUENCE_SHIFT)
                    | (Self::SHARD_MASK << Self::SHARD_SHIFT)
            }

            /// Packs the given components into an id.
            ///
            /// # Panics
            ///
            /// Panics when a component exceeds its field's capacity. A
            /// sequence at or above the field capacity means the pool failed
            /// to roll over; wrapping silently would reissue ids.
            #[must_use]
            pub const fn from_parts(block: $int, sequence: $int, shard: $int) -> Self {
                assert!(block <= Self::BLOCK_MASK, "block overflows its field");
                assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflows its field");
                assert!(shard <= Self::SHARD_MASK, "shard overflows its field");
                Self {
                    id: (block << Self::BLOCK_SHIFT)
                        | (sequence << Self::SEQUENCE_SHIFT)
                        | (shard << Self::SHARD_SHIFT),
                }
            }

            /// Extracts the block number from the packed id.
            #[must_use]
            pub const fn block(&self) -> $int {
                (self.id >> Self::BLOCK_SHIFT) & Self::BLOCK_MASK
            }

            /// Extracts the sequence from the packed id.
            #[must_use]
            pub const fn sequence(&self) -> $int {
                (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
            }

            /// Extracts the shard id from the packed id.
            #[must_use]
            pub const fn shard(&self) -> $int {
                (self.id >> Self::SHARD_SHIFT) & Self::SHARD_MASK
            }

            /// Returns the maximum representable block number.
            #[must_use]
            pub const fn max_block() -> $int {
                Self::BLOCK_MASK
            }

            /// Returns the maximum representable sequence value.
            #[must_use]
            pub const fn max_sequence() -> $int {
                Self::SEQUENCE_MASK
            }

            /// Returns the maximum representable shard id.
            #[must_use]
            pub const fn max_shard() -> $int {
                Self::SHARD_MASK
            }

            /// Converts this type into its raw representation.
            #[must_use]
            pub const fn to_raw(&self) -> $int {
                self.id
            }

            /// Converts a raw value into this type.
            #[must_use]
            pub const fn from_raw(raw: $int) -> Self {
                Self { id: raw }
            }
        }

        impl $crate::SuidId for $name {
            const RESERVED_BITS: u32 = $reserved_bits;
            const BLOCK_BITS: u32 = $block_bits;
            const SEQUENCE_BITS: u32 = $sequence_bits;
            const SHARD_BITS: u32 = $shard_bits;
            const COMPRESSED_TEXT: bool = $compressed;

            fn from_parts(block: u64, sequence: u64, shard: u64) -> Self {
                Self::from_parts(block, sequence, shard)
            }

            fn block(&self) -> u64 {
                self.block()
            }

            fn sequence(&self) -> u64 {
                self.sequence()
            }

            fn shard(&self) -> u64 {
                self.shard()
            }

            fn max_block() -> u64 {
                Self::BLOCK_MASK
            }

            fn max_sequence() -> u64 {
                Self::SEQUENCE_MASK
            }

            fn max_shard() -> u64 {
                Self::SHARD_MASK
            }

            fn is_valid(&self) -> bool {
                (self.to_raw() & !Self::valid_mask()) == 0
            }

            fn into_valid(self) -> Self {
                Self::from_raw(self.to_raw() & Self::valid_mask())
            }

            fn to_raw(&self) -> u64 {
                self.to_raw()
            }

            fn from_raw(raw: u64) -> Self {
                Self::from_raw(raw)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&$crate::SuidTextExt::to_text(self))
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::SuidTextExt::from_text(s)
            }
        }

        impl core::convert::TryFrom<&str> for $name {
            type Error = $crate::CodecError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                $crate::SuidTextExt::from_text(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                <Self as $crate::SuidTextExt>::from_text(other)
                    .map(|id| id == *self)
                    .unwrap_or(false)
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self == *other
            }
        }

        impl From<$name> for String {
            fn from(val: $name) -> Self {
                $crate::SuidTextExt::to_text(&val)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let full = core::any::type_name::<Self>();
                let name = full.rsplit("::").next().unwrap_or(full);
                let mut dbg = f.debug_struct(name);
                dbg.field("id", &format_args!("{} (0x{:x})", self.to_raw(), self.to_raw()));
                dbg.field("text", &$crate::SuidTextExt::to_text(self));
                dbg.field("block", &self.block());
                dbg.field("sequence", &self.sequence());
                dbg.field("shard", &self.shard());
                dbg.finish()
            }
        }
    };
}

define_suid!(
    /// The canonical Suid layout.
    ///
    /// - 11 bits reserved (always zero)
    /// - 46 bits block
    /// - 6 bits sequence (64 ids per block)
    /// - 1 bit shard (2 shards per domain)
    ///
    /// ```text
    ///  Bit Index:  63          53 52         7 6         1    0
    ///              +--------------+------------+-----------+----+
    ///  Field:      | reserved(11) | block (46) | seq. (6)  | sh |
    ///              +--------------+------------+-----------+----+
    ///              |<------- MSB ------ 64 bits ------ LSB --->|
    /// ```
    ///
    /// Renders as plain radix-32 text: with only seven bits below the block
    /// field, block ids do not end on a token boundary and the compression
    /// symbols cannot mark them.
    Suid, u64,
    reserved: 11,
    block: 46,
    sequence: 6,
    shard: 1,
    compressed: false
);

define_suid!(
    /// The classic Suid layout used by earlier deployments.
    ///
    /// - 11 bits reserved (always zero)
    /// - 43 bits block
    /// - 8 bits sequence (256 ids per block)
    /// - 2 bits shard (4 shards per domain)
    ///
    /// The sequence and shard fields together span exactly two radix-32
    /// tokens, so every block id's text ends in `00`, `01`, `02` or `03` and
    /// compresses to a single replacement symbol; block ids are one character
    /// shorter and distinguishable by sight.
    SuidCompact, u64,
    reserved: 11,
    block: 43,
    sequence: 8,
    shard: 2,
    compressed: true
);
