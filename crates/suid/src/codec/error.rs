use crate::codec::{MAX_TEXT_LEN, TAG};

/// All the ways text can fail to parse back into a Suid.
///
/// Malformed input is never coerced; every variant names the offending
/// input so the error is actionable at the boundary where the string came
/// from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The input was empty. The zero value renders as `"0"`, never as `""`.
    #[error("empty input")]
    Empty,

    /// The input decompresses to more than [`MAX_TEXT_LEN`] characters.
    #[error("input expands to {len} characters, over the {MAX_TEXT_LEN}-character budget")]
    TooLong { len: usize },

    /// A character is outside the legal alphabet (the 32 radix tokens plus
    /// the four replacement symbols).
    #[error("invalid character {ch:?} at index {index} in {input:?}")]
    InvalidChar {
        input: String,
        ch: char,
        index: usize,
    },

    /// The input decodes to a value with reserved bits set, i.e. beyond the
    /// 53-bit identifier range.
    #[error("{input:?} decodes outside the 53-bit identifier range")]
    Overflow { input: String },

    /// The wire form did not start with the [`TAG`] prefix.
    #[error("missing {TAG:?} prefix in {input:?}")]
    MissingTag { input: String },
}
