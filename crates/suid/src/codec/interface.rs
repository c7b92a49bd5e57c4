use crate::codec::{
    CodecError, MAX_TEXT_LEN, compress, decode_radix32, decompress, encode_radix32,
    is_replacement_symbol, token_value,
};
use crate::id::SuidId;

/// Fixed literal tag prefixing the wire form of a Suid.
///
/// Tagged strings are distinguishable from plain strings in generic JSON
/// payloads: `"Suid:14shd"`.
pub const TAG: &str = "Suid:";

/// If an 11-character rendering is to stay inside the 53-bit budget, its
/// leading token can carry at most `53 - 50` bits.
const MAX_LEADING_TOKEN: u8 = 7;

/// Extension trait adding text and wire encoding to every Suid layout.
///
/// Encoding renders plain radix-32 or the compressed form, as declared by
/// the layout ([`SuidId::COMPRESSED_TEXT`]); decoding always accepts both,
/// since a plain rendering never contains a replacement symbol and
/// decompression passes it through untouched.
pub trait SuidTextExt: SuidId {
    /// Renders this id as 1..=11 characters of radix-32 text.
    #[must_use]
    fn to_text(&self) -> String {
        let plain = encode_radix32(self.to_raw());
        if Self::COMPRESSED_TEXT {
            compress(&plain)
        } else {
            plain
        }
    }

    /// Parses text (plain or compressed) back into an id.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] naming the offending input when it is empty,
    /// contains a character outside the legal alphabet, or decodes outside
    /// the 53-bit identifier range.
    fn from_text(input: &str) -> Result<Self, CodecError> {
        if input.is_empty() {
            return Err(CodecError::Empty);
        }
        // Validate against the original input so error indexes refer to what
        // the caller actually sent, not the decompressed intermediate.
        for (index, byte) in input.bytes().enumerate() {
            if token_value(byte).is_none() && !is_replacement_symbol(byte) {
                return Err(CodecError::InvalidChar {
                    input: input.to_owned(),
                    ch: byte as char,
                    index,
                });
            }
        }
        let expanded = decompress(input);
        if expanded.len() > MAX_TEXT_LEN {
            return Err(CodecError::TooLong {
                len: expanded.len(),
            });
        }
        let raw = decode_radix32(&expanded)?;
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(CodecError::Overflow {
                input: input.to_owned(),
            });
        }
        Ok(id)
    }

    /// Cheap structural pre-check: could `input` be Suid text at all?
    ///
    /// Verifies length, alphabet membership (replacement symbols included)
    /// and, for 11-character input, that the leading token is small enough
    /// to stay within the 53-bit budget. A `true` here is a fast filter, not
    /// a guarantee that [`SuidTextExt::from_text`] succeeds.
    #[must_use]
    fn looks_valid(input: &str) -> bool {
        let bytes = input.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_TEXT_LEN {
            return false;
        }
        if bytes.len() == MAX_TEXT_LEN {
            match token_value(bytes[0]) {
                Some(token) if token <= MAX_LEADING_TOKEN => {}
                _ => return false,
            }
        }
        bytes
            .iter()
            .all(|&b| token_value(b).is_some() || is_replacement_symbol(b))
    }

    /// Renders the tagged wire form, `"Suid:"` followed by the text form.
    #[must_use]
    fn to_tagged(&self) -> String {
        let mut out = String::with_capacity(TAG.len() + MAX_TEXT_LEN);
        out.push_str(TAG);
        out.push_str(&self.to_text());
        out
    }

    /// Parses the tagged wire form produced by [`SuidTextExt::to_tagged`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingTag`] when the prefix is absent, or any
    /// [`SuidTextExt::from_text`] error for the remainder.
    fn from_tagged(input: &str) -> Result<Self, CodecError> {
        match input.strip_prefix(TAG) {
            Some(rest) => Self::from_text(rest),
            None => Err(CodecError::MissingTag {
                input: input.to_owned(),
            }),
        }
    }
}

impl<ID: SuidId> SuidTextExt for ID {}
