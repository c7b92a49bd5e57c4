/// Replacement symbols and the two-token sequences they stand for.
///
/// The four letters taken out of the radix alphabet each stand for one of
/// the token pairs `00`, `01`, `02` and `03`. For layouts with ten bits
/// below the block field, every block id's text ends in one of those pairs
/// (`0` followed by the shard digit), so compression shortens block ids by
/// one character and marks them by sight.
pub const REPLACEMENT_SYMBOLS: [(char, &str); 4] =
    [('b', "00"), ('l', "01"), ('o', "02"), ('q', "03")];

/// Returns `true` if `byte` is one of the replacement symbols.
#[inline]
pub(crate) const fn is_replacement_symbol(byte: u8) -> bool {
    matches!(byte, b'b' | b'l' | b'o' | b'q')
}

/// Replaces every occurrence of a replaceable token pair with its symbol.
///
/// The result is never longer than the input; it is unchanged when no pair
/// occurs.
#[must_use]
pub fn compress(text: &str) -> String {
    let mut result = text.to_owned();
    for (symbol, pair) in REPLACEMENT_SYMBOLS {
        result = result.replace(pair, symbol.encode_utf8(&mut [0; 4]));
    }
    result
}

/// Expands every replacement symbol back to its token pair.
///
/// The inverse of [`compress`]; a plain radix string contains no replacement
/// symbols and passes through unchanged, so it is always safe to decompress
/// before decoding.
#[must_use]
pub fn decompress(text: &str) -> String {
    let mut result = text.to_owned();
    for (symbol, pair) in REPLACEMENT_SYMBOLS {
        result = result.replace(symbol, pair);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_replaces_every_pair() {
        assert_eq!(compress("100"), "1b");
        assert_eq!(compress("102"), "1o");
        assert_eq!(compress("0023"), "b23");
        assert_eq!(compress("000"), "b0");
        assert_eq!(compress("14shd"), "14shd");
    }

    #[test]
    fn decompress_expands_every_symbol() {
        assert_eq!(decompress("1b"), "100");
        assert_eq!(decompress("1o"), "102");
        assert_eq!(decompress("b23"), "0023");
        assert_eq!(decompress("blq"), "000103");
    }

    #[test]
    fn decompress_is_identity_on_plain_text() {
        for plain in ["0", "z", "14shd", "7zzzzzzzzzz"] {
            assert_eq!(decompress(plain), plain);
        }
    }

    #[test]
    fn roundtrip_through_compression() {
        for plain in ["0", "100", "000", "102030", "1234567", "zzz00"] {
            assert_eq!(decompress(&compress(plain)), plain);
        }
    }
}
