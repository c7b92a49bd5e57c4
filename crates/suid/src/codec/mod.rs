//! Text codec for Suid values.
//!
//! A Suid renders as 1 to 11 characters from a dense, punctuation-free
//! radix-32 alphabet of digits and lowercase letters, short enough to read
//! aloud or retype. Four letters are held out of the alphabet as replacement
//! symbols for an optional compression step, and a fixed `"Suid:"` tag marks
//! the wire form apart from plain strings in generic JSON payloads.

mod compress;
mod error;
mod interface;
mod radix32;

pub use compress::*;
pub use error::*;
pub use interface::*;
pub use radix32::*;
