//! Serde adapters for Suid fields.
//!
//! These are `#[serde(with = ...)]` modules rather than blanket
//! `Serialize`/`Deserialize` impls so a record type can choose its wire
//! representation per field:
//!
//! - [`as_tagged`] - the `"Suid:14shd"` wire form used in JSON payloads
//! - [`as_text`] - the bare text form
//! - [`as_native`] - the raw `u64`, for storage columns
//!
//! All deserializers validate reserved bits; a value outside the 53-bit
//! range never deserializes silently.

use core::marker::PhantomData;

use serde::{Deserializer, Serializer, de};

use crate::codec::SuidTextExt;
use crate::id::SuidId;

struct TextVisitor<ID> {
    tagged: bool,
    _marker: PhantomData<ID>,
}

impl<ID: SuidId> de::Visitor<'_> for TextVisitor<ID> {
    type Value = ID;

    fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.tagged {
            formatter.write_str("a \"Suid:\"-tagged radix-32 string")
        } else {
            formatter.write_str("a radix-32 Suid string")
        }
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let parsed = if self.tagged {
            ID::from_tagged(v)
        } else {
            ID::from_text(v)
        };
        parsed.map_err(de::Error::custom)
    }
}

/// Serialize a Suid as its tagged wire form (`"Suid:14shd"`).
pub mod as_tagged {
    use super::*;

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: SuidId,
        S: Serializer,
    {
        s.serialize_str(&id.to_tagged())
    }

    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails, the tag is
    /// missing, or the remainder is not valid Suid text.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: SuidId,
        D: Deserializer<'de>,
    {
        d.deserialize_str(TextVisitor {
            tagged: true,
            _marker: PhantomData,
        })
    }
}

/// Serialize a Suid as bare radix-32 text (`"14shd"`).
pub mod as_text {
    use super::*;

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: SuidId,
        S: Serializer,
    {
        s.serialize_str(&id.to_text())
    }

    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string
    /// is not valid Suid text.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: SuidId,
        D: Deserializer<'de>,
    {
        d.deserialize_str(TextVisitor {
            tagged: false,
            _marker: PhantomData,
        })
    }
}

/// Serialize a Suid as its native `u64` representation.
pub mod as_native {
    use super::*;
    use serde::{Deserialize, Serialize};

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: SuidId,
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value
    /// has reserved bits set.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: SuidId,
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(d)?;
        let id = ID::from_raw(raw);
        if !id.is_valid() {
            return Err(de::Error::custom(format_args!(
                "value {raw} is outside the 53-bit identifier range"
            )));
        }
        Ok(id)
    }
}
