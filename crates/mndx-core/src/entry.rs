//! File entry and content key types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Size of a content key in bytes (an MD5-sized digest)
pub const CONTENT_KEY_SIZE: usize = 16;

/// Fixed-size binary identifier addressing an entry's content
///
/// Displayed and serialized as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContentKey(pub [u8; CONTENT_KEY_SIZE]);

/// Error parsing a [`ContentKey`] from text
#[derive(Error, Debug, PartialEq)]
pub enum ContentKeyError {
    #[error("content key must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("content key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl ContentKey {
    /// Create a key from raw bytes
    pub const fn new(bytes: [u8; CONTENT_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8; CONTENT_KEY_SIZE] {
        &self.0
    }
}

impl From<[u8; CONTENT_KEY_SIZE]> for ContentKey {
    fn from(bytes: [u8; CONTENT_KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ContentKey {
    type Err = ContentKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CONTENT_KEY_SIZE * 2 {
            return Err(ContentKeyError::InvalidLength {
                expected: CONTENT_KEY_SIZE * 2,
                actual: s.len(),
            });
        }
        let mut bytes = [0u8; CONTENT_KEY_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for ContentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One archive member as listed by a root file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path of the member, `/`-separated
    pub name: String,
    /// Size of the member in bytes
    pub size: u32,
    /// Bitmask of the localized variants this record represents
    pub locale_flags: u32,
    /// Stable numeric identifier, distinct from the name
    pub file_data_id: u32,
    /// Key addressing the member's content
    pub content_key: ContentKey,
}

#[cfg(test)]
#[path = "entry/entry_tests.rs"]
mod entry_tests;
