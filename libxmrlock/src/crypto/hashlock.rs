use crate::error::ReadError;
use crate::helpers::read_hex32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt::{Debug, Display, Formatter};
use subtle::ConstantTimeEq;
use thiserror::Error;

pub const HASHLOCK_WORDS: usize = 8;

#[derive(Debug, Error)]
pub enum HashlockError {
    #[error("Invalid hashlock encoding. {0}")]
    Encoding(#[from] ReadError),
    #[error("A hashlock has {HASHLOCK_WORDS} words, got {0}")]
    WordCount(usize),
}

/// A SHA-256 commitment to the lock secret, held as 8 big-endian 32-bit words in digest order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hashlock([u32; HASHLOCK_WORDS]);

impl Hashlock {
    /// `SHA-256(secret)`
    pub fn from_secret(secret: &[u8]) -> Self {
        let digest: [u8; 32] = Sha256::digest(secret).into();
        Self::from_bytes(digest)
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let mut words = [0u32; HASHLOCK_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(words)
    }

    pub fn from_words(words: [u32; HASHLOCK_WORDS]) -> Self {
        Self(words)
    }

    pub fn from_word_slice(words: &[u32]) -> Result<Self, HashlockError> {
        let words: [u32; HASHLOCK_WORDS] = words.try_into().map_err(|_| HashlockError::WordCount(words.len()))?;
        Ok(Self(words))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, HashlockError> {
        Ok(Self::from_bytes(read_hex32("hashlock", hex_str)?))
    }

    pub fn words(&self) -> &[u32; HASHLOCK_WORDS] {
        &self.0
    }

    /// The 32 digest bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    pub fn as_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Constant-time check that `SHA-256(secret)` equals this hashlock.
    pub fn matches(&self, secret: &[u8]) -> bool {
        let candidate = Self::from_secret(secret).to_bytes();
        candidate.ct_eq(&self.to_bytes()).into()
    }
}

impl Display for Hashlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl Debug for Hashlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hashlock({})", self.as_hex())
    }
}

impl Serialize for Hashlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for Hashlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Hashlock::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}
