use crate::error::ReadError;
use crate::XmrScalar;
use chrono::{DateTime, TimeZone, Utc};
use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub fn array_to_hex<S>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    hex::encode(bytes).serialize(s)
}

pub fn array_from_hex<'de, D>(de: D) -> Result<[u8; 32], D::Error>
where
    D: Deserializer<'de>,
{
    let hex_str = String::deserialize(de)?;
    let mut result = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut result)
        .map_err(|e| serde::de::Error::custom(format!("Invalid hex string: {e}")))?;
    Ok(result)
}

pub fn option_array_to_hex<S>(opt: &Option<[u8; 32]>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    opt.map(hex::encode).serialize(s)
}

pub fn option_array_from_hex<'de, D>(de: D) -> Result<Option<[u8; 32]>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(hex_str) = Option::<String>::deserialize(de)? else {
        return Ok(None);
    };
    let mut result = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut result)
        .map_err(|e| serde::de::Error::custom(format!("Invalid hex string: {e}")))?;
    Ok(Some(result))
}

/// Decode a 64 character hex string into 32 bytes, naming `field` in the error.
pub fn read_hex32(field: &str, hex_str: &str) -> Result<[u8; 32], ReadError> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if hex_str.len() != 64 {
        return Err(ReadError::new(field, format!("expected 64 hex characters, got {}", hex_str.len())));
    }
    let mut result = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut result).map_err(|e| ReadError::new(field, e.to_string()))?;
    Ok(result)
}

/// Serialize an XmrScalar (Ed25519 scalar) as a hex string.
pub fn xmr_scalar_to_hex<S>(scalar: &XmrScalar, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    hex::encode(scalar.as_bytes()).serialize(s)
}

/// Deserialize an XmrScalar (Ed25519 scalar) from a hex string. Non-canonical encodings are rejected.
pub fn xmr_scalar_from_hex<'de, D>(de: D) -> Result<XmrScalar, D::Error>
where
    D: Deserializer<'de>,
{
    let bytes = array_from_hex(de)?;
    let scalar = Option::<XmrScalar>::from(XmrScalar::from_canonical_bytes(bytes))
        .ok_or_else(|| serde::de::Error::custom("Invalid scalar value"))?;
    Ok(scalar)
}

/// Serialize a compressed Edwards point as a hex string.
pub fn compressed_to_hex<S>(point: &CompressedEdwardsY, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    hex::encode(point.as_bytes()).serialize(s)
}

/// Deserialize a compressed Edwards point from a hex string.
///
/// Only the length is checked here. Curve membership and order are the business of
/// [`crate::crypto::point::validate`].
pub fn compressed_from_hex<'de, D>(de: D) -> Result<CompressedEdwardsY, D::Error>
where
    D: Deserializer<'de>,
{
    array_from_hex(de).map(CompressedEdwardsY)
}

/// A UTC Unix timestamp representing seconds since January 1, 1970.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a new Timestamp from seconds since Unix epoch.
    pub fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the current UTC time as a Timestamp.
    pub fn now() -> Self {
        Self(Utc::now().timestamp() as u64)
    }

    /// Returns the Timestamp `duration` after this one, saturating at `u64::MAX`.
    pub fn after(&self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.as_secs()))
    }

    /// Returns the underlying seconds value.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Converts this Timestamp to a chrono DateTime<Utc>.
    /// Out-of-range values return None.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let t = i64::try_from(self.0).ok()?;
        Utc.timestamp_opt(t, 0).single()
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}s", self.0),
        }
    }
}

impl From<u64> for Timestamp {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl From<Timestamp> for u64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
