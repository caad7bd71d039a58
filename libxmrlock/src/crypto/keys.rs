use crate::crypto::point::{validate, Rejection};
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::{EdwardsPoint, Scalar};
use hex::FromHexError;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;
use zeroize::Zeroizing;

/// A non-zero secret scalar. The value is wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretScalar(Zeroizing<Scalar>);

impl SecretScalar {
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }

    /// Samples a uniformly random non-zero scalar using 512-bit wide reduction.
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut scalar_bytes = Zeroizing::new([0u8; 64]);
        loop {
            rng.fill_bytes(scalar_bytes.as_mut_slice());
            let s = Zeroizing::new(Scalar::from_bytes_mod_order_wide(&scalar_bytes));
            if *s != Scalar::ZERO {
                return Self(s);
            }
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        if hex.len() != 64 {
            return Err(KeyError::InvalidStringLength);
        }
        let mut canonical = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(hex.as_bytes(), canonical.as_mut_slice())?;
        match Scalar::from_canonical_bytes(*canonical).into_option() {
            None => Err(KeyError::NonCanonicalScalar),
            Some(scalar) => Self::try_from(scalar),
        }
    }

    pub fn as_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// The public point `x·G`.
    pub fn public_point(&self) -> ValidatedPoint {
        ValidatedPoint::from_secret(self)
    }
}

impl TryFrom<Scalar> for SecretScalar {
    type Error = KeyError;

    fn try_from(value: Scalar) -> Result<Self, Self::Error> {
        let value = Zeroizing::new(value);
        if *value == Scalar::ZERO {
            return Err(KeyError::ZeroScalar);
        }
        Ok(Self(value))
    }
}

impl Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretScalar")
    }
}

impl Serialize for SecretScalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for SecretScalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_str = Zeroizing::new(String::deserialize(deserializer)?);
        SecretScalar::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// A curve point that has passed [`validate`]: canonically encoded, on the curve, of prime order.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPoint {
    compressed_point: CompressedEdwardsY,
    point: EdwardsPoint,
}

impl ValidatedPoint {
    /// Only for points known to lie in the prime-order subgroup and not be the identity.
    pub(crate) fn new_unchecked(point: EdwardsPoint) -> Self {
        Self { compressed_point: point.compress(), point }
    }

    pub fn from_secret(secret: &SecretScalar) -> Self {
        Self::new_unchecked(EdwardsPoint::mul_base(secret.as_scalar()))
    }

    pub fn as_compressed(&self) -> &CompressedEdwardsY {
        &self.compressed_point
    }

    pub fn as_point(&self) -> &EdwardsPoint {
        &self.point
    }

    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        if hex.len() != 64 {
            return Err(KeyError::InvalidStringLength);
        }
        let mut compressed = [0u8; 32];
        hex::decode_to_slice(hex.as_bytes(), &mut compressed)?;
        Ok(validate(&CompressedEdwardsY(compressed))?)
    }

    pub fn as_hex(&self) -> String {
        hex::encode(self.compressed_point.as_bytes())
    }
}

impl TryFrom<CompressedEdwardsY> for ValidatedPoint {
    type Error = Rejection;

    fn try_from(value: CompressedEdwardsY) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

impl Debug for ValidatedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl Serialize for ValidatedPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for ValidatedPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        ValidatedPoint::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Invalid point: {0}")]
    InvalidPoint(#[from] Rejection),
    #[error("Could not deserialize from hex: {0}")]
    HexDeserializationError(#[from] FromHexError),
    #[error("Invalid string length")]
    InvalidStringLength,
    #[error("Scalar is not canonical")]
    NonCanonicalScalar,
    #[error("Secret scalar cannot be zero")]
    ZeroScalar,
}
