//! Arithmetic in the Ed25519 prime-order scalar field.
//!
//! Thin wrappers over [`Scalar`] plus reduction of arbitrary-width integers, which dalek only offers for 32 and 64
//! byte inputs.
use curve25519_dalek::Scalar;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarError {
    #[error("Scalar encoding is not canonical (value >= group order)")]
    NonCanonical,
    #[error("Scalar must be exactly 32 bytes, got {0}")]
    InvalidLength(usize),
}

pub fn add(a: &Scalar, b: &Scalar) -> Scalar {
    a + b
}

pub fn sub(a: &Scalar, b: &Scalar) -> Scalar {
    a - b
}

pub fn mul(a: &Scalar, b: &Scalar) -> Scalar {
    a * b
}

/// `n - (c mod n)`, with `neg(0) == 0`.
pub fn neg(c: &Scalar) -> Scalar {
    -c
}

pub fn is_zero(s: &Scalar) -> bool {
    *s == Scalar::ZERO
}

/// 2^256 mod n
fn radix() -> &'static Scalar {
    static RADIX: OnceLock<Scalar> = OnceLock::new();
    RADIX.get_or_init(|| {
        let mut wide = [0u8; 64];
        wide[32] = 1;
        Scalar::from_bytes_mod_order_wide(&wide)
    })
}

/// Reduce a little-endian integer of any width modulo the group order. The empty slice is zero.
pub fn reduce(bytes: &[u8]) -> Scalar {
    bytes.chunks(32).rev().fold(Scalar::ZERO, |acc, chunk| {
        let mut limb = [0u8; 32];
        limb[..chunk.len()].copy_from_slice(chunk);
        acc * radix() + Scalar::from_bytes_mod_order(limb)
    })
}

/// Decode a 32-byte little-endian scalar, rejecting values outside `[0, n)`.
pub fn from_canonical(bytes: &[u8]) -> Result<Scalar, ScalarError> {
    let arr: [u8; 32] = bytes.try_into().map_err(|_| ScalarError::InvalidLength(bytes.len()))?;
    Scalar::from_canonical_bytes(arr).into_option().ok_or(ScalarError::NonCanonical)
}
