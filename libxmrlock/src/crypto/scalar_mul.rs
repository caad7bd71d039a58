//! Checking `s·G == Q`, optionally with a prover-supplied hint.
//!
//! A hint `(Q, s1, s2)` satisfies `s2·s ≡ s1 (mod n)`, `s2 ≠ 0` and `s1·G − s2·Q = O`. For a torsion-free `Q` and an
//! invertible `s2` this forces `Q = s·G`, so the verifier can trade a full fixed-base multiplication for one scalar
//! product and a two-point multiscalar multiplication (which hosts often expose as a cheap precompile). A hint is only
//! an input to be checked; the answer never depends on trusting it.
use crate::crypto::keys::{SecretScalar, ValidatedPoint};
use crate::crypto::scalar;
use crate::helpers::{compressed_from_hex, compressed_to_hex, xmr_scalar_from_hex, xmr_scalar_to_hex};
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::traits::IsIdentity;
use curve25519_dalek::{EdwardsPoint, Scalar};
use log::*;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScalarMulError {
    #[error("s·G does not equal the expected point")]
    Mismatch,
    #[error("The multiplication hint does not check out")]
    HintMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulHint {
    #[serde(serialize_with = "compressed_to_hex", deserialize_with = "compressed_from_hex")]
    pub q: CompressedEdwardsY,
    #[serde(serialize_with = "xmr_scalar_to_hex", deserialize_with = "xmr_scalar_from_hex")]
    pub s1: Scalar,
    #[serde(serialize_with = "xmr_scalar_to_hex", deserialize_with = "xmr_scalar_from_hex")]
    pub s2: Scalar,
}

impl MulHint {
    /// Builds a valid hint for `s·G` with a random non-zero `s2`.
    pub fn generate<R: CryptoRng + RngCore>(s: &Scalar, rng: &mut R) -> Self {
        let s2 = SecretScalar::random(rng);
        let s1 = scalar::mul(s2.as_scalar(), s);
        let q = EdwardsPoint::mul_base(s).compress();
        Self { q, s1, s2: *s2.as_scalar() }
    }
}

/// Checks `s·G == expected`, using `hint` in place of the fixed-base multiplication when one is given.
pub fn check_base_mul(s: &Scalar, expected: &ValidatedPoint, hint: Option<&MulHint>) -> Result<(), ScalarMulError> {
    match hint {
        None => {
            if EdwardsPoint::mul_base(s) == *expected.as_point() {
                Ok(())
            } else {
                Err(ScalarMulError::Mismatch)
            }
        }
        Some(hint) => check_hint(s, expected, hint),
    }
}

fn check_hint(s: &Scalar, expected: &ValidatedPoint, hint: &MulHint) -> Result<(), ScalarMulError> {
    if hint.q != *expected.as_compressed() {
        debug!("Hint is for {}, expected {}", hex::encode(hint.q.as_bytes()), expected.as_hex());
        return Err(ScalarMulError::HintMismatch);
    }
    if scalar::is_zero(&hint.s2) {
        debug!("Hint has a zero s2");
        return Err(ScalarMulError::HintMismatch);
    }
    if scalar::mul(&hint.s2, s) != hint.s1 {
        debug!("Hint s1 is not s2·s");
        return Err(ScalarMulError::HintMismatch);
    }
    // s1·G + (-s2)·Q
    let sum = EdwardsPoint::vartime_double_scalar_mul_basepoint(&scalar::neg(&hint.s2), expected.as_point(), &hint.s1);
    if !sum.is_identity() {
        debug!("Hint multiscalar check is not the identity");
        return Err(ScalarMulError::HintMismatch);
    }
    Ok(())
}
