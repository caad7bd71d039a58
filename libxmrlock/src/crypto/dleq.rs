//! Non-interactive proof that `log_G(T) == log_Y(U)`, bound to a hashlock.
//!
//! The prover knows `t` with `T = t·G` and publishes `U = t·Y`. The hashlock is absorbed into the Fiat-Shamir
//! challenge so a proof cannot be lifted onto a lock with a different hash commitment.
use crate::crypto::challenge::{challenge, DLEQ_TAG};
use crate::crypto::generators::{g_compressed, y, Y_COMPRESSED};
use crate::crypto::hashlock::Hashlock;
use crate::crypto::keys::ValidatedPoint;
use crate::crypto::point::{validate, Rejection};
use crate::crypto::scalar::{self, from_canonical, ScalarError};
use crate::helpers::{compressed_from_hex, compressed_to_hex, xmr_scalar_from_hex, xmr_scalar_to_hex};
use blake2::Blake2b512;
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::traits::VartimeMultiscalarMul;
use curve25519_dalek::{EdwardsPoint, Scalar};
use digest::Digest;
use log::*;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use zeroize::Zeroizing;

const NONCE_DOMAIN: &[u8] = b"xmrlock/dleq-nonce";

/// Byte length of the wire encoding `U || c || s || R1 || R2`.
pub const PROOF_LENGTH: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofPoint {
    AdaptorPoint,
    U,
    R1,
    R2,
}

impl Display for ProofPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofPoint::AdaptorPoint => write!(f, "T"),
            ProofPoint::U => write!(f, "U"),
            ProofPoint::R1 => write!(f, "R1"),
            ProofPoint::R2 => write!(f, "R2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("The witness scalar is zero")]
    ZeroScalar,
    #[error("Proof point {0} is invalid: {1}")]
    InvalidPoint(ProofPoint, Rejection),
    #[error("The proof challenge is zero")]
    ZeroChallenge,
    #[error("The proof response is zero")]
    ZeroResponse,
    #[error("Recomputed commitments do not match R1/R2")]
    CommitmentMismatch,
    #[error("Recomputed challenge does not match")]
    ChallengeMismatch,
    #[error("Proof scalar is out of range")]
    ScalarOutOfRange,
    #[error("Proof encoding must be {PROOF_LENGTH} bytes, got {0}")]
    InvalidLength(usize),
}

impl From<ScalarError> for ProofError {
    fn from(_: ScalarError) -> Self {
        ProofError::ScalarOutOfRange
    }
}

/// `(U, c, s, R1, R2)`. The adaptor point `T` travels separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptorProof {
    #[serde(serialize_with = "compressed_to_hex", deserialize_with = "compressed_from_hex")]
    pub(crate) u: CompressedEdwardsY,
    #[serde(serialize_with = "xmr_scalar_to_hex", deserialize_with = "xmr_scalar_from_hex")]
    pub(crate) c: Scalar,
    #[serde(serialize_with = "xmr_scalar_to_hex", deserialize_with = "xmr_scalar_from_hex")]
    pub(crate) s: Scalar,
    #[serde(serialize_with = "compressed_to_hex", deserialize_with = "compressed_from_hex")]
    pub(crate) r1: CompressedEdwardsY,
    #[serde(serialize_with = "compressed_to_hex", deserialize_with = "compressed_from_hex")]
    pub(crate) r2: CompressedEdwardsY,
}

impl AdaptorProof {
    pub fn u(&self) -> &CompressedEdwardsY {
        &self.u
    }

    pub fn challenge(&self) -> &Scalar {
        &self.c
    }

    pub fn response(&self) -> &Scalar {
        &self.s
    }

    pub fn r1(&self) -> &CompressedEdwardsY {
        &self.r1
    }

    pub fn r2(&self) -> &CompressedEdwardsY {
        &self.r2
    }

    pub fn to_bytes(&self) -> [u8; PROOF_LENGTH] {
        let mut out = [0u8; PROOF_LENGTH];
        out[0..32].copy_from_slice(self.u.as_bytes());
        out[32..64].copy_from_slice(self.c.as_bytes());
        out[64..96].copy_from_slice(self.s.as_bytes());
        out[96..128].copy_from_slice(self.r1.as_bytes());
        out[128..160].copy_from_slice(self.r2.as_bytes());
        out
    }

    /// Decode `U || c || s || R1 || R2`. Scalars must be canonical; points are checked later, by [`verify`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProofError> {
        if bytes.len() != PROOF_LENGTH {
            return Err(ProofError::InvalidLength(bytes.len()));
        }
        let point = |i: usize| {
            let mut p = [0u8; 32];
            p.copy_from_slice(&bytes[i..i + 32]);
            CompressedEdwardsY(p)
        };
        let c = from_canonical(&bytes[32..64])?;
        let s = from_canonical(&bytes[64..96])?;
        Ok(Self { u: point(0), c, s, r1: point(96), r2: point(128) })
    }
}

/// Deterministic nonce `k = H(domain || t || hashlock || counter)`, wide-reduced, never zero.
fn derive_nonce(t: &Scalar, hashlock: &Hashlock) -> Zeroizing<Scalar> {
    let mut counter = 0u32;
    loop {
        let mut hasher = Blake2b512::new();
        hasher.update(NONCE_DOMAIN);
        hasher.update(t.as_bytes());
        hasher.update(hashlock.to_bytes());
        hasher.update(counter.to_le_bytes());
        let mut wide = Zeroizing::new([0u8; 64]);
        wide.copy_from_slice(&hasher.finalize());
        let k = Zeroizing::new(scalar::reduce(wide.as_slice()));
        if !scalar::is_zero(&k) {
            return k;
        }
        counter = counter.wrapping_add(1);
    }
}

/// Prove knowledge of `t` such that `T = t·G` and `U = t·Y`, binding `hashlock` into the challenge.
///
/// Returns the adaptor point `T` and the proof. Identical inputs give identical proofs.
pub fn prove(t: &Scalar, hashlock: &Hashlock) -> Result<(ValidatedPoint, AdaptorProof), ProofError> {
    if scalar::is_zero(t) {
        return Err(ProofError::ZeroScalar);
    }
    let big_t = ValidatedPoint::new_unchecked(EdwardsPoint::mul_base(t));
    let u = (t * y()).compress();
    let k = derive_nonce(t, hashlock);
    let r1 = EdwardsPoint::mul_base(&k).compress();
    let r2 = (&*k * y()).compress();
    let c = challenge(DLEQ_TAG, [&g_compressed(), &Y_COMPRESSED, big_t.as_compressed(), &u, &r1, &r2], hashlock);
    let s = scalar::add(&k, &scalar::mul(&c, t));
    trace!("DLEQ proof generated for adaptor point {}", big_t.as_hex());
    Ok((big_t, AdaptorProof { u, c, s, r1, r2 }))
}

/// Verify `proof` for the adaptor point `adaptor_point` and `hashlock`.
pub fn verify(adaptor_point: &CompressedEdwardsY, proof: &AdaptorProof, hashlock: &Hashlock) -> Result<(), ProofError> {
    let result = verify_inner(adaptor_point, proof, hashlock);
    if let Err(e) = &result {
        debug!("DLEQ verification failed for {}: {e}", hex::encode(adaptor_point.as_bytes()));
    }
    result
}

/// Convenience wrapper around [`verify`].
pub fn is_valid(adaptor_point: &CompressedEdwardsY, proof: &AdaptorProof, hashlock: &Hashlock) -> bool {
    verify(adaptor_point, proof, hashlock).is_ok()
}

fn verify_inner(adaptor_point: &CompressedEdwardsY, proof: &AdaptorProof, hashlock: &Hashlock) -> Result<(), ProofError> {
    let big_t = validate(adaptor_point).map_err(|r| ProofError::InvalidPoint(ProofPoint::AdaptorPoint, r))?;
    let u = validate(&proof.u).map_err(|r| ProofError::InvalidPoint(ProofPoint::U, r))?;
    if scalar::is_zero(&proof.c) {
        return Err(ProofError::ZeroChallenge);
    }
    if scalar::is_zero(&proof.s) {
        return Err(ProofError::ZeroResponse);
    }
    validate(&proof.r1).map_err(|r| ProofError::InvalidPoint(ProofPoint::R1, r))?;
    validate(&proof.r2).map_err(|r| ProofError::InvalidPoint(ProofPoint::R2, r))?;
    let neg_c = scalar::neg(&proof.c);
    // R1' = s·G - c·T, R2' = s·Y - c·U
    let r1 = EdwardsPoint::vartime_double_scalar_mul_basepoint(&neg_c, big_t.as_point(), &proof.s).compress();
    let r2 = EdwardsPoint::vartime_multiscalar_mul([proof.s, neg_c], [*y(), *u.as_point()]).compress();
    if r1 != proof.r1 || r2 != proof.r2 {
        return Err(ProofError::CommitmentMismatch);
    }
    let c = challenge(DLEQ_TAG, [&g_compressed(), &Y_COMPRESSED, adaptor_point, &proof.u, &r1, &r2], hashlock);
    if c != proof.c {
        return Err(ProofError::ChallengeMismatch);
    }
    Ok(())
}
