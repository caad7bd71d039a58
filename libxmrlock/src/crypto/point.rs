use crate::crypto::keys::ValidatedPoint;
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::traits::{Identity, IsIdentity};
use curve25519_dalek::EdwardsPoint;
use log::*;
use thiserror::Error;

/// Number of doublings that sends every point of the cofactor subgroup to the identity (cofactor 8 = 2^3).
const COFACTOR_LOG2: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("point is the identity")]
    Identity,
    #[error("bytes do not decode to a curve point")]
    NotOnCurve,
    #[error("point encoding is not canonical")]
    NonCanonical,
    #[error("point has small order")]
    SmallOrder,
    #[error("point has a torsion component")]
    MixedOrder,
}

/// Accept `compressed` only if it is the canonical encoding of a point in the prime-order subgroup, other than the
/// identity.
pub fn validate(compressed: &CompressedEdwardsY) -> Result<ValidatedPoint, Rejection> {
    let result = check(compressed);
    if let Err(rejection) = &result {
        debug!("Rejected point {}: {rejection}", hex::encode(compressed.as_bytes()));
    }
    result
}

fn check(compressed: &CompressedEdwardsY) -> Result<ValidatedPoint, Rejection> {
    if *compressed == CompressedEdwardsY::identity() {
        return Err(Rejection::Identity);
    }
    let point = compressed.decompress().ok_or(Rejection::NotOnCurve)?;
    if point.compress() != *compressed {
        return Err(Rejection::NonCanonical);
    }
    if point.is_identity() {
        return Err(Rejection::Identity);
    }
    if is_small_order(&point) {
        return Err(Rejection::SmallOrder);
    }
    if !point.is_torsion_free() {
        return Err(Rejection::MixedOrder);
    }
    Ok(ValidatedPoint::new_unchecked(point))
}

fn is_small_order(point: &EdwardsPoint) -> bool {
    let mut acc = *point;
    for _ in 0..COFACTOR_LOG2 {
        acc = acc + acc;
        if acc.is_identity() {
            return true;
        }
    }
    false
}
