//! Fiat-Shamir challenge shared by the DLEQ prover and verifier.
//!
//! Transcript: `tag || G || Y || T || U || R1 || R2 || hashlock`, each point in its 32-byte compressed form and the
//! hashlock as its 32 digest bytes. The BLAKE2s-256 digest is read little-endian and reduced mod the group order.
use crate::crypto::hashlock::Hashlock;
use crate::crypto::scalar;
use blake2::Blake2s256;
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::Scalar;
use digest::Digest;

pub const DLEQ_TAG: &[u8; 4] = b"DLEQ";

/// Points of the transcript, in order `[G, Y, T, U, R1, R2]`.
pub type TranscriptPoints<'a> = [&'a CompressedEdwardsY; 6];

pub fn challenge(tag: &[u8], points: TranscriptPoints<'_>, hashlock: &Hashlock) -> Scalar {
    let mut hasher = Blake2s256::new();
    hasher.update(tag);
    for point in points {
        hasher.update(point.as_bytes());
    }
    hasher.update(hashlock.to_bytes());
    scalar::reduce(&hasher.finalize())
}
