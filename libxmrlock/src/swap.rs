//! What each side of a swap needs from the library, bundled.
//!
//! The secret holder splits their Monero spend key, commits to the adaptor scalar with a hashlock and proves the
//! hashlock and the adaptor point hide the same scalar ([`SwapSecrets::generate`]). The public half,
//! [`LockParameters`], goes to the depositor, who creates the lock. When the lock is released the adaptor scalar
//! becomes public, and the holder of the base share recovers the spend key ([`recover_spend_key`]).
use crate::crypto::dleq::{prove, verify, AdaptorProof, ProofError};
use crate::crypto::generators::{g_compressed, Y_COMPRESSED};
use crate::crypto::hashlock::{Hashlock, HASHLOCK_WORDS};
use crate::crypto::key_split::{recover, split, SplitKey};
use crate::crypto::keys::{KeyError, SecretScalar};
use crate::crypto::scalar;
use crate::helpers::{array_from_hex, array_to_hex, compressed_from_hex, compressed_to_hex};
use crate::lock::LockEvent;
pub use crate::lock::LockParameters;
use curve25519_dalek::edwards::CompressedEdwardsY;
use log::*;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// The secret used by the canonical test vector.
pub const CANONICAL_SECRET: [u8; 32] = [
    0x09, 0x9d, 0xd9, 0xb7, 0x3e, 0x2e, 0x84, 0xdb, 0x47, 0x2b, 0x34, 0x2d, 0xc3, 0xab, 0x05, 0x20, 0xf6, 0x54, 0xfd, 0x8a,
    0x81, 0xd6, 0x44, 0x18, 0x04, 0x77, 0x73, 0x0a, 0x90, 0xaf, 0x89, 0x00,
];

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("Revealed secret must be 32 bytes, got {0}")]
    InvalidSecretLength(usize),
    #[error("Key error: {0}")]
    Key(#[from] KeyError),
    #[error("Proof error: {0}")]
    Proof(#[from] ProofError),
}

/// Everything the secret holder generates for one swap. Contains secrets; never hand the whole thing over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapSecrets {
    pub split: SplitKey,
    pub params: LockParameters,
}

impl SwapSecrets {
    /// Split `spend_key`, commit to the adaptor scalar with `SHA-256(t)` and prove the commitments consistent.
    pub fn generate<R: CryptoRng + RngCore>(spend_key: &SecretScalar, rng: &mut R) -> Result<Self, SwapError> {
        let split = split(spend_key, rng);
        let t = split.adaptor_secret().as_scalar();
        let hashlock = Hashlock::from_secret(t.as_bytes());
        let (adaptor_point, proof) = prove(t, &hashlock)?;
        let params = LockParameters::new(hashlock, &adaptor_point, proof);
        info!("Generated swap secrets. Adaptor point {}, hashlock {hashlock}", adaptor_point.as_hex());
        Ok(Self { split, params })
    }

    /// The 32 bytes that unlock the lock.
    pub fn unlock_secret(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.split.adaptor_secret().as_scalar().to_bytes())
    }
}

/// `base + t`, where `t` is read from the secret revealed by the lock.
pub fn recover_spend_key(base: &SecretScalar, revealed: &[u8]) -> Result<SecretScalar, SwapError> {
    let bytes: [u8; 32] = revealed.try_into().map_err(|_| SwapError::InvalidSecretLength(revealed.len()))?;
    let t = Zeroizing::new(scalar::reduce(&bytes));
    let spend = recover(base.as_scalar(), &t);
    Ok(SecretScalar::try_from(*spend)?)
}

/// The secret published by an `Unlocked` event, if there is one.
pub fn revealed_secret_from_events(events: &[LockEvent]) -> Option<[u8; 32]> {
    events.iter().find_map(|e| match e {
        LockEvent::Unlocked { secret, .. } => Some(*secret),
        _ => None,
    })
}

/// A known-answer vector for cross-implementation checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVector {
    #[serde(serialize_with = "array_to_hex", deserialize_with = "array_from_hex")]
    pub secret: [u8; 32],
    pub hashlock: Hashlock,
    pub hashlock_words: [u32; HASHLOCK_WORDS],
    #[serde(serialize_with = "compressed_to_hex", deserialize_with = "compressed_from_hex")]
    pub g: CompressedEdwardsY,
    #[serde(serialize_with = "compressed_to_hex", deserialize_with = "compressed_from_hex")]
    pub y: CompressedEdwardsY,
    #[serde(serialize_with = "compressed_to_hex", deserialize_with = "compressed_from_hex")]
    pub adaptor_point: CompressedEdwardsY,
    pub proof: AdaptorProof,
}

impl TestVector {
    /// Build the vector for `secret`. The witness is `secret` read little-endian and reduced mod n; it must not be 0.
    pub fn for_secret(secret: [u8; 32]) -> Result<Self, SwapError> {
        let t = SecretScalar::try_from(scalar::reduce(&secret))?;
        let hashlock = Hashlock::from_secret(&secret);
        let (adaptor_point, proof) = prove(t.as_scalar(), &hashlock)?;
        Ok(Self {
            secret,
            hashlock,
            hashlock_words: *hashlock.words(),
            g: g_compressed(),
            y: Y_COMPRESSED,
            adaptor_point: *adaptor_point.as_compressed(),
            proof,
        })
    }

    pub fn canonical() -> Result<Self, SwapError> {
        Self::for_secret(CANONICAL_SECRET)
    }

    /// Re-verify the proof in the vector.
    pub fn check(&self) -> Result<(), ProofError> {
        verify(&self.adaptor_point, &self.proof, &self.hashlock)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::keys::ValidatedPoint;
    use rand::rng;

    #[test]
    fn generated_secrets_are_consistent() {
        let mut rng = rng();
        let spend = SecretScalar::random(&mut rng);
        let secrets = SwapSecrets::generate(&spend, &mut rng).unwrap();
        assert!(secrets.split.verify());
        let adaptor_point = secrets.params.verify().unwrap();
        assert_eq!(&adaptor_point, secrets.split.adaptor_point());
        assert!(secrets.params.hashlock.matches(secrets.unlock_secret().as_slice()));
    }

    #[test]
    fn recover_from_revealed_secret() {
        let mut rng = rng();
        let spend = SecretScalar::random(&mut rng);
        let secrets = SwapSecrets::generate(&spend, &mut rng).unwrap();
        let revealed = secrets.unlock_secret();
        let recovered = recover_spend_key(secrets.split.base_secret(), revealed.as_slice()).unwrap();
        assert_eq!(recovered, spend);
        assert_eq!(ValidatedPoint::from_secret(&recovered), spend.public_point());
        assert!(matches!(recover_spend_key(&spend, &[1u8; 5]), Err(SwapError::InvalidSecretLength(5))));
    }

    #[test]
    fn secret_from_events() {
        let events = vec![
            LockEvent::Deposited { depositor: Default::default(), amount: Default::default() },
            LockEvent::Unlocked { unlocker: Default::default(), secret: [4u8; 32], amount: Default::default() },
        ];
        assert_eq!(revealed_secret_from_events(&events), Some([4u8; 32]));
        assert_eq!(revealed_secret_from_events(&events[..1]), None);
    }

    #[test]
    fn canonical_vector() {
        let v = TestVector::canonical().unwrap();
        assert_eq!(v.hashlock_words[0], 0xd6fe686e);
        assert_eq!(hex::encode(v.adaptor_point.as_bytes()), "7168275bf3b10327887c3c366ab1ac108e3c8fc5cfe43cd2c977553450c6a90b");
        assert_eq!(hex::encode(v.y.as_bytes()), "8b655970153799af2aeadc9ff1add0ea6c7251d54154cfa92c173a0dd39c1f94");
        assert_eq!(v.check(), Ok(()));
        let json = serde_json::to_string(&v).unwrap();
        let back: TestVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
