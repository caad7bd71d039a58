use crate::crypto::dleq::{verify, AdaptorProof};
use crate::crypto::hashlock::Hashlock;
use crate::crypto::keys::ValidatedPoint;
use crate::crypto::point::validate;
use crate::helpers::{compressed_from_hex, compressed_to_hex};
use crate::lock::error::{LockError, ValidationError};
use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::{Deserialize, Serialize};

/// The public commitments a lock is created from: the hashlock, the adaptor point `T` and the proof binding them.
///
/// This is what the secret holder hands to the depositor. Nothing in it is trusted until [`LockParameters::verify`]
/// has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockParameters {
    pub hashlock: Hashlock,
    #[serde(serialize_with = "compressed_to_hex", deserialize_with = "compressed_from_hex")]
    pub adaptor_point: CompressedEdwardsY,
    pub proof: AdaptorProof,
}

impl LockParameters {
    pub fn new(hashlock: Hashlock, adaptor_point: &ValidatedPoint, proof: AdaptorProof) -> Self {
        Self { hashlock, adaptor_point: *adaptor_point.as_compressed(), proof }
    }

    /// Validates the adaptor point and checks the DLEQ proof against it and the hashlock.
    pub fn verify(&self) -> Result<ValidatedPoint, LockError> {
        let adaptor_point = validate(&self.adaptor_point).map_err(ValidationError::InvalidPoint)?;
        verify(&self.adaptor_point, &self.proof, &self.hashlock)?;
        Ok(adaptor_point)
    }
}
