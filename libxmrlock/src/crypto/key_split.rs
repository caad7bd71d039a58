use crate::crypto::keys::{SecretScalar, ValidatedPoint};
use crate::crypto::scalar;
use curve25519_dalek::{EdwardsPoint, Scalar};
use log::*;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// A spend key `x` split into `base + adaptor ≡ x (mod n)`.
///
/// The adaptor scalar `t` is the secret that opens the lock on the other ledger. Whoever learns it, and already holds
/// the base share, can reconstruct the spend key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SplitKey {
    base_secret: SecretScalar,
    adaptor_secret: SecretScalar,
    adaptor_point: ValidatedPoint,
    public_spend_key: ValidatedPoint,
}

impl SplitKey {
    pub fn base_secret(&self) -> &SecretScalar {
        &self.base_secret
    }

    pub fn adaptor_secret(&self) -> &SecretScalar {
        &self.adaptor_secret
    }

    /// `T = t·G`
    pub fn adaptor_point(&self) -> &ValidatedPoint {
        &self.adaptor_point
    }

    /// `X = x·G`
    pub fn public_spend_key(&self) -> &ValidatedPoint {
        &self.public_spend_key
    }

    /// Checks `base·G + T == X`.
    pub fn verify(&self) -> bool {
        let base_point = EdwardsPoint::mul_base(self.base_secret.as_scalar());
        base_point + self.adaptor_point.as_point() == *self.public_spend_key.as_point()
    }
}

/// Split `spend_key` into a fresh random adaptor scalar and the base share that complements it.
pub fn split<R: CryptoRng + RngCore>(spend_key: &SecretScalar, rng: &mut R) -> SplitKey {
    loop {
        let adaptor_secret = SecretScalar::random(rng);
        let base = Zeroizing::new(scalar::sub(spend_key.as_scalar(), adaptor_secret.as_scalar()));
        // base == 0 means the adaptor equals the spend key; draw again
        let Ok(base_secret) = SecretScalar::try_from(*base) else {
            trace!("Adaptor scalar collided with the spend key, resampling");
            continue;
        };
        let adaptor_point = adaptor_secret.public_point();
        let public_spend_key = spend_key.public_point();
        debug!("Split spend key {} with adaptor point {}", public_spend_key.as_hex(), adaptor_point.as_hex());
        return SplitKey { base_secret, adaptor_secret, adaptor_point, public_spend_key };
    }
}

/// `base + adaptor`
pub fn recover(base: &Scalar, adaptor: &Scalar) -> Zeroizing<Scalar> {
    Zeroizing::new(scalar::add(base, adaptor))
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rng;

    #[test]
    fn split_and_recover() {
        let mut rng = rng();
        for _ in 0..16 {
            let spend = SecretScalar::random(&mut rng);
            let split = split(&spend, &mut rng);
            assert!(split.verify());
            let recovered = recover(split.base_secret().as_scalar(), split.adaptor_secret().as_scalar());
            assert_eq!(*recovered, *spend.as_scalar());
            assert_eq!(split.public_spend_key(), &spend.public_point());
        }
    }

    #[test]
    fn splits_are_fresh() {
        let mut rng = rng();
        let spend = SecretScalar::random(&mut rng);
        let a = split(&spend, &mut rng);
        let b = split(&spend, &mut rng);
        assert_ne!(a.adaptor_secret(), b.adaptor_secret());
        assert_ne!(a.base_secret(), b.base_secret());
    }

    #[test]
    fn tampered_split_fails_verification() {
        let mut rng = rng();
        let spend = SecretScalar::random(&mut rng);
        let mut split = split(&spend, &mut rng);
        split.adaptor_point = SecretScalar::random(&mut rng).public_point();
        assert!(!split.verify());
    }
}
