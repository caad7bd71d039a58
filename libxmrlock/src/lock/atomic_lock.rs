use crate::amount::TokenAmount;
use crate::crypto::dleq::AdaptorProof;
use crate::crypto::hashlock::Hashlock;
use crate::crypto::keys::ValidatedPoint;
use crate::crypto::scalar;
use crate::crypto::scalar_mul::{check_base_mul, MulHint, ScalarMulError};
use crate::helpers::{option_array_from_hex, option_array_to_hex, Timestamp};
use crate::lock::error::{LockError, StateError, ValidationError};
use crate::lock::events::LockEvent;
use crate::lock::ledger::Ledger;
use crate::lock::params::LockParameters;
use crate::lock::state::LockState;
use crate::lock::types::{AccountId, AssetId, CallContext, LockId, LockTerms};
use log::*;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub const SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LockRecord {
    hashlock: Hashlock,
    adaptor_point: ValidatedPoint,
    proof: AdaptorProof,
    lock_until: Timestamp,
    depositor: AccountId,
    asset: AssetId,
    amount: TokenAmount,
    state: LockState,
    funded: bool,
    #[serde(serialize_with = "option_array_to_hex", deserialize_with = "option_array_from_hex")]
    revealed_secret: Option<[u8; 32]>,
}

/// A hash- and proof-gated lock over a host-ledger asset.
///
/// The depositor funds the lock; anyone revealing a 32-byte secret whose SHA-256 is the hashlock *and* whose scalar
/// opens the adaptor point collects the funds. Once `lock_until` has passed, the depositor may take the funds back
/// instead. Exactly one of the two happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredLock")]
pub struct AtomicLock {
    id: LockId,
    record: LockRecord,
    events: Vec<LockEvent>,
}

/// A lock as read back from storage, before it is trusted again.
#[derive(Deserialize)]
struct StoredLock {
    id: LockId,
    record: LockRecord,
    events: Vec<LockEvent>,
}

impl TryFrom<StoredLock> for AtomicLock {
    type Error = LockError;

    /// A stored lock must carry the id its fields derive to and a proof that still verifies, exactly as `create`
    /// would have required.
    fn try_from(stored: StoredLock) -> Result<Self, Self::Error> {
        let StoredLock { id, record, events } = stored;
        let terms = LockTerms {
            depositor: record.depositor,
            asset: record.asset,
            amount: record.amount,
            lock_until: record.lock_until,
        };
        if terms.asset.is_none() != terms.amount.is_zero() {
            return Err(ValidationError::MixedAssetAmount.into());
        }
        let adaptor_point = record.adaptor_point.as_compressed();
        if LockId::derive(&record.hashlock, adaptor_point, &terms) != id {
            return Err(ValidationError::IdMismatch(id).into());
        }
        crate::crypto::dleq::verify(adaptor_point, &record.proof, &record.hashlock)?;
        let secret_ok = match (record.state, &record.revealed_secret) {
            (LockState::Unlocked, Some(secret)) => record.hashlock.matches(secret),
            (LockState::Unlocked, None) => false,
            (_, revealed) => revealed.is_none(),
        };
        if !secret_ok {
            return Err(ValidationError::InconsistentRecord(record.state).into());
        }
        Ok(Self { id, record, events })
    }
}

impl AtomicLock {
    /// Create a lock from `params` and `terms`. The adaptor point is validated and the DLEQ proof checked before
    /// anything is stored; if either fails, no lock exists.
    pub fn create(params: LockParameters, terms: LockTerms, ctx: &CallContext) -> Result<Self, LockError> {
        Self::try_create(params, terms, ctx).inspect_err(|e| warn!("Lock creation rejected: {e}"))
    }

    fn try_create(params: LockParameters, terms: LockTerms, ctx: &CallContext) -> Result<Self, LockError> {
        let LockParameters { hashlock, adaptor_point, proof } = params;
        let validated = crate::crypto::point::validate(&adaptor_point).map_err(ValidationError::InvalidPoint)?;
        if terms.lock_until <= ctx.now {
            return Err(ValidationError::ExpiryInPast { lock_until: terms.lock_until, now: ctx.now }.into());
        }
        if terms.asset.is_none() != terms.amount.is_zero() {
            return Err(ValidationError::MixedAssetAmount.into());
        }
        crate::crypto::dleq::verify(&adaptor_point, &proof, &hashlock)?;
        let id = LockId::derive(&hashlock, &adaptor_point, &terms);
        let LockTerms { depositor, asset, amount, lock_until } = terms;
        info!("Lock {} created by {depositor} for {amount}, expires {lock_until}", id.name());
        let record = LockRecord {
            hashlock,
            adaptor_point: validated,
            proof,
            lock_until,
            depositor,
            asset,
            amount,
            state: LockState::Locked,
            funded: false,
            revealed_secret: None,
        };
        let events = vec![LockEvent::Created { lock_id: id, depositor, amount, lock_until }];
        Ok(Self { id, record, events })
    }

    /// Move `amount` of `asset` from the depositor into the lock's custody account.
    pub fn deposit<L: Ledger>(&mut self, ctx: &CallContext, ledger: &mut L) -> Result<(), LockError> {
        self.try_deposit(ctx, ledger).inspect_err(|e| warn!("Lock {}: deposit failed: {e}", self.id.name()))
    }

    fn try_deposit<L: Ledger>(&mut self, ctx: &CallContext, ledger: &mut L) -> Result<(), LockError> {
        self.require_locked()?;
        self.require_depositor(ctx)?;
        if self.record.funded {
            return Err(StateError::AlreadyFunded.into());
        }
        if !self.record.amount.is_zero() {
            ledger.transfer(&self.record.asset, &self.record.depositor, &self.custody_account(), self.record.amount)?;
        }
        self.record.funded = true;
        self.events.push(LockEvent::Deposited { depositor: self.record.depositor, amount: self.record.amount });
        info!("Lock {} funded with {}", self.id.name(), self.record.amount);
        Ok(())
    }

    /// Release the funds to the caller by revealing the secret.
    ///
    /// Returns `Ok(false)`, changing nothing, if the secret does not match the hashlock. A secret that matches the
    /// hashlock must also open the adaptor point, or the call fails.
    pub fn release<L: Ledger>(&mut self, ctx: &CallContext, ledger: &mut L, secret: &[u8]) -> Result<bool, LockError> {
        self.release_with_hint(ctx, ledger, secret, None)
    }

    /// As [`AtomicLock::release`], checking `secret·G == T` through `hint` when given.
    pub fn release_with_hint<L: Ledger>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
        secret: &[u8],
        hint: Option<&MulHint>,
    ) -> Result<bool, LockError> {
        self.try_release(ctx, ledger, secret, hint)
            .inspect_err(|e| warn!("Lock {}: release failed: {e}", self.id.name()))
    }

    fn try_release<L: Ledger>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
        secret: &[u8],
        hint: Option<&MulHint>,
    ) -> Result<bool, LockError> {
        self.require_locked()?;
        if secret.len() != SECRET_LENGTH {
            return Err(ValidationError::InvalidSecretLength(secret.len()).into());
        }
        if !self.record.hashlock.matches(secret) {
            debug!("Lock {}: secret does not match the hashlock", self.id.name());
            return Ok(false);
        }
        let mut bytes = Zeroizing::new([0u8; SECRET_LENGTH]);
        bytes.copy_from_slice(secret);
        let witness = Zeroizing::new(scalar::reduce(bytes.as_slice()));
        if scalar::is_zero(&witness) {
            return Err(ValidationError::ZeroScalar.into());
        }
        check_base_mul(&witness, &self.record.adaptor_point, hint).map_err(|e| match e {
            ScalarMulError::Mismatch => ValidationError::AdaptorMismatch,
            ScalarMulError::HintMismatch => ValidationError::HintMismatch,
        })?;
        if !self.is_funded() {
            return Err(StateError::NotFunded.into());
        }
        if !self.record.amount.is_zero() {
            ledger.transfer(&self.record.asset, &self.custody_account(), &ctx.caller, self.record.amount)?;
        }
        self.record.state = LockState::Unlocked;
        self.record.revealed_secret = Some(*bytes);
        self.events.push(LockEvent::Unlocked { unlocker: ctx.caller, secret: *bytes, amount: self.record.amount });
        info!("Lock {} released to {}", self.id.name(), ctx.caller);
        Ok(true)
    }

    /// Return the funds to the depositor once the lock has expired.
    pub fn refund<L: Ledger>(&mut self, ctx: &CallContext, ledger: &mut L) -> Result<bool, LockError> {
        self.try_refund(ctx, ledger).inspect_err(|e| warn!("Lock {}: refund failed: {e}", self.id.name()))
    }

    fn try_refund<L: Ledger>(&mut self, ctx: &CallContext, ledger: &mut L) -> Result<bool, LockError> {
        self.require_locked()?;
        self.require_depositor(ctx)?;
        if ctx.now < self.record.lock_until {
            return Err(StateError::NotExpired { lock_until: self.record.lock_until, now: ctx.now }.into());
        }
        let refunded = if self.record.funded { self.record.amount } else { TokenAmount::ZERO };
        if !refunded.is_zero() {
            ledger.transfer(&self.record.asset, &self.custody_account(), &self.record.depositor, refunded)?;
        }
        self.record.state = LockState::Refunded;
        self.events.push(LockEvent::Refunded { depositor: self.record.depositor, amount: refunded });
        info!("Lock {} refunded {refunded} to {}", self.id.name(), self.record.depositor);
        Ok(true)
    }

    fn require_locked(&self) -> Result<(), StateError> {
        if self.record.state.is_terminal() {
            return Err(StateError::AlreadyTerminal(self.record.state));
        }
        Ok(())
    }

    fn require_depositor(&self, ctx: &CallContext) -> Result<(), StateError> {
        if ctx.caller != self.record.depositor {
            return Err(StateError::NotDepositor);
        }
        Ok(())
    }

    pub fn get_hashlock(&self) -> &Hashlock {
        &self.record.hashlock
    }

    pub fn is_released(&self) -> bool {
        self.record.state == LockState::Unlocked
    }

    pub fn get_expiry(&self) -> Timestamp {
        self.record.lock_until
    }

    pub fn state(&self) -> LockState {
        self.record.state
    }

    pub fn id(&self) -> &LockId {
        &self.id
    }

    pub fn name(&self) -> String {
        self.id.name()
    }

    pub fn custody_account(&self) -> AccountId {
        self.id.custody_account()
    }

    pub fn adaptor_point(&self) -> &ValidatedPoint {
        &self.record.adaptor_point
    }

    pub fn proof(&self) -> &AdaptorProof {
        &self.record.proof
    }

    pub fn depositor(&self) -> &AccountId {
        &self.record.depositor
    }

    pub fn asset(&self) -> &AssetId {
        &self.record.asset
    }

    pub fn amount(&self) -> TokenAmount {
        self.record.amount
    }

    /// A lock with nothing to hold counts as funded.
    pub fn is_funded(&self) -> bool {
        self.record.funded || self.record.amount.is_zero()
    }

    /// The secret, once the lock has been released.
    pub fn revealed_secret(&self) -> Option<&[u8; 32]> {
        self.record.revealed_secret.as_ref()
    }

    pub fn events(&self) -> &[LockEvent] {
        &self.events
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::crypto::dleq::prove;
    use crate::crypto::keys::SecretScalar;
    use crate::lock::dummy_impl::InMemoryLedger;
    use crate::lock::ledger::LedgerError;
    use curve25519_dalek::edwards::CompressedEdwardsY;
    use curve25519_dalek::Scalar;
    use rand::rng;

    pub const DEPOSITOR: AccountId = AccountId::new([0xd0; 32]);
    pub const TAKER: AccountId = AccountId::new([0x7a; 32]);
    pub const ASSET: AssetId = AssetId::new([0xa5; 32]);
    pub const NOW: u64 = 1_750_000_000;
    pub const HOUR: u64 = 3600;

    pub struct Fixture {
        pub secret: SecretScalar,
        pub params: LockParameters,
        pub terms: LockTerms,
        pub ledger: InMemoryLedger,
    }

    pub fn fixture(amount: u128) -> Fixture {
        let secret = SecretScalar::random(&mut rng());
        let hashlock = Hashlock::from_secret(secret.as_scalar().as_bytes());
        let (t, proof) = prove(secret.as_scalar(), &hashlock).unwrap();
        let params = LockParameters::new(hashlock, &t, proof);
        let asset = if amount == 0 { AssetId::NONE } else { ASSET };
        let terms = LockTerms {
            depositor: DEPOSITOR,
            asset,
            amount: TokenAmount::from(amount),
            lock_until: Timestamp::new(NOW + HOUR),
        };
        let mut ledger = InMemoryLedger::new();
        ledger.mint(&ASSET, &DEPOSITOR, TokenAmount::from(1_000_000)).unwrap();
        Fixture { secret, params, terms, ledger }
    }

    pub fn at(caller: AccountId, secs: u64) -> CallContext {
        CallContext::new(caller, Timestamp::new(secs))
    }

    fn funded_lock(f: &mut Fixture) -> AtomicLock {
        let mut lock = AtomicLock::create(f.params.clone(), f.terms, &at(DEPOSITOR, NOW)).unwrap();
        lock.deposit(&at(DEPOSITOR, NOW), &mut f.ledger).unwrap();
        lock
    }

    #[test]
    fn create_checks_inputs() {
        let f = fixture(500);
        let ctx = at(DEPOSITOR, NOW);
        let lock = AtomicLock::create(f.params.clone(), f.terms, &ctx).unwrap();
        assert_eq!(lock.state(), LockState::Locked);
        assert!(!lock.is_funded());
        assert_eq!(lock.get_expiry(), Timestamp::new(NOW + HOUR));
        assert_eq!(lock.events().len(), 1);

        let mut terms = f.terms;
        terms.lock_until = Timestamp::new(NOW);
        let err = AtomicLock::create(f.params.clone(), terms, &ctx).unwrap_err();
        assert!(matches!(err, LockError::Validation(ValidationError::ExpiryInPast { .. })));

        let mut terms = f.terms;
        terms.asset = AssetId::NONE;
        let err = AtomicLock::create(f.params.clone(), terms, &ctx).unwrap_err();
        assert_eq!(err, LockError::Validation(ValidationError::MixedAssetAmount));

        let mut params = f.params.clone();
        params.adaptor_point = CompressedEdwardsY([0u8; 32]);
        let err = AtomicLock::create(params, f.terms, &ctx).unwrap_err();
        assert!(matches!(err, LockError::Validation(ValidationError::InvalidPoint(_))));

        let mut params = f.params.clone();
        params.hashlock = Hashlock::from_secret(b"not the committed secret");
        let err = AtomicLock::create(params, f.terms, &ctx).unwrap_err();
        assert!(matches!(err, LockError::Proof(_)));
    }

    #[test]
    fn deposit_rules() {
        let mut f = fixture(500);
        let mut lock = AtomicLock::create(f.params.clone(), f.terms, &at(DEPOSITOR, NOW)).unwrap();
        let err = lock.deposit(&at(TAKER, NOW), &mut f.ledger).unwrap_err();
        assert_eq!(err, LockError::State(StateError::NotDepositor));
        lock.deposit(&at(DEPOSITOR, NOW), &mut f.ledger).unwrap();
        assert!(lock.is_funded());
        assert_eq!(f.ledger.balance(&ASSET, &lock.custody_account()), TokenAmount::from(500));
        let err = lock.deposit(&at(DEPOSITOR, NOW), &mut f.ledger).unwrap_err();
        assert_eq!(err, LockError::State(StateError::AlreadyFunded));
        assert_eq!(f.ledger.balance(&ASSET, &DEPOSITOR), TokenAmount::from(999_500));
    }

    #[test]
    fn deposit_without_funds_leaves_lock_unchanged() {
        let mut f = fixture(500);
        let mut lock = AtomicLock::create(f.params.clone(), f.terms, &at(DEPOSITOR, NOW)).unwrap();
        let mut empty = InMemoryLedger::new();
        let err = lock.deposit(&at(DEPOSITOR, NOW), &mut empty).unwrap_err();
        assert!(matches!(err, LockError::Ledger(LedgerError::InsufficientFunds { .. })));
        assert!(!lock.is_funded());
        assert_eq!(lock.events().len(), 1);
    }

    #[test]
    fn release_with_correct_secret() {
        let mut f = fixture(500);
        let mut lock = funded_lock(&mut f);
        let secret = f.secret.as_scalar().to_bytes();
        assert!(lock.release(&at(TAKER, NOW + 10), &mut f.ledger, &secret).unwrap());
        assert!(lock.is_released());
        assert_eq!(lock.revealed_secret(), Some(&secret));
        assert_eq!(f.ledger.balance(&ASSET, &TAKER), TokenAmount::from(500));
        assert_eq!(f.ledger.balance(&ASSET, &lock.custody_account()), TokenAmount::ZERO);
        assert!(matches!(lock.events().last(), Some(LockEvent::Unlocked { unlocker, .. }) if *unlocker == TAKER));
    }

    #[test]
    fn wrong_secret_is_a_soft_failure() {
        let mut f = fixture(500);
        let mut lock = funded_lock(&mut f);
        assert!(!lock.release(&at(TAKER, NOW), &mut f.ledger, &[7u8; 32]).unwrap());
        assert_eq!(lock.state(), LockState::Locked);
        let err = lock.release(&at(TAKER, NOW), &mut f.ledger, &[7u8; 31]).unwrap_err();
        assert_eq!(err, LockError::Validation(ValidationError::InvalidSecretLength(31)));
        assert_eq!(lock.events().len(), 2);
    }

    #[test]
    fn hashlock_match_without_adaptor_match_fails() {
        // A proof made for one scalar, with the hashlock of a different preimage
        let mut f = fixture(500);
        let preimage = [3u8; 32];
        let hashlock = Hashlock::from_secret(&preimage);
        let (t, proof) = prove(f.secret.as_scalar(), &hashlock).unwrap();
        let params = LockParameters::new(hashlock, &t, proof);
        let mut lock = AtomicLock::create(params, f.terms, &at(DEPOSITOR, NOW)).unwrap();
        lock.deposit(&at(DEPOSITOR, NOW), &mut f.ledger).unwrap();
        let err = lock.release(&at(TAKER, NOW), &mut f.ledger, &preimage).unwrap_err();
        assert_eq!(err, LockError::Validation(ValidationError::AdaptorMismatch));
        assert_eq!(lock.state(), LockState::Locked);
        assert_eq!(f.ledger.balance(&ASSET, &TAKER), TokenAmount::ZERO);
    }

    #[test]
    fn release_requires_funding() {
        let mut f = fixture(500);
        let mut lock = AtomicLock::create(f.params.clone(), f.terms, &at(DEPOSITOR, NOW)).unwrap();
        let secret = f.secret.as_scalar().to_bytes();
        let err = lock.release(&at(TAKER, NOW), &mut f.ledger, &secret).unwrap_err();
        assert_eq!(err, LockError::State(StateError::NotFunded));
        assert_eq!(lock.revealed_secret(), None);
    }

    #[test]
    fn zero_amount_lock_needs_no_deposit() {
        let mut f = fixture(0);
        let mut lock = AtomicLock::create(f.params.clone(), f.terms, &at(DEPOSITOR, NOW)).unwrap();
        assert!(lock.is_funded());
        let secret = f.secret.as_scalar().to_bytes();
        assert!(lock.release(&at(TAKER, NOW), &mut f.ledger, &secret).unwrap());
    }

    #[test]
    fn hinted_release() {
        let mut f = fixture(500);
        let mut lock = funded_lock(&mut f);
        let secret = f.secret.as_scalar().to_bytes();
        let mut bad = MulHint::generate(f.secret.as_scalar(), &mut rng());
        bad.s1 += Scalar::ONE;
        let err = lock.release_with_hint(&at(TAKER, NOW), &mut f.ledger, &secret, Some(&bad)).unwrap_err();
        assert_eq!(err, LockError::Validation(ValidationError::HintMismatch));
        assert_eq!(lock.state(), LockState::Locked);

        let good = MulHint::generate(f.secret.as_scalar(), &mut rng());
        assert!(lock.release_with_hint(&at(TAKER, NOW), &mut f.ledger, &secret, Some(&good)).unwrap());
        assert!(lock.is_released());
    }

    #[test]
    fn refund_rules() {
        let mut f = fixture(500);
        let mut lock = funded_lock(&mut f);
        let err = lock.refund(&at(DEPOSITOR, NOW + HOUR - 1), &mut f.ledger).unwrap_err();
        assert!(matches!(err, LockError::State(StateError::NotExpired { .. })));
        let err = lock.refund(&at(TAKER, NOW + HOUR), &mut f.ledger).unwrap_err();
        assert_eq!(err, LockError::State(StateError::NotDepositor));
        assert!(lock.refund(&at(DEPOSITOR, NOW + HOUR), &mut f.ledger).unwrap());
        assert_eq!(lock.state(), LockState::Refunded);
        assert_eq!(f.ledger.balance(&ASSET, &DEPOSITOR), TokenAmount::from(1_000_000));
    }

    #[test]
    fn terminal_states_are_final() {
        let mut f = fixture(500);
        let secret = f.secret.as_scalar().to_bytes();
        let mut released = funded_lock(&mut f);
        released.release(&at(TAKER, NOW), &mut f.ledger, &secret).unwrap();
        let mut refunded = funded_lock(&mut f);
        refunded.refund(&at(DEPOSITOR, NOW + HOUR), &mut f.ledger).unwrap();
        let snapshot = f.ledger.clone();

        for (lock, state) in [(&mut released, LockState::Unlocked), (&mut refunded, LockState::Refunded)] {
            let terminal = LockError::State(StateError::AlreadyTerminal(state));
            let later = NOW + 2 * HOUR;
            assert_eq!(lock.release(&at(TAKER, later), &mut f.ledger, &secret).unwrap_err(), terminal);
            assert_eq!(lock.refund(&at(DEPOSITOR, later), &mut f.ledger).unwrap_err(), terminal);
            assert_eq!(lock.deposit(&at(DEPOSITOR, later), &mut f.ledger).unwrap_err(), terminal);
            assert_eq!(lock.state(), state);
        }
        for account in [DEPOSITOR, TAKER, released.custody_account(), refunded.custody_account()] {
            assert_eq!(f.ledger.balance(&ASSET, &account), snapshot.balance(&ASSET, &account));
        }
    }

    #[test]
    fn release_after_expiry_is_allowed_until_refunded() {
        let mut f = fixture(500);
        let mut lock = funded_lock(&mut f);
        let secret = f.secret.as_scalar().to_bytes();
        assert!(lock.release(&at(TAKER, NOW + 2 * HOUR), &mut f.ledger, &secret).unwrap());
    }

    #[test]
    fn secret_above_group_order_is_reduced() {
        // n + 7, little-endian
        let mut secret = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x10,
        ];
        secret[0] += 7;
        let hashlock = Hashlock::from_secret(&secret);
        let (t, proof) = prove(&Scalar::from(7u8), &hashlock).unwrap();
        let mut f = fixture(500);
        let params = LockParameters::new(hashlock, &t, proof);
        let mut lock = AtomicLock::create(params, f.terms, &at(DEPOSITOR, NOW)).unwrap();
        lock.deposit(&at(DEPOSITOR, NOW), &mut f.ledger).unwrap();
        assert!(lock.release(&at(TAKER, NOW), &mut f.ledger, &secret).unwrap());
        assert_eq!(lock.revealed_secret(), Some(&secret));
    }

    #[test]
    fn refund_of_unfunded_lock_moves_nothing() {
        let mut f = fixture(500);
        let mut lock = AtomicLock::create(f.params.clone(), f.terms, &at(DEPOSITOR, NOW)).unwrap();
        let before = f.ledger.clone();
        assert!(lock.refund(&at(DEPOSITOR, NOW + HOUR), &mut f.ledger).unwrap());
        assert_eq!(lock.state(), LockState::Refunded);
        assert!(matches!(lock.events().last(), Some(LockEvent::Refunded { amount, .. }) if amount.is_zero()));
        for account in [DEPOSITOR, lock.custody_account()] {
            assert_eq!(f.ledger.balance(&ASSET, &account), before.balance(&ASSET, &account));
        }
        let err = lock.deposit(&at(DEPOSITOR, NOW + HOUR), &mut f.ledger).unwrap_err();
        assert_eq!(err, LockError::State(StateError::AlreadyTerminal(LockState::Refunded)));
    }

    #[test]
    fn asset_without_amount_is_rejected() {
        let f = fixture(500);
        let mut terms = f.terms;
        terms.amount = TokenAmount::ZERO;
        let err = AtomicLock::create(f.params.clone(), terms, &at(DEPOSITOR, NOW)).unwrap_err();
        assert_eq!(err, LockError::Validation(ValidationError::MixedAssetAmount));
    }

    #[test]
    fn canonical_lock_refund_boundary() {
        let vector = crate::swap::TestVector::canonical().unwrap();
        let params = LockParameters {
            hashlock: vector.hashlock,
            adaptor_point: vector.adaptor_point,
            proof: vector.proof.clone(),
        };
        let mut f = fixture(500);
        let mut lock = AtomicLock::create(params, f.terms, &at(DEPOSITOR, NOW)).unwrap();
        lock.deposit(&at(DEPOSITOR, NOW), &mut f.ledger).unwrap();
        let lock_until = lock.get_expiry().as_secs();

        let err = lock.refund(&at(DEPOSITOR, lock_until - 1), &mut f.ledger).unwrap_err();
        assert_eq!(
            err,
            LockError::State(StateError::NotExpired {
                lock_until: Timestamp::new(lock_until),
                now: Timestamp::new(lock_until - 1)
            })
        );
        assert_eq!(lock.state(), LockState::Locked);
        assert!(lock.refund(&at(DEPOSITOR, lock_until), &mut f.ledger).unwrap());
        assert_eq!(lock.state(), LockState::Refunded);
        assert_eq!(f.ledger.balance(&ASSET, &DEPOSITOR), TokenAmount::from(1_000_000));
        let err = lock.release(&at(TAKER, lock_until), &mut f.ledger, &vector.secret).unwrap_err();
        assert_eq!(err, LockError::State(StateError::AlreadyTerminal(LockState::Refunded)));
    }

    #[test]
    fn deserialized_lock_is_checked() {
        let mut f = fixture(500);
        let lock = funded_lock(&mut f);
        let json = serde_json::to_string(&lock).unwrap();
        let reloaded: AtomicLock = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.id(), lock.id());

        // Another secret's commitments, with a proof that verifies on its own
        let other = fixture(500);
        let forged = json
            .replace(&lock.get_hashlock().as_hex(), &other.params.hashlock.as_hex())
            .replace(&lock.adaptor_point().as_hex(), &hex::encode(other.params.adaptor_point.as_bytes()));
        assert!(serde_json::from_str::<AtomicLock>(&forged).is_err());

        let mut released = funded_lock(&mut f);
        let secret = f.secret.as_scalar().to_bytes();
        released.release(&at(TAKER, NOW), &mut f.ledger, &secret).unwrap();
        let json = serde_json::to_string(&released).unwrap();
        assert!(json.contains("\"state\":\"Unlocked\""));
        let relocked = json.replace("\"state\":\"Unlocked\"", "\"state\":\"Locked\"");
        assert!(serde_json::from_str::<AtomicLock>(&relocked).is_err());
        assert!(serde_json::from_str::<AtomicLock>(&json).is_ok());
    }
}
