//! Full swap flow: the secret holder generates the bundle, the depositor locks funds against the public parameters,
//! the secret holder claims them, and the depositor's side recovers the Monero spend key from the published secret.

use crate::amount::TokenAmount;
use crate::crypto::keys::SecretScalar;
use crate::crypto::scalar_mul::MulHint;
use crate::helpers::Timestamp;
use crate::lock::{AccountId, AssetId, AtomicLock, CallContext, InMemoryLedger, Ledger, LockParameters, LockTerms};
use crate::storage::{FileStore, LockStore};
use crate::swap::{recover_spend_key, revealed_secret_from_events, SwapSecrets};
use rand::rng;

const MAKER: AccountId = AccountId::new([0x11; 32]);
const TAKER: AccountId = AccountId::new([0x22; 32]);
const TOKEN: AssetId = AssetId::new([0x33; 32]);

#[test]
fn swap_end_to_end() {
    let _ = env_logger::try_init();
    let mut rng = rng();
    let now = Timestamp::new(1_760_000_000);

    // The taker owns the Monero spend key and splits it
    let spend_key = SecretScalar::random(&mut rng);
    let secrets = SwapSecrets::generate(&spend_key, &mut rng).expect("swap secrets");

    // Only the public parameters travel, as JSON
    let wire = serde_json::to_string(&secrets.params).unwrap();
    let params: LockParameters = serde_json::from_str(&wire).unwrap();
    params.verify().expect("parameters verify");

    // The maker locks tokens for the taker
    let mut ledger = InMemoryLedger::new();
    let amount = TokenAmount::from_decimal("12.5", 6).unwrap();
    ledger.mint(&TOKEN, &MAKER, amount).unwrap();
    let terms = LockTerms { depositor: MAKER, asset: TOKEN, amount, lock_until: Timestamp::new(now.as_secs() + 7200) };
    let mut lock = AtomicLock::create(params, terms, &CallContext::new(MAKER, now)).expect("create");
    lock.deposit(&CallContext::new(MAKER, now), &mut ledger).expect("deposit");

    let path = std::env::temp_dir().join(format!("xmrlock_swap_e2e_{}", std::process::id()));
    let mut store = FileStore::new(path).expect("store");
    store.write_lock(&lock).unwrap();

    // The taker claims with a hint
    let secret = secrets.unlock_secret();
    let hint = MulHint::generate(secrets.split.adaptor_secret().as_scalar(), &mut rng);
    let mut lock = store.load_lock(lock.id()).unwrap();
    let claimed = lock.release_with_hint(&CallContext::new(TAKER, now), &mut ledger, secret.as_slice(), Some(&hint));
    assert!(claimed.expect("release"));
    store.write_lock(&lock).unwrap();
    assert_eq!(ledger.balance(&TOKEN, &TAKER), amount);

    // The maker watches the lock's events and learns the adaptor scalar
    let watched = store.load_lock(lock.id()).unwrap();
    let revealed = revealed_secret_from_events(watched.events()).expect("secret published");
    assert_eq!(revealed, *secret);
    let recovered = recover_spend_key(secrets.split.base_secret(), &revealed).expect("recover");
    assert_eq!(recovered, spend_key);
    assert_eq!(recovered.public_point(), *secrets.split.public_spend_key());
    let _ = std::fs::remove_dir_all(store.path());
}
