mod atomic_lock;
pub mod dummy_impl;
pub mod error;
mod events;
pub mod ledger;
mod params;
mod state;
pub mod types;

pub use atomic_lock::{AtomicLock, SECRET_LENGTH};
pub use dummy_impl::InMemoryLedger;
pub use error::{LockError, StateError, ValidationError};
pub use events::LockEvent;
pub use ledger::{Ledger, LedgerError};
pub use params::LockParameters;
pub use state::LockState;
pub use types::{AccountId, AssetId, CallContext, LockId, LockTerms};

#[cfg(test)]
pub(crate) use atomic_lock::test as fixtures;
