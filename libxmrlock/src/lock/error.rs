use crate::crypto::dleq::ProofError;
use crate::crypto::point::Rejection;
use crate::helpers::Timestamp;
use crate::lock::ledger::LedgerError;
use crate::lock::state::LockState;
use crate::lock::types::LockId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("Invalid input. {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid adaptor proof. {0}")]
    Proof(#[from] ProofError),
    #[error("Operation not allowed in the current lock state. {0}")]
    State(#[from] StateError),
    #[error("Ledger transfer failed. {0}")]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The secret must be 32 bytes, got {0}")]
    InvalidSecretLength(usize),
    #[error("The adaptor point is invalid: {0}")]
    InvalidPoint(#[from] Rejection),
    #[error("The secret reduces to the zero scalar")]
    ZeroScalar,
    #[error("The multiplication hint does not check out")]
    HintMismatch,
    #[error("The secret does not open the adaptor point")]
    AdaptorMismatch,
    #[error("The lock expiry {lock_until} is not after the current time {now}")]
    ExpiryInPast { lock_until: Timestamp, now: Timestamp },
    #[error("Asset and amount must both be set or both be empty")]
    MixedAssetAmount,
    #[error("The stored fields do not derive to lock id {0}")]
    IdMismatch(LockId),
    #[error("The revealed secret does not fit a lock that is {0}")]
    InconsistentRecord(LockState),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("The lock only expires at {lock_until} (now {now})")]
    NotExpired { lock_until: Timestamp, now: Timestamp },
    #[error("Only the depositor may call this")]
    NotDepositor,
    #[error("The lock is already {0}")]
    AlreadyTerminal(LockState),
    #[error("The lock has already been funded")]
    AlreadyFunded,
    #[error("The lock has not been funded")]
    NotFunded,
}
