use crate::amount::TokenAmount;
use crate::helpers::{array_from_hex, array_to_hex, Timestamp};
use crate::lock::types::{AccountId, LockId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Emitted by a lock as it moves through its lifecycle. The `Unlocked` event publishes the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockEvent {
    Created { lock_id: LockId, depositor: AccountId, amount: TokenAmount, lock_until: Timestamp },
    Deposited { depositor: AccountId, amount: TokenAmount },
    Unlocked {
        unlocker: AccountId,
        #[serde(serialize_with = "array_to_hex", deserialize_with = "array_from_hex")]
        secret: [u8; 32],
        amount: TokenAmount,
    },
    Refunded { depositor: AccountId, amount: TokenAmount },
}

impl Display for LockEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LockEvent::Created { .. } => write!(f, "Created"),
            LockEvent::Deposited { .. } => write!(f, "Deposited"),
            LockEvent::Unlocked { .. } => write!(f, "Unlocked"),
            LockEvent::Refunded { .. } => write!(f, "Refunded"),
        }
    }
}
