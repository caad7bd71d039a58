use crate::amount::TokenAmount;
use crate::crypto::hashlock::Hashlock;
use crate::error::ReadError;
use crate::helpers::{read_hex32, Timestamp};
use blake2::Blake2b512;
use curve25519_dalek::edwards::CompressedEdwardsY;
use digest::Digest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn from_hex(hex_str: &str) -> Result<Self, ReadError> {
                read_hex32($field, hex_str).map(Self)
            }

            pub fn as_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_hex())
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.as_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.as_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let hex_str = String::deserialize(deserializer)?;
                $name::from_hex(&hex_str).map_err(serde::de::Error::custom)
            }
        }
    };
}

hex_id!(
    /// A host-ledger account address.
    AccountId,
    "account"
);

hex_id!(
    /// Descriptor of a host-ledger asset. The all-zero value means the lock carries no asset.
    AssetId,
    "asset"
);

hex_id!(
    /// Identifier of a lock, derived from its creation parameters. It doubles as the lock's custody account.
    LockId,
    "lock_id"
);

impl AssetId {
    pub const NONE: AssetId = AssetId([0u8; 32]);

    pub fn is_none(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl LockId {
    /// Derive the identifier from a labelled BLAKE2b-512 transcript over the lock's creation fields, in order:
    /// `hashlock`, `adaptor_point`, `depositor`, `asset`, `amount` (u128 LE) and `lock_until` (u64 LE). The first 32
    /// bytes of the digest are kept.
    ///
    /// Identical parameters and terms give the same id, and so the same custody account. A depositor locking the same
    /// amount twice against one hashlock should pick a different `lock_until` for each lock.
    pub fn derive(hashlock: &Hashlock, adaptor_point: &CompressedEdwardsY, terms: &LockTerms) -> Self {
        let mut hasher = Blake2b512::new();
        let mut append = |label: &[u8], data: &[u8]| {
            hasher.update((label.len() as u32).to_le_bytes());
            hasher.update(label);
            hasher.update((data.len() as u32).to_le_bytes());
            hasher.update(data);
        };
        append(b"xmrlock LockId v1", &[]);
        append(b"hashlock", &hashlock.to_bytes());
        append(b"adaptor_point", adaptor_point.as_bytes());
        append(b"depositor", terms.depositor.as_bytes());
        append(b"asset", terms.asset.as_bytes());
        append(b"amount", &terms.amount.to_base_units().to_le_bytes());
        append(b"lock_until", &terms.lock_until.as_secs().to_le_bytes());
        let digest = hasher.finalize();
        let mut id = [0u8; 32];
        id.copy_from_slice(&digest[..32]);
        Self(id)
    }

    /// Human-readable name, `XLK` followed by the hex id. Used as the storage file name.
    pub fn name(&self) -> String {
        format!("XLK{}", self.as_hex())
    }

    /// Parse a name produced by [`LockId::name`]. A bare hex id is accepted too.
    pub fn from_name(name: &str) -> Result<Self, ReadError> {
        Self::from_hex(name.strip_prefix("XLK").unwrap_or(name))
    }

    pub fn custody_account(&self) -> AccountId {
        AccountId(self.0)
    }
}

/// The economic terms of a lock, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTerms {
    pub depositor: AccountId,
    pub asset: AssetId,
    pub amount: TokenAmount,
    pub lock_until: Timestamp,
}

/// Who is calling, and when, as reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: AccountId,
    pub now: Timestamp,
}

impl CallContext {
    pub fn new(caller: AccountId, now: Timestamp) -> Self {
        Self { caller, now }
    }
}
