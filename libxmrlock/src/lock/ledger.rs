use crate::amount::TokenAmount;
use crate::lock::types::{AccountId, AssetId};
use thiserror::Error;

/// Custody of assets on the host ledger.
///
/// Implementations must apply a transfer entirely or not at all.
pub trait Ledger {
    fn transfer(&mut self, asset: &AssetId, from: &AccountId, to: &AccountId, amount: TokenAmount)
        -> Result<(), LedgerError>;

    fn balance(&self, asset: &AssetId, account: &AccountId) -> TokenAmount;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Account {account} holds {available} of asset {asset}, {needed} needed")]
    InsufficientFunds { asset: AssetId, account: AccountId, needed: TokenAmount, available: TokenAmount },
    #[error("Balance overflow")]
    Overflow,
}
