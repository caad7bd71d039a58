use crate::amount::TokenAmount;
use crate::lock::ledger::{Ledger, LedgerError};
use crate::lock::types::{AccountId, AssetId};
use log::*;
use std::collections::HashMap;

/// A ledger that lives in memory. Used in tests and for dry runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(AssetId, AccountId), TokenAmount>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `asset` to `account` out of thin air.
    pub fn mint(&mut self, asset: &AssetId, account: &AccountId, amount: TokenAmount) -> Result<(), LedgerError> {
        let balance = self.balance(asset, account);
        let new_balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.balances.insert((*asset, *account), new_balance);
        trace!("Minted {amount} of {asset} to {account}");
        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let available = self.balance(asset, from);
        let new_from = available.checked_sub(amount).ok_or(LedgerError::InsufficientFunds {
            asset: *asset,
            account: *from,
            needed: amount,
            available,
        })?;
        if from == to {
            return Ok(());
        }
        let new_to = self.balance(asset, to).checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.balances.insert((*asset, *from), new_from);
        self.balances.insert((*asset, *to), new_to);
        trace!("Transferred {amount} of {asset} from {from} to {to}");
        Ok(())
    }

    fn balance(&self, asset: &AssetId, account: &AccountId) -> TokenAmount {
        self.balances.get(&(*asset, *account)).copied().unwrap_or_default()
    }
}
