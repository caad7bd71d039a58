use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// An amount of a host-ledger asset, in the asset's smallest unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount {
    amount: u128,
}

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount { amount: 0 };

    /// Creates a new `TokenAmount` from a value in base units.
    pub fn from_base_units(amount: u128) -> Self {
        TokenAmount { amount }
    }

    /// Converts the `TokenAmount` to base units.
    pub fn to_base_units(&self) -> u128 {
        self.amount
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Creates a new `TokenAmount` from a decimal string in whole units, for an asset with `decimals` decimal places.
    /// Only ASCII digits and at most one decimal point are accepted. Returns `None` if the string is not a valid
    /// number representation or the value does not fit.
    pub fn from_decimal(value: &str, decimals: u32) -> Option<Self> {
        let unit = 10u128.checked_pow(decimals)?;
        let (whole_str, frac_str) = match value.split_once('.') {
            Some((whole, frac)) if frac.is_empty() || frac.len() > decimals as usize => return None,
            Some((whole, frac)) => (whole, frac),
            None => (value, ""),
        };
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole_str.is_empty() || !is_digits(whole_str) || !is_digits(frac_str) {
            return None;
        }
        let whole = whole_str.parse::<u128>().ok()?;
        let mut fraction = 0u128;
        for (i, digit) in frac_str.bytes().enumerate() {
            let place = 10u128.pow(decimals - 1 - i as u32);
            fraction += u128::from(digit - b'0') * place;
        }
        let amount = whole.checked_mul(unit)?.checked_add(fraction)?;
        Some(TokenAmount { amount })
    }

    /// Splits the amount into (whole, fraction) units for an asset with `decimals` decimal places.
    pub fn to_decimal_parts(&self, decimals: u32) -> (u128, u128) {
        let unit = 10u128.pow(decimals);
        (self.amount / unit, self.amount % unit)
    }

    pub fn checked_add(self, rhs: TokenAmount) -> Option<TokenAmount> {
        self.amount.checked_add(rhs.amount).map(TokenAmount::from_base_units)
    }

    pub fn checked_sub(self, rhs: TokenAmount) -> Option<TokenAmount> {
        self.amount.checked_sub(rhs.amount).map(TokenAmount::from_base_units)
    }
}

impl Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} units", self.amount)
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        TokenAmount::from_base_units(value)
    }
}
