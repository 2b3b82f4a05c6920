//! Token handles with decimal-precision arithmetic helpers
//!
//! Tokens are external contracts; the core only ever holds their address and
//! declared decimal precision. All fractional amounts flowing through pricing
//! and solving are quantized to that precision before they are stored.

use ethers_core::types::Address;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Reference to an ERC-20 token by chain address plus its decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub address: Address,
    pub decimals: u8,
}

impl TokenRef {
    pub fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }

    /// One whole token expressed in base units (10^decimals)
    pub fn one(&self) -> Decimal {
        pow10(self.decimals as u32)
    }

    /// Truncate `amount` to this token's decimal precision
    pub fn quantize(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimals as u32, RoundingStrategy::ToZero)
    }

    /// Convert a human-unit amount into integer base units, truncating any
    /// sub-precision remainder. Returns `None` when the result does not fit
    /// the integer range.
    pub fn to_base_units(&self, amount: Decimal) -> Option<u128> {
        use rust_decimal::prelude::ToPrimitive;
        amount.checked_mul(self.one())?.trunc().to_u128()
    }

    /// Convert integer base units back into a human-unit amount. Raw values
    /// beyond Decimal's mantissa saturate rather than wrap.
    pub fn from_base_units(&self, raw: u128) -> Decimal {
        let raw = raw.min(i128::MAX as u128) as i128;
        Decimal::try_from_i128_with_scale(raw, 0).unwrap_or(Decimal::MAX) / self.one()
    }
}

/// 10^exp as a Decimal. Exponents beyond Decimal's 28-digit mantissa are a
/// caller bug; token decimals never exceed 18 in practice.
pub(crate) fn pow10(exp: u32) -> Decimal {
    let mut value = Decimal::ONE;
    for _ in 0..exp {
        value *= Decimal::TEN;
    }
    value
}
