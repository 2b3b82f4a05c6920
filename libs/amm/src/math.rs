//! Shared AMM math: constant-product depth and reflexivity under a fee
//! haircut, and a Decimal square root.
//!
//! Both pool families funnel through these two formulas; concentrated pools
//! apply them to whole-pool balances (see `concentrated`).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PoolError;

/// Maximum amount of a token that can be supplied to a constant-product pool
/// while the realized price change stays below `slippage`.
///
/// Derived from the x*y=k invariant with the fee applied to the input side:
/// `depth = (reserve / (1 - fee)) * (1 / sqrt(1 - slippage) - 1)`.
pub(crate) fn constant_product_depth(
    reserve: Decimal,
    fee: Decimal,
    slippage: Decimal,
) -> Result<Decimal, PoolError> {
    if slippage <= Decimal::ZERO || slippage >= Decimal::ONE {
        return Err(PoolError::SlippageOutOfRange { value: slippage });
    }

    let root = decimal_sqrt(Decimal::ONE - slippage)
        .ok_or(PoolError::SlippageOutOfRange { value: slippage })?;
    Ok(reserve / (Decimal::ONE - fee) * (Decimal::ONE / root - Decimal::ONE))
}

/// Realized relative price change from trading `size` of a token into a
/// constant-product pool holding `liquidity` of it:
/// `1 - (L / (L + (1 - fee) * size))^2`.
pub(crate) fn constant_product_reflexivity(
    liquidity: Decimal,
    fee: Decimal,
    size: Decimal,
) -> Result<Decimal, PoolError> {
    if size <= Decimal::ZERO || size >= liquidity {
        return Err(PoolError::SizeOutOfBounds { size, liquidity });
    }

    let ratio = liquidity / (liquidity + (Decimal::ONE - fee) * size);
    Ok(Decimal::ONE - ratio * ratio)
}

/// 10^exp as a Decimal; exponents stay far below Decimal's 28-digit mantissa
pub(crate) fn pow10(exp: u32) -> Decimal {
    let mut value = Decimal::ONE;
    for _ in 0..exp {
        value *= Decimal::TEN;
    }
    value
}

/// Square root via Newton's method, keeping full Decimal precision.
/// Returns `None` for negative inputs.
pub(crate) fn decimal_sqrt(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }

    let epsilon = dec!(0.0000000000001);
    let mut x = value;
    for _ in 0..100 {
        let next = (x + value / x) / dec!(2);
        if (next - x).abs() < epsilon {
            return Some(next);
        }
        x = next;
    }

    // Best approximation if not fully converged
    Some(x)
}
