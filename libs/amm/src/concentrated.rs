//! Concentrated-liquidity pool model.
//!
//! Spot price comes from the pool's sqrt-price (X96 fixed point). Depth and
//! reflexivity reuse the constant-product formulas over whole-pool token
//! balances instead of walking tick ranges; this over-estimates available
//! depth near the current tick and is NOT tick-accurate. It is a deliberate,
//! documented approximation - do not "fix" it without commissioning a
//! tick-walking model.

use ethers_core::types::{Address, U256, U512};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use types::{FeeTier, TokenRef};

use crate::error::PoolError;
use crate::math::{constant_product_depth, constant_product_reflexivity, pow10};
use crate::pool_traits::{AmmPool, PoolProtocol};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = 887272;

/// Fractional digits carried when converting an X96 sqrt-price to Decimal
const PRICE_FRACTION_DIGITS: u32 = 18;

#[derive(Debug, Clone)]
pub struct ConcentratedPool {
    address: Address,
    token0: TokenRef,
    token1: TokenRef,
    fee: FeeTier,
    tick_spacing: i32,
    sqrt_price_x96: U256,
    tick: i32,
    balance0: u128,
    balance1: u128,
}

impl ConcentratedPool {
    /// Build a pool from a discovered address. Tokens are stored in canonical
    /// order (token0 < token1 by address). The snapshot starts empty; supply
    /// it via [`Self::with_snapshot`] or [`Self::apply_swap`].
    pub fn new(
        address: Address,
        token_a: TokenRef,
        token_b: TokenRef,
        fee: FeeTier,
        tick_spacing: Option<i32>,
    ) -> Self {
        let (token0, token1) = if token_a.address < token_b.address {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Self {
            address,
            token0,
            token1,
            fee,
            tick_spacing: tick_spacing.unwrap_or_else(|| fee.tick_spacing()),
            sqrt_price_x96: U256::zero(),
            tick: 0,
            balance0: 0,
            balance1: 0,
        }
    }

    pub fn with_snapshot(
        mut self,
        balance0: u128,
        balance1: u128,
        sqrt_price_x96: U256,
        tick: i32,
    ) -> Self {
        self.balance0 = balance0;
        self.balance1 = balance1;
        self.sqrt_price_x96 = sqrt_price_x96;
        self.tick = tick;
        self
    }

    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    pub fn sqrt_price_x96(&self) -> U256 {
        self.sqrt_price_x96
    }

    pub fn tick(&self) -> i32 {
        self.tick
    }

    /// Incremental snapshot update from an observed swap: balance deltas are
    /// signed (negative when tokens flowed out of the pool) and the sqrt
    /// price and tick are replaced wholesale. Keeps managed snapshots on the
    /// same read interface as one-shot ones.
    pub fn apply_swap(&mut self, amount0: i128, amount1: i128, sqrt_price_x96: U256, tick: i32) {
        self.balance0 = apply_delta(self.balance0, amount0);
        self.balance1 = apply_delta(self.balance1, amount1);
        self.sqrt_price_x96 = sqrt_price_x96;
        self.tick = tick;
    }

    /// Whole-pool balance of `token` in human units
    fn balance(&self, token: Address) -> Result<Decimal, PoolError> {
        if token == self.token0.address {
            Ok(self.token0.from_base_units(self.balance0))
        } else if token == self.token1.address {
            Ok(self.token1.from_base_units(self.balance1))
        } else {
            Err(PoolError::TokenNotInPool {
                token,
                pool: self.address,
            })
        }
    }

    /// Raw token1/token0 price (base-unit terms) from the X96 sqrt-price
    fn raw_token0_price(&self) -> Result<Decimal, PoolError> {
        if self.sqrt_price_x96.is_zero() {
            return Err(PoolError::UninitializedPool { pool: self.address });
        }

        // sqrtP^2 = price * 2^192
        let ratio: U512 = self.sqrt_price_x96.full_mul(self.sqrt_price_x96);
        let integer = ratio >> 192;
        if integer.bits() > 96 {
            return Err(PoolError::PriceOverflow { pool: self.address });
        }

        let mask = (U512::one() << 192) - U512::one();
        let scale = U512::from(10u64.pow(PRICE_FRACTION_DIGITS));
        let fraction = ((ratio & mask) * scale) >> 192;

        let integer = Decimal::try_from_i128_with_scale(integer.low_u128() as i128, 0)
            .map_err(|_| PoolError::PriceOverflow { pool: self.address })?;
        let fraction =
            Decimal::from_i128_with_scale(fraction.low_u128() as i128, PRICE_FRACTION_DIGITS);
        Ok(integer + fraction)
    }
}

/// Saturating signed adjustment of an unsigned balance
fn apply_delta(balance: u128, delta: i128) -> u128 {
    if delta >= 0 {
        balance.saturating_add(delta as u128)
    } else {
        balance.saturating_sub(delta.unsigned_abs())
    }
}

impl AmmPool for ConcentratedPool {
    fn address(&self) -> Address {
        self.address
    }

    fn token0(&self) -> &TokenRef {
        &self.token0
    }

    fn token1(&self) -> &TokenRef {
        &self.token1
    }

    fn fee(&self) -> FeeTier {
        self.fee
    }

    fn protocol(&self) -> PoolProtocol {
        PoolProtocol::Concentrated
    }

    fn price(&self, token: Address) -> Result<Decimal, PoolError> {
        let raw = self.raw_token0_price()?;

        // Raw price is in base units; rescale by the decimals difference
        let exponent = self.token0.decimals as i32 - self.token1.decimals as i32;
        let token0_price = if exponent >= 0 {
            raw.checked_mul(pow10(exponent as u32))
                .ok_or(PoolError::PriceOverflow { pool: self.address })?
        } else {
            raw / pow10(exponent.unsigned_abs())
        };

        if token == self.token0.address {
            Ok(token0_price)
        } else if token == self.token1.address {
            if token0_price.is_zero() {
                return Err(PoolError::PriceOverflow { pool: self.address });
            }
            Ok(Decimal::ONE / token0_price)
        } else {
            Err(PoolError::TokenNotInPool {
                token,
                pool: self.address,
            })
        }
    }

    fn liquidity(&self, token: Address) -> Result<Decimal, PoolError> {
        self.balance(token)
    }

    // Whole-pool-balance approximation of per-tick depth
    fn depth(&self, token: Address, slippage: Decimal) -> Result<Decimal, PoolError> {
        constant_product_depth(self.balance(token)?, self.fee.as_ratio(), slippage)
    }

    // Whole-pool-balance approximation, same caveat as `depth`
    fn reflexivity(&self, token: Address, size: Decimal) -> Result<Decimal, PoolError> {
        constant_product_reflexivity(self.balance(token)?, self.fee.as_ratio(), size)
    }
}

/// Tick containing `price`: log base 1.0001, truncated toward zero.
/// Returns `None` for non-positive prices or ticks outside the tick range.
pub fn price_to_tick(price: Decimal) -> Option<i32> {
    use rust_decimal::prelude::ToPrimitive;
    if price <= Decimal::ZERO {
        return None;
    }
    let tick = (price.to_f64()?.ln() / 1.0001f64.ln()).trunc() as i32;
    (tick.abs() <= MAX_TICK).then_some(tick)
}

/// Price of one tick step: 1.0001^tick, by binary exponentiation.
/// Returns `None` outside the representable range.
pub fn tick_to_price(tick: i32) -> Option<Decimal> {
    if tick.abs() > MAX_TICK {
        return None;
    }

    let mut result = Decimal::ONE;
    let mut base = dec!(1.0001);
    let mut exponent = tick.unsigned_abs();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = base.checked_mul(base)?;
        }
    }

    if tick < 0 {
        Decimal::ONE.checked_div(result)
    } else {
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEI: u128 = 1_000_000_000_000_000_000;

    fn tokens() -> (TokenRef, TokenRef) {
        (
            TokenRef::new(Address::from_low_u64_be(0xAA), 18),
            TokenRef::new(Address::from_low_u64_be(0xBB), 18),
        )
    }

    /// sqrtP for price 1.0 is exactly 2^96
    fn unit_sqrt_price() -> U256 {
        U256::one() << 96
    }

    fn pool() -> ConcentratedPool {
        let (a, b) = tokens();
        ConcentratedPool::new(Address::from_low_u64_be(0xF1), a, b, FeeTier::Medium, None)
            .with_snapshot(1_000 * WEI, 1_000 * WEI, unit_sqrt_price(), 0)
    }

    #[test]
    fn unit_price_round_trip() {
        let (a, b) = tokens();
        let pool = pool();
        assert_eq!(pool.price(a.address).unwrap(), Decimal::ONE);
        assert_eq!(pool.price(b.address).unwrap(), Decimal::ONE);
    }

    #[test]
    fn doubled_sqrt_price_quadruples_price() {
        let (a, _) = tokens();
        let pool = pool();
        let mut doubled = pool.clone();
        doubled.apply_swap(0, 0, unit_sqrt_price() * 2, 13863);
        assert_eq!(doubled.price(a.address).unwrap(), dec!(4));
        assert_eq!(doubled.tick(), 13863);
    }

    #[test]
    fn decimals_difference_rescales_price() {
        let a = TokenRef::new(Address::from_low_u64_be(0xAA), 18);
        let b = TokenRef::new(Address::from_low_u64_be(0xBB), 6);
        let pool = ConcentratedPool::new(Address::zero(), a, b, FeeTier::Low, None)
            .with_snapshot(WEI, 1_000_000, unit_sqrt_price(), 0);
        // Raw 1:1 at twelve decimals difference -> one token0 buys 1e12
        // base units of token1, i.e. a human price of 10^(18-6) adjusted
        assert_eq!(pool.price(a.address).unwrap(), dec!(1000000000000));
    }

    #[test]
    fn zero_sqrt_price_is_uninitialized() {
        let (a, b) = tokens();
        let empty = ConcentratedPool::new(Address::zero(), a, b, FeeTier::Medium, None);
        assert!(matches!(
            empty.price(a.address),
            Err(PoolError::UninitializedPool { .. })
        ));
    }

    #[test]
    fn managed_snapshot_applies_signed_deltas() {
        let (a, _) = tokens();
        let mut pool = pool();
        pool.apply_swap(50 * WEI as i128, -(40 * WEI as i128), unit_sqrt_price(), 0);
        assert_eq!(pool.liquidity(a.address).unwrap(), dec!(1050));
    }

    #[test]
    fn tick_spacing_defaults_from_fee_tier() {
        let (a, b) = tokens();
        let pool = ConcentratedPool::new(Address::zero(), a, b, FeeTier::Medium, None);
        assert_eq!(pool.tick_spacing(), 60);
        let pool = ConcentratedPool::new(Address::zero(), a, b, FeeTier::Low, Some(7));
        assert_eq!(pool.tick_spacing(), 7);
    }

    #[test]
    fn tick_price_identities() {
        assert_eq!(tick_to_price(0), Some(Decimal::ONE));
        let up = tick_to_price(1).unwrap();
        assert_eq!(up, dec!(1.0001));
        let down = tick_to_price(-1).unwrap();
        assert!((down * up - Decimal::ONE).abs() < dec!(0.0000000001));
        assert_eq!(tick_to_price(MAX_TICK + 1), None);
    }

    #[test]
    fn price_tick_inversion() {
        assert_eq!(price_to_tick(Decimal::ONE), Some(0));
        // 1.0001^1000 ~ 1.10517; a price just above lands in tick 1000
        assert_eq!(price_to_tick(dec!(1.1052)), Some(1000));
        assert_eq!(price_to_tick(dec!(0.9)), Some(-1053));
        assert_eq!(price_to_tick(Decimal::ZERO), None);
    }
}
