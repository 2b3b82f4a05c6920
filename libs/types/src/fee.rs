//! Fee tiers shared by the pool models, the routing graph and the swap-path
//! wire encoding.
//!
//! Tiers are expressed in pips (millionths): 3000 pips = 0.3%. The tier value
//! doubles as the `key` that disambiguates parallel pools between the same
//! token pair.

use num_enum::TryFromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee denominator: tiers are fractions of one million
pub const FEE_DENOMINATOR: u32 = 1_000_000;

/// Deployed fee tiers, in pips
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u32)]
pub enum FeeTier {
    Lowest = 100,
    Low200 = 200,
    Low300 = 300,
    Low400 = 400,
    Low = 500,
    Medium = 3_000,
    High = 10_000,
}

impl FeeTier {
    /// Tier value in pips (millionths)
    pub fn pips(self) -> u32 {
        self as u32
    }

    /// Tick spacing paired with this tier in concentrated-liquidity pools
    pub fn tick_spacing(self) -> i32 {
        match self {
            FeeTier::Lowest => 1,
            FeeTier::Low200 => 4,
            FeeTier::Low300 => 6,
            FeeTier::Low400 => 8,
            FeeTier::Low => 10,
            FeeTier::Medium => 60,
            FeeTier::High => 200,
        }
    }

    /// Tier as a fractional ratio, e.g. `Medium` -> 0.003
    pub fn as_ratio(self) -> Decimal {
        Decimal::from(self.pips()) / Decimal::from(FEE_DENOMINATOR)
    }
}
