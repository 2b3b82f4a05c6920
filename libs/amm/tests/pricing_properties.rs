//! Property coverage for the pricing primitives.

use ethers_core::types::Address;
use proptest::prelude::*;
use rust_decimal::Decimal;

use amm::{AmmPool, ConstantProductPool};
use types::{FeeTier, TokenRef};

const WEI: u128 = 1_000_000_000_000_000_000;

fn pool(reserve0: u128, reserve1: u128) -> ConstantProductPool {
    ConstantProductPool::new(
        Address::from_low_u64_be(0xF0),
        TokenRef::new(Address::from_low_u64_be(0xAA), 18),
        TokenRef::new(Address::from_low_u64_be(0xBB), 18),
        FeeTier::Medium,
    )
    .with_reserves(reserve0, reserve1)
}

fn ratio() -> impl Strategy<Value = Decimal> {
    // strictly inside (0, 1), quantized to 4 places
    (1u32..9_999).prop_map(|value| Decimal::new(value as i64, 4))
}

proptest! {
    #[test]
    fn depth_is_strictly_monotonic_in_slippage(
        reserve in 1u128..1_000_000,
        s1 in ratio(),
        s2 in ratio(),
    ) {
        prop_assume!(s1 < s2);
        let pool = pool(reserve * WEI, reserve * WEI);
        let token = pool.token0().address;

        let shallow = pool.depth(token, s1).unwrap();
        let deep = pool.depth(token, s2).unwrap();
        prop_assert!(shallow < deep);
    }

    #[test]
    fn reflexivity_stays_inside_the_unit_interval(
        reserve in 2u128..1_000_000,
        numerator in 1u64..1_000,
    ) {
        let pool = pool(reserve * WEI, reserve * WEI);
        let token = pool.token0().address;
        // size strictly inside (0, liquidity)
        let size = Decimal::from(reserve) * Decimal::new(numerator as i64, 3)
            / Decimal::new(1_001, 3);
        prop_assume!(size > Decimal::ZERO);

        let reflexivity = pool.reflexivity(token, size).unwrap();
        prop_assert!(reflexivity > Decimal::ZERO);
        prop_assert!(reflexivity < Decimal::ONE);
    }
}
