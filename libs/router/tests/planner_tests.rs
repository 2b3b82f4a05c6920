//! Facade flow: index -> price -> order -> solution -> plan.

use ethers_core::types::Address;
use rust_decimal_macros::dec;

use amm::{ConstantProductPool, Pool};
use codec::Plan;
use router::{CompileOptions, Deployments, PoolIndex, RouteSource, SwapPlanner};
use types::{FeeTier, Order, OrderRequest, TokenRef};

const WEI: u128 = 1_000_000_000_000_000_000;

fn token(tag: u64) -> TokenRef {
    TokenRef::new(Address::from_low_u64_be(tag), 18)
}

fn pair(address: u64, a: TokenRef, b: TokenRef, reserve_a: u128, reserve_b: u128) -> Pool {
    let (reserve0, reserve1) = if a.address < b.address {
        (reserve_a, reserve_b)
    } else {
        (reserve_b, reserve_a)
    };
    Pool::ConstantProduct(
        ConstantProductPool::new(Address::from_low_u64_be(address), a, b, FeeTier::Medium)
            .with_reserves(reserve0, reserve1),
    )
}

fn planner() -> (SwapPlanner, TokenRef, TokenRef) {
    let (a, b, c) = (token(1), token(2), token(3));
    let mut index = PoolIndex::new();
    index.insert(pair(0x10, a, b, 100 * WEI, 200 * WEI));
    index.insert(pair(0x11, a, c, 100 * WEI, 100 * WEI));
    index.insert(pair(0x12, c, b, 100 * WEI, 200 * WEI));
    (SwapPlanner::new(index, Deployments::mainnet()), a, b)
}

#[test]
fn market_price_is_liquidity_weighted() {
    let (planner, a, b) = planner();
    // direct route: price 2 over 100 liquidity; 2-hop route: price 2 as well
    let price = planner.price(a.address, b.address).unwrap();
    assert_eq!(price, dec!(2));
}

#[test]
fn order_resolution_uses_the_market_price() {
    let (planner, a, b) = planner();
    let order = planner
        .create_order(
            a,
            b,
            OrderRequest {
                amount_in: Some(dec!(1)),
                slippage: Some(dec!(0.05)),
                ..Default::default()
            },
        )
        .unwrap();

    match order {
        Order::ExactIn(order) => assert_eq!(order.min_amount_out, dec!(1.9)),
        Order::ExactOut(_) => panic!("expected exact-in"),
    }
}

#[test]
fn end_to_end_plan_round_trips() {
    let (planner, a, b) = planner();
    let order = planner
        .create_order(
            a,
            b,
            OrderRequest {
                amount_in: Some(dec!(1)),
                slippage: Some(dec!(0.05)),
                ..Default::default()
            },
        )
        .unwrap();

    let plan = planner.plan(&order, CompileOptions::default()).unwrap();
    assert!(!plan.is_empty());

    let decoded = Plan::decode(&plan.encode_commands(), &plan.encode_args()).unwrap();
    assert_eq!(decoded, plan);
}

#[test]
fn route_source_respects_depth() {
    let (planner, a, b) = planner();
    assert_eq!(planner.index().find_routes(a.address, b.address, 1).len(), 1);
    assert_eq!(planner.index().find_routes(a.address, b.address, 2).len(), 2);
}
