//! Property: every plan built from the typed constructors survives the wire
//! round-trip bit-exactly.

use codec::{Command, Plan, TieredPath};
use ethers_core::types::{Address, U256};
use proptest::prelude::*;
use types::FeeTier;

fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from)
}

fn amount() -> impl Strategy<Value = U256> {
    any::<u128>().prop_map(U256::from)
}

fn fee_tier() -> impl Strategy<Value = FeeTier> {
    prop_oneof![
        Just(FeeTier::Lowest),
        Just(FeeTier::Low),
        Just(FeeTier::Medium),
        Just(FeeTier::High),
    ]
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (address(), amount()).prop_map(|(recipient, amount)| Command::wrap_eth(recipient, amount)),
        (address(), amount())
            .prop_map(|(recipient, amount)| Command::unwrap_weth(recipient, amount)),
        (address(), address(), amount())
            .prop_map(|(token, recipient, amount)| Command::sweep(token, recipient, amount)),
        (address(), address(), amount())
            .prop_map(|(token, recipient, amount)| Command::transfer(token, recipient, amount)),
        (address(), address(), amount()).prop_map(|(owner, token, min)| {
            Command::balance_check_erc20(owner, token, min)
        }),
        (
            address(),
            amount(),
            amount(),
            prop::collection::vec(address(), 2..5),
            any::<bool>(),
        )
            .prop_map(|(recipient, amount_in, amount_out_min, path, payer)| {
                Command::v2_swap_exact_in(recipient, amount_in, amount_out_min, path, payer)
            }),
        (
            address(),
            amount(),
            amount(),
            address(),
            prop::collection::vec((fee_tier(), address()), 1..4),
            any::<bool>(),
        )
            .prop_map(|(recipient, amount_out, amount_in_max, first, hops, payer)| {
                Command::v3_swap_exact_out(
                    recipient,
                    amount_out,
                    amount_in_max,
                    TieredPath::new(first, hops),
                    payer,
                )
            }),
    ]
}

proptest! {
    #[test]
    fn plan_wire_round_trip(commands in prop::collection::vec(command(), 0..8)) {
        let mut plan = Plan::new();
        for command in commands {
            plan.add(command);
        }

        let decoded = Plan::decode(&plan.encode_commands(), &plan.encode_args()).unwrap();
        prop_assert_eq!(&decoded, &plan);
        prop_assert_eq!(decoded.encode_commands(), plan.encode_commands());
        prop_assert_eq!(decoded.encode_args(), plan.encode_args());
    }
}
