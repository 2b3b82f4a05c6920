//! Byte-exact wire vectors for the command codec.
//!
//! Expected bytes mirror the interpreter's reference calldata: one command
//! byte per step and ABI-packed argument strings. Any drift here is a
//! protocol break, not a refactor.

use codec::{Command, Plan, TieredPath};
use ethers_core::types::{Address, U256};
use hex_literal::hex;
use types::FeeTier;

fn dev() -> Address {
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap()
}

fn weth() -> Address {
    "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".parse().unwrap()
}

fn yfi() -> Address {
    "0x0bc529c00C6401aEF6D220BE8C6Ea1667F6Ad93e".parse().unwrap()
}

fn one_ether() -> U256 {
    U256::from(10u64).pow(U256::from(18u64))
}

fn assert_wire(plan: &Plan, expected_commands: &[u8], expected_args: &[Vec<u8>]) {
    assert_eq!(plan.encode_commands(), expected_commands);
    assert_eq!(plan.encode_args(), expected_args);

    let decoded = Plan::decode(expected_commands, expected_args).unwrap();
    assert_eq!(&decoded, plan);
    assert_eq!(decoded.encode_commands(), expected_commands);
    assert_eq!(decoded.encode_args(), expected_args);
}

#[test]
fn wrap_eth_vector() {
    let plan = Plan::new().with(Command::wrap_eth(dev(), one_ether()));
    assert_wire(
        &plan,
        &[0x0B],
        &[hex!(
            "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        )
        .to_vec()],
    );
}

#[test]
fn unwrap_weth_vector() {
    let plan = Plan::new().with(Command::unwrap_weth(dev(), one_ether()));
    assert_wire(
        &plan,
        &[0x0C],
        &[hex!(
            "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        )
        .to_vec()],
    );
}

#[test]
fn approve_erc20_vector() {
    let plan = Plan::new().with(Command::approve_erc20(yfi(), dev()));
    assert_wire(
        &plan,
        &[0x22],
        &[hex!(
            "0000000000000000000000000bc529c00c6401aef6d220be8c6ea1667f6ad93e"
            "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        )
        .to_vec()],
    );
}

#[test]
fn balance_check_erc20_vector() {
    let plan = Plan::new().with(Command::balance_check_erc20(dev(), yfi(), one_ether()));
    assert_wire(
        &plan,
        &[0x0E],
        &[hex!(
            "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            "0000000000000000000000000bc529c00c6401aef6d220be8c6ea1667f6ad93e"
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        )
        .to_vec()],
    );
}

#[test]
fn transfer_vector() {
    let plan = Plan::new().with(Command::transfer(yfi(), dev(), one_ether()));
    assert_wire(
        &plan,
        &[0x05],
        &[hex!(
            "0000000000000000000000000bc529c00c6401aef6d220be8c6ea1667f6ad93e"
            "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        )
        .to_vec()],
    );
}

#[test]
fn sweep_vector() {
    let plan = Plan::new().with(Command::sweep(yfi(), dev(), one_ether()));
    assert_wire(
        &plan,
        &[0x04],
        &[hex!(
            "0000000000000000000000000bc529c00c6401aef6d220be8c6ea1667f6ad93e"
            "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        )
        .to_vec()],
    );
}

#[test]
fn pay_portion_vector() {
    let plan = Plan::new().with(Command::pay_portion(yfi(), dev(), U256::from(100u64)));
    assert_wire(
        &plan,
        &[0x06],
        &[hex!(
            "0000000000000000000000000bc529c00c6401aef6d220be8c6ea1667f6ad93e"
            "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            "0000000000000000000000000000000000000000000000000000000000000064"
        )
        .to_vec()],
    );
}

fn v2_swap_args() -> Vec<u8> {
    hex!(
        "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        "00000000000000000000000000000000000000000000000000000000000004d2"
        "00000000000000000000000000000000000000000000000000000000000000a0"
        "0000000000000000000000000000000000000000000000000000000000000000"
        "0000000000000000000000000000000000000000000000000000000000000002"
        "000000000000000000000000c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        "0000000000000000000000000bc529c00c6401aef6d220be8c6ea1667f6ad93e"
    )
    .to_vec()
}

#[test]
fn v2_swap_exact_in_vector() {
    // two-hop path [WETH, YFI] packed as address[] before ABI packing
    let plan = Plan::new().with(Command::v2_swap_exact_in(
        dev(),
        one_ether(),
        U256::from(1234u64),
        vec![weth(), yfi()],
        false,
    ));
    assert_wire(&plan, &[0x08], &[v2_swap_args()]);
}

#[test]
fn v2_swap_exact_out_vector() {
    let plan = Plan::new().with(Command::v2_swap_exact_out(
        dev(),
        one_ether(),
        U256::from(1234u64),
        vec![weth(), yfi()],
        false,
    ));
    assert_wire(&plan, &[0x09], &[v2_swap_args()]);
}

#[test]
fn v3_packed_path_vector() {
    // path is: address || (uint24 || address)+
    let path = TieredPath::new(weth(), vec![(FeeTier::High, yfi())]);
    assert_eq!(
        path.pack(),
        hex!(
            "c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
            "002710"
            "0bc529c00c6401aef6d220be8c6ea1667f6ad93e"
        )
        .to_vec()
    );
}

#[test]
fn v3_swap_exact_in_vector() {
    let path = TieredPath::new(weth(), vec![(FeeTier::High, yfi())]);
    let plan = Plan::new().with(Command::v3_swap_exact_in(
        dev(),
        one_ether(),
        U256::from(1234u64),
        path.clone(),
        false,
    ));

    // pre-packed bytes and the typed path must encode identically
    let pre_packed = Plan::new().with(Command::v3_swap_exact_in(
        dev(),
        one_ether(),
        U256::from(1234u64),
        path.pack(),
        false,
    ));
    assert_eq!(plan, pre_packed);

    assert_wire(
        &plan,
        &[0x00],
        &[hex!(
            "000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000"
            "00000000000000000000000000000000000000000000000000000000000004d2"
            "00000000000000000000000000000000000000000000000000000000000000a0"
            "0000000000000000000000000000000000000000000000000000000000000000"
            "000000000000000000000000000000000000000000000000000000000000002b"
            "c02aaa39b223fe8d0a0e5c4f27ead9083c756cc20027100bc529c00c6401aef6"
            "d220be8c6ea1667f6ad93e000000000000000000000000000000000000000000"
        )
        .to_vec()],
    );
}

#[test]
fn multi_step_plans_preserve_order() {
    let plan = Plan::new()
        .with(Command::wrap_eth(dev(), one_ether()))
        .with(Command::v2_swap_exact_in(
            dev(),
            one_ether(),
            U256::from(1234u64),
            vec![weth(), yfi()],
            false,
        ))
        .with(Command::sweep(yfi(), dev(), one_ether()));

    assert_eq!(plan.encode_commands(), vec![0x0B, 0x08, 0x04]);

    let decoded = Plan::decode(&plan.encode_commands(), &plan.encode_args()).unwrap();
    assert_eq!(decoded, plan);
}

#[test]
fn sub_plan_nests_the_wire_format() {
    let inner = Plan::new().with(Command::wrap_eth(dev(), one_ether()));
    let outer = Plan::new().with(Command::execute_sub_plan(&inner).with_allow_revert().unwrap());

    assert_eq!(outer.encode_commands(), vec![0x80 | 0x21]);
    let decoded = Plan::decode(&outer.encode_commands(), &outer.encode_args()).unwrap();
    assert_eq!(decoded, outer);
}
