//! Reserved sentinel values of the command interpreter.
//!
//! The interpreter substitutes these at execution time wherever an address or
//! amount argument is expected, so they may appear interchangeably with
//! literal recipients and amounts in encoded commands.

use ethers_core::types::{Address, H160, U256};

/// Flag address for native-asset transfers instead of a token
pub const ETH: Address = H160([0u8; 20]);

/// Substitute the transaction sender wherever a recipient is expected
pub const MSG_SENDER: Address = H160([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01,
]);

/// Substitute the interpreter contract's own address
pub const ADDRESS_THIS: Address = H160([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x02,
]);

/// Amount sentinel: spend the interpreter contract's entire token balance
/// (2^255, little-endian u64 limbs)
pub const CONTRACT_BALANCE: U256 = U256([0, 0, 0, 0x8000_0000_0000_0000]);

/// Amount sentinel: input tokens were already paid to the first pool
pub const ALREADY_PAID: U256 = U256([0, 0, 0, 0]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_balance_is_top_bit() {
        assert_eq!(CONTRACT_BALANCE, U256::from(1u8) << 255);
    }

    #[test]
    fn sentinel_addresses() {
        assert_eq!(MSG_SENDER, Address::from_low_u64_be(1));
        assert_eq!(ADDRESS_THIS, Address::from_low_u64_be(2));
        assert_eq!(ETH, Address::zero());
    }
}
