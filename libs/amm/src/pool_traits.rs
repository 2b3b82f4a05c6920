//! Unified pool interface consumed by the routing solver.

use ethers_core::types::Address;
use rust_decimal::Decimal;

use types::{FeeTier, TokenRef};

use crate::error::PoolError;

/// Pool family identifier; selects the swap opcode during plan compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolProtocol {
    ConstantProduct,
    Concentrated,
}

/// Read interface shared by every pool variant.
///
/// The four pricing operations are everything the solver needs to build its
/// flow graph; `key` disambiguates parallel pools for the same token pair.
pub trait AmmPool {
    fn address(&self) -> Address;

    fn token0(&self) -> &TokenRef;

    fn token1(&self) -> &TokenRef;

    fn fee(&self) -> FeeTier;

    fn protocol(&self) -> PoolProtocol;

    /// Disambiguates parallel pools between the same pair (fee tier)
    fn key(&self) -> u32 {
        self.fee().pips()
    }

    fn contains(&self, token: Address) -> bool {
        token == self.token0().address || token == self.token1().address
    }

    /// The pair token that is not `token`
    fn other(&self, token: Address) -> Result<&TokenRef, PoolError> {
        if token == self.token0().address {
            Ok(self.token1())
        } else if token == self.token1().address {
            Ok(self.token0())
        } else {
            Err(PoolError::TokenNotInPool {
                token,
                pool: self.address(),
            })
        }
    }

    /// Spot price of `token` in terms of the other pair token
    fn price(&self, token: Address) -> Result<Decimal, PoolError>;

    /// Maximum balance of `token` obtainable from the pool
    fn liquidity(&self, token: Address) -> Result<Decimal, PoolError>;

    /// Maximum amount of `token` tradable while the realized price change
    /// stays below `slippage` (a ratio in (0, 1))
    fn depth(&self, token: Address, slippage: Decimal) -> Result<Decimal, PoolError>;

    /// Realized relative price change from trading `size` of `token`
    fn reflexivity(&self, token: Address, size: Decimal) -> Result<Decimal, PoolError>;
}
