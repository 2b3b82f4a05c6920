//! Constant-product (x*y=k) pair model.
//!
//! Reserves are held as raw integer base units and converted to human units
//! on read, so a snapshot taken from chain state round-trips exactly.

use ethers_core::types::Address;
use rust_decimal::Decimal;

use types::{FeeTier, TokenRef};

use crate::error::PoolError;
use crate::math::{constant_product_depth, constant_product_reflexivity};
use crate::pool_traits::{AmmPool, PoolProtocol};

#[derive(Debug, Clone)]
pub struct ConstantProductPool {
    address: Address,
    token0: TokenRef,
    token1: TokenRef,
    fee: FeeTier,
    reserve0: u128,
    reserve1: u128,
}

impl ConstantProductPool {
    /// Build a pool from a discovered pair address. Tokens are stored in
    /// canonical order (token0 < token1 by address), regardless of argument
    /// order. Reserves start empty; supply them via [`Self::set_reserves`]
    /// or [`Self::with_reserves`].
    pub fn new(address: Address, token_a: TokenRef, token_b: TokenRef, fee: FeeTier) -> Self {
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
            reserve0: 0,
            reserve1: 0,
        }
    }

    pub fn with_reserves(mut self, reserve0: u128, reserve1: u128) -> Self {
        self.set_reserves(reserve0, reserve1);
        self
    }

    /// Replace the liquidity snapshot (raw base units, canonical token order)
    pub fn set_reserves(&mut self, reserve0: u128, reserve1: u128) {
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
    }

    pub fn reserves(&self) -> (u128, u128) {
        (self.reserve0, self.reserve1)
    }

    /// Reserve of `token` in human units
    fn reserve(&self, token: Address) -> Result<Decimal, PoolError> {
        if token == self.token0.address {
            Ok(self.token0.from_base_units(self.reserve0))
        } else if token == self.token1.address {
            Ok(self.token1.from_base_units(self.reserve1))
        } else {
            Err(PoolError::TokenNotInPool {
                token,
                pool: self.address,
            })
        }
    }
}

impl AmmPool for ConstantProductPool {
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
        PoolProtocol::ConstantProduct
    }

    fn price(&self, token: Address) -> Result<Decimal, PoolError> {
        if self.reserve0 == 0 || self.reserve1 == 0 {
            return Err(PoolError::UninitializedPool { pool: self.address });
        }

        let reserve0 = self.token0.from_base_units(self.reserve0);
        let reserve1 = self.token1.from_base_units(self.reserve1);
        if token == self.token0.address {
            Ok(reserve1 / reserve0)
        } else if token == self.token1.address {
            Ok(reserve0 / reserve1)
        } else {
            Err(PoolError::TokenNotInPool {
                token,
                pool: self.address,
            })
        }
    }

    fn liquidity(&self, token: Address) -> Result<Decimal, PoolError> {
        self.reserve(token)
    }

    fn depth(&self, token: Address, slippage: Decimal) -> Result<Decimal, PoolError> {
        constant_product_depth(self.reserve(token)?, self.fee.as_ratio(), slippage)
    }

    fn reflexivity(&self, token: Address, size: Decimal) -> Result<Decimal, PoolError> {
        constant_product_reflexivity(self.reserve(token)?, self.fee.as_ratio(), size)
    }
}
