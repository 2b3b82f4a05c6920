//! Routes: ordered pool sequences connecting two tokens.
//!
//! A route is valid when consecutive pools share exactly one token, forming a
//! contiguous path. Routes borrow nothing - they carry snapshot clones of the
//! pools taken at discovery time, so one solve always reads one snapshot.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use ethers_core::types::Address;
use rust_decimal::Decimal;
use tracing::debug;

use types::TokenRef;

use crate::concentrated::ConcentratedPool;
use crate::constant_product::ConstantProductPool;
use crate::error::PoolError;
use crate::pool_traits::{AmmPool, PoolProtocol};

/// Either supported pool variant, usable wherever the solver needs a
/// graph-edge key: identity, equality and ordering are all by pool address.
#[derive(Debug, Clone)]
pub enum Pool {
    ConstantProduct(ConstantProductPool),
    Concentrated(ConcentratedPool),
}

impl Pool {
    fn inner(&self) -> &dyn AmmPool {
        match self {
            Pool::ConstantProduct(pool) => pool,
            Pool::Concentrated(pool) => pool,
        }
    }
}

impl AmmPool for Pool {
    fn address(&self) -> Address {
        self.inner().address()
    }

    fn token0(&self) -> &TokenRef {
        self.inner().token0()
    }

    fn token1(&self) -> &TokenRef {
        self.inner().token1()
    }

    fn fee(&self) -> types::FeeTier {
        self.inner().fee()
    }

    fn protocol(&self) -> PoolProtocol {
        self.inner().protocol()
    }

    fn price(&self, token: Address) -> Result<Decimal, PoolError> {
        self.inner().price(token)
    }

    fn liquidity(&self, token: Address) -> Result<Decimal, PoolError> {
        self.inner().liquidity(token)
    }

    fn depth(&self, token: Address, slippage: Decimal) -> Result<Decimal, PoolError> {
        self.inner().depth(token, slippage)
    }

    fn reflexivity(&self, token: Address, size: Decimal) -> Result<Decimal, PoolError> {
        self.inner().reflexivity(token, size)
    }
}

impl PartialEq for Pool {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Pool {}

impl Hash for Pool {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl PartialOrd for Pool {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pool {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address().cmp(&other.address())
    }
}

/// Ordered sequence of pools forming one swap path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pools: Vec<Pool>,
}

impl Route {
    /// Validate contiguity: every consecutive pool pair must share exactly
    /// one token.
    pub fn new(pools: Vec<Pool>) -> Result<Self, PoolError> {
        if pools.is_empty() {
            return Err(PoolError::EmptyRoute);
        }

        for (position, window) in pools.windows(2).enumerate() {
            let shared = [window[0].token0().address, window[0].token1().address]
                .iter()
                .filter(|token| window[1].contains(**token))
                .count();
            if shared != 1 {
                return Err(PoolError::DiscontiguousRoute { position });
            }
        }

        Ok(Self { pools })
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// The same path walked end-to-start; used to solve exact-output orders
    pub fn reversed(&self) -> Route {
        let mut pools = self.pools.clone();
        pools.reverse();
        Route { pools }
    }

    /// Pool family when all hops agree, `None` for mixed routes
    pub fn protocol(&self) -> Option<PoolProtocol> {
        let first = self.pools.first()?.protocol();
        self.pools
            .iter()
            .all(|pool| pool.protocol() == first)
            .then_some(first)
    }

    /// Hop token sequence starting from `start` (`pools.len() + 1` entries)
    pub fn tokens(&self, start: Address) -> Result<Vec<Address>, PoolError> {
        let mut tokens = Vec::with_capacity(self.pools.len() + 1);
        let mut token = start;
        tokens.push(token);
        for pool in &self.pools {
            token = pool.other(token)?.address;
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Token the route delivers when entered with `start`
    pub fn end_token(&self, start: Address) -> Result<Address, PoolError> {
        // Last entry always exists: tokens() yields pools.len() + 1 entries
        self.tokens(start).map(|tokens| match tokens.last() {
            Some(token) => *token,
            None => start,
        })
    }

    /// Spot price along the whole route, in end-token per start-token
    pub fn spot_price(&self, start: Address) -> Result<Decimal, PoolError> {
        let mut token = start;
        let mut price = Decimal::ONE;
        for pool in &self.pools {
            price *= pool.price(token)?;
            token = pool.other(token)?.address;
        }
        Ok(price)
    }

    /// Start-token-denominated liquidity bound: the minimum over hops of the
    /// hop's available liquidity converted back through the running price.
    /// Routes with an unpriceable hop report zero instead of failing, so
    /// quoting can skip them.
    pub fn liquidity_bound(&self, start: Address) -> Result<Decimal, PoolError> {
        let mut token = start;
        let mut price = Decimal::ONE;
        let mut bound = Decimal::MAX;
        for pool in &self.pools {
            bound = bound.min(pool.liquidity(token)? / price);
            match pool.price(token) {
                Ok(hop_price) => price *= hop_price,
                Err(PoolError::UninitializedPool { .. }) => {
                    debug!(pool = %pool.address(), "unpriceable hop, route has no usable liquidity");
                    return Ok(Decimal::ZERO);
                }
                Err(err) => return Err(err),
            }
            token = pool.other(token)?.address;
        }
        Ok(bound)
    }

    /// Cumulative fee ratio across all hops: `1 - prod(1 - fee)`
    pub fn cumulative_fee(&self) -> Decimal {
        let kept = self
            .pools
            .iter()
            .fold(Decimal::ONE, |kept, pool| {
                kept * (Decimal::ONE - pool.fee().as_ratio())
            });
        Decimal::ONE - kept
    }
}
