//! Pool and route level errors.
//!
//! Liquidity errors are routing-local: the solver reacts to them by skipping
//! the affected route, never by retrying. Everything else rejects the call.

use ethers_core::types::Address;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PoolError {
    /// One or both reserves are zero; the pool cannot quote a price
    #[error("pool {pool} is uninitialized (zero reserves)")]
    UninitializedPool { pool: Address },

    /// The queried token is not one of the pool's pair
    #[error("token {token} is not in pool {pool}")]
    TokenNotInPool { token: Address, pool: Address },

    /// Trade size must lie strictly inside (0, liquidity)
    #[error("size {size} outside tradable range (0, {liquidity})")]
    SizeOutOfBounds { size: Decimal, liquidity: Decimal },

    /// Slippage ratio must lie strictly between 0 and 1
    #[error("slippage ratio must be in (0, 1), got {value}")]
    SlippageOutOfRange { value: Decimal },

    /// Snapshot values exceed the representable price range
    #[error("pool {pool} snapshot exceeds representable price range")]
    PriceOverflow { pool: Address },

    /// Consecutive route pools must share exactly one token
    #[error("route is not contiguous at hop {position}")]
    DiscontiguousRoute { position: usize },

    /// Routes must contain at least one pool
    #[error("route contains no pools")]
    EmptyRoute,
}
