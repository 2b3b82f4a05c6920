//! Routing, quoting and compilation errors.
//!
//! Solver infeasibility and decomposition invariant violations are kept
//! distinct: the first means the market cannot absorb the order, the second
//! means a solver defect and should never be swallowed.

use ethers_core::types::Address;
use rust_decimal::Decimal;
use thiserror::Error;

use amm::PoolError;
use codec::CodecError;
use types::OrderError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    /// No flow assignment satisfies the order's demand within the capacities
    /// the candidate routes offer
    #[error("no feasible flow for demand {demand} of {token}: routes absorb only {capacity}")]
    Infeasible {
        token: Address,
        demand: Decimal,
        capacity: Decimal,
    },

    /// Flow decomposition did not conserve the total - a solver defect, not
    /// a market condition
    #[error("flow decomposition mismatch: allocated {allocated} of {demand}")]
    InvariantViolation { allocated: Decimal, demand: Decimal },

    /// Order amount exceeds the solver's integer unit range
    #[error("amount {amount} does not fit the solver's integer unit scale")]
    AmountOverflow { amount: Decimal },

    #[error(transparent)]
    Pool(#[from] PoolError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    /// All hops of a route must share one pool family; candidate generation
    /// never produces mixed routes unless misconfigured
    #[error("route mixes pool families at hop {position}")]
    HeterogeneousRoute { position: usize },

    /// A solution with no allocations cannot become a plan
    #[error("solution contains no allocations")]
    EmptySolution,

    /// A per-route amount does not fit the wire integer range
    #[error("amount {amount} does not fit into base units")]
    AmountOverflow { amount: Decimal },

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    /// No candidate route clears the liquidity floor
    #[error("not enough liquidity to quote {base} against {quote}")]
    InsufficientLiquidity { base: Address, quote: Address },

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Facade-level error: any stage of quote -> order -> solve -> compile
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlannerError {
    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}
