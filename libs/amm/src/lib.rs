//! # Weir AMM Library - Pool Pricing Engine
//!
//! ## Purpose
//!
//! Pricing and liquidity primitives for the two supported pool families:
//! constant-product pairs and concentrated-liquidity pools. Every pool exposes
//! the same four read operations the routing solver is built on - spot price,
//! available liquidity, depth at a bounded price impact, and reflexivity (the
//! realized price change of a trade of a given size) - plus the route type
//! that chains pools into a swap path.
//!
//! ## Integration Points
//!
//! - **Input Sources**: pool snapshots discovered by an external index
//!   (reserves, whole-pool balances, sqrt prices)
//! - **Output Destinations**: the routing solver (graph capacities/weights)
//!   and the plan compiler (path layout, cumulative fees)
//! - **Precision**: all fractional math in `Decimal`; snapshots stay in raw
//!   integer base units until read
//!
//! ## Architecture Role
//!
//! ```text
//! types -> [amm pricing] -> router
//!             |
//!       Pool snapshots        spot price / liquidity / depth / reflexivity
//! ```
//!
//! All computation here is synchronous and side-effect-free; temporal
//! consistency of the snapshots consumed by a single solve is the supplier's
//! responsibility.

pub mod concentrated;
pub mod constant_product;
pub mod error;
pub mod math;
pub mod pool_traits;
pub mod route;

pub use concentrated::{price_to_tick, tick_to_price, ConcentratedPool};
pub use constant_product::ConstantProductPool;
pub use error::PoolError;
pub use pool_traits::{AmmPool, PoolProtocol};
pub use route::{Pool, Route};
