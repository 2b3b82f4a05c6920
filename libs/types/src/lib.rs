//! # Weir Types - Shared Value Objects
//!
//! ## Purpose
//!
//! Pure data structures shared by every other Weir crate: token handles with
//! decimal-precision quantization, protocol fee tiers, normalized swap orders
//! and the interpreter's reserved sentinel addresses. Everything in this crate
//! is an immutable value object - no I/O, no chain access, no shared state.
//!
//! ## Architecture Role
//!
//! ```text
//! types -> amm    (pools price tokens, routes carry fee tiers)
//!       -> codec  (commands reference sentinels and fee tiers)
//!       -> router (orders drive the solver and the plan compiler)
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Pool state or pricing math (belongs in amm)
//! - Wire encoding rules (belongs in codec)
//! - Routing or compilation logic (belongs in router)

pub mod constants;
pub mod error;
pub mod fee;
pub mod order;
pub mod token;

pub use constants::{ADDRESS_THIS, ALREADY_PAID, CONTRACT_BALANCE, ETH, MSG_SENDER};
pub use error::OrderError;
pub use fee::{FeeTier, FEE_DENOMINATOR};
pub use order::{create_order, ExactInOrder, ExactOutOrder, Order, OrderRequest};
pub use token::TokenRef;

/// Common numeric type for fractional amounts, prices and ratios
pub use rust_decimal::Decimal;
