//! # Weir Router - Flow-Based Swap Solver
//!
//! ## Purpose
//!
//! Turns a swap order plus a set of candidate routes into an executable plan:
//! builds a flow network from per-pool depth and reflexivity, runs an integer
//! min-cost flow to split the order across routes with minimal price impact,
//! decomposes the flow back into ordered per-route allocations, and compiles
//! those allocations into the interpreter's command stream.
//!
//! ## Integration Points
//!
//! - **Input Sources**: candidate routes from a [`RouteSource`] (the
//!   in-memory [`PoolIndex`] or an external discovery service), normalized
//!   orders from `types`
//! - **Output Destinations**: encoded plans handed to an [`ExecutionSink`]
//! - **Determinism**: solving and compiling are pure functions of their
//!   inputs; the same order and snapshots always produce the same plan
//!
//! ## Architecture Role
//!
//! ```text
//! PoolIndex -> candidate Routes -> [solve] -> Solution -> [compile] -> Plan
//!                                     |                        |
//!                              min-cost flow            swap commands
//!                              decomposition            permit prepend
//! ```
//!
//! Solver failures are terminal per call: infeasible demand and decomposition
//! invariant violations surface as distinct errors and are never retried
//! internally, and no partial plan is ever emitted.

pub mod compiler;
pub mod config;
pub mod error;
pub mod execution;
mod flow;
pub mod index;
pub mod planner;
pub mod quote;
pub mod solver;

pub use compiler::{compile, CompileOptions};
pub use config::Deployments;
pub use error::{CompileError, PlannerError, QuoteError, SolverError};
pub use execution::ExecutionSink;
pub use index::{PoolIndex, RouteSource};
pub use planner::SwapPlanner;
pub use quote::weighted_price;
pub use solver::{solve, RouteAllocation, Solution};
