//! Execution collaborator interface.
//!
//! The core stops at an encoded plan; whatever owns transport and signing
//! implements this sink. The interface is synchronous and blocking - any
//! timeout or cancellation wraps the whole solve-then-compile call outside.

use ethers_core::types::H256;

use codec::Plan;

pub trait ExecutionSink {
    /// Submit an encoded plan, optionally bounded by a unix deadline.
    /// Returns the transaction id on acceptance.
    fn submit(&mut self, plan: &Plan, deadline: Option<u64>) -> anyhow::Result<H256>;
}
