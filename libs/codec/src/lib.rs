//! # Weir Protocol Codec - Command Encoding Rules
//!
//! ## Purpose
//!
//! This crate contains the "rules" layer of Weir: the typed opcode registry
//! of the on-chain command interpreter, ABI-style packing and unpacking of
//! every command's arguments, swap-path preprocessing, and the ordered plan
//! container whose wire representation (one command byte per step plus a
//! parallel list of argument byte strings) is what gets submitted on chain.
//!
//! ## Integration Points
//!
//! - **Plan Construction**: typed constructors, one per routing-relevant
//!   opcode; raw construction for pass-through opcodes
//! - **Plan Compilation**: the router crate emits swap commands per solved
//!   route through this registry
//! - **Decoding**: inbound calldata is decoded against the same registry -
//!   unknown opcodes and truncated argument strings fail loudly, never
//!   silently truncate
//!
//! ## Architecture Role
//!
//! ```text
//! types -> [codec] -> router
//!             |
//!      Opcode registry      ABI pack/unpack      Plan wire format
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Routing logic or amount math (belongs in router)
//! - Transaction submission or signing (external collaborators)

pub mod command;
pub mod error;
pub mod path;
pub mod permit;
pub mod plan;

pub use command::{Command, CommandType, ALLOW_REVERT_FLAG, COMMAND_TYPE_MASK};
pub use error::CodecError;
pub use path::{PathInput, TieredPath};
pub use permit::PermitDetails;
pub use plan::Plan;
