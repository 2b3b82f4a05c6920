//! Protocol-level codec errors.
//!
//! Every variant is terminal for the operation that raised it: malformed wire
//! data is rejected, never patched up or silently truncated.

use thiserror::Error;

use crate::command::CommandType;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// The opcode is not in the interpreter's dispatch table
    #[error("unknown opcode {opcode:#04x}")]
    UnknownOpcode { opcode: u8 },

    /// Argument byte string is shorter than the opcode's definition requires
    #[error("truncated arguments for {kind:?}: got {got} bytes, need at least {need}")]
    TruncatedArguments {
        kind: CommandType,
        got: usize,
        need: usize,
    },

    /// Argument count does not match the opcode's definition
    #[error("{kind:?} takes {expected} arguments, got {got}")]
    ArityMismatch {
        kind: CommandType,
        expected: usize,
        got: usize,
    },

    /// An argument's ABI type does not match the opcode's definition
    #[error("argument {index} of {kind:?} does not match ABI type {expected}")]
    TypeMismatch {
        kind: CommandType,
        index: usize,
        expected: String,
    },

    /// Allow-revert flag set on an opcode the interpreter cannot revert
    #[error("{kind:?} is not revertible but the allow-revert flag is set")]
    NotRevertible { kind: CommandType },

    /// Packed swap path does not lay out as address (fee address)*
    #[error("malformed swap path: {reason} ({len} bytes)")]
    MalformedPath { reason: &'static str, len: usize },

    /// Plan wire arrays must be parallel: one argument string per command byte
    #[error("plan wire arrays disagree: {commands} command bytes vs {args} argument strings")]
    LengthMismatch { commands: usize, args: usize },
}
