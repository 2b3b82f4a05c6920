//! Ordered command container and its wire representation.
//!
//! A plan encodes to one command byte per step (order-preserving) plus a
//! parallel list of ABI-packed argument strings. `decode(encode(plan))`
//! round-trips exactly for every valid plan.

use tracing::debug;

use crate::command::Command;
use crate::error::CodecError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    commands: Vec<Command>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command; plans are append-only while being built
    pub fn add(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Chained form of [`Self::add`] for literal plan construction
    pub fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Prepend a command (used to place a pre-built permit step first)
    pub fn prepend(&mut self, command: Command) -> &mut Self {
        self.commands.insert(0, command);
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// One command byte per step, in plan order
    pub fn encode_commands(&self) -> Vec<u8> {
        self.commands
            .iter()
            .map(|command| command.command_byte())
            .collect()
    }

    /// Parallel argument byte strings, one per step, in plan order
    pub fn encode_args(&self) -> Vec<Vec<u8>> {
        self.commands
            .iter()
            .map(|command| command.encode_args())
            .collect()
    }

    /// Rebuild a plan from its wire arrays. The arrays must be parallel; a
    /// length mismatch means the caller mixed up transactions.
    pub fn decode(command_bytes: &[u8], args: &[Vec<u8>]) -> Result<Self, CodecError> {
        if command_bytes.len() != args.len() {
            return Err(CodecError::LengthMismatch {
                commands: command_bytes.len(),
                args: args.len(),
            });
        }

        debug!(steps = command_bytes.len(), "decoding plan");
        let commands = command_bytes
            .iter()
            .zip(args.iter())
            .map(|(byte, data)| Command::decode(*byte, data))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { commands })
    }
}
