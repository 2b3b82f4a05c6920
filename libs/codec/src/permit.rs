//! Permit command construction from pre-signed data.
//!
//! The core never creates or validates signatures - callers bring permit
//! details their wallet layer already signed, and these builders only lay the
//! arguments out in the permit opcodes' canonical shape.

use ethabi::Token;
use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandType};

/// Single token allowance inside a permit, as the interpreter's permit
/// contract defines it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitDetails {
    pub token: Address,
    /// uint160 allowance amount
    pub amount: U256,
    /// uint48 expiration timestamp
    pub expiration: u64,
    /// uint48 per-(token, spender) nonce
    pub nonce: u64,
}

impl PermitDetails {
    fn into_token(self) -> Token {
        Token::Tuple(vec![
            Token::Address(self.token),
            Token::Uint(self.amount),
            Token::Uint(U256::from(self.expiration)),
            Token::Uint(U256::from(self.nonce)),
        ])
    }
}

impl Command {
    /// Single-allowance permit step
    pub fn permit2_permit(details: PermitDetails, spender: Address, deadline: U256) -> Self {
        Self::from_parts(
            CommandType::Permit2Permit,
            vec![
                details.into_token(),
                Token::Address(spender),
                Token::Uint(deadline),
            ],
        )
    }

    /// Batched multi-allowance permit step
    pub fn permit2_permit_batch(
        details: Vec<PermitDetails>,
        spender: Address,
        deadline: U256,
    ) -> Self {
        Self::from_parts(
            CommandType::Permit2PermitBatch,
            vec![
                Token::Array(
                    details
                        .into_iter()
                        .map(PermitDetails::into_token)
                        .collect(),
                ),
                Token::Address(spender),
                Token::Uint(deadline),
            ],
        )
    }
}
