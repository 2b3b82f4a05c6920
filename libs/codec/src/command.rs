//! Typed command registry for the on-chain interpreter.
//!
//! One byte identifies each command: the low six bits are the opcode, the top
//! bit is an independent allow-revert flag. Every opcode carries a canonical,
//! ordered list of ABI argument types; encoding packs the arguments against
//! that list, decoding unpacks and validates against it. Opcodes outside the
//! routing subset (the NFT marketplace family) are carried for uniform
//! pass-through encode/decode only.

use ethabi::{ParamType, Token};
use ethers_core::types::{Address, U256};
use num_enum::TryFromPrimitive;

use crate::error::CodecError;
use crate::path::PathInput;
use crate::plan::Plan;

/// Top bit of the command byte: the interpreter tolerates this step failing
pub const ALLOW_REVERT_FLAG: u8 = 0x80;

/// Low six bits of the command byte select the opcode
pub const COMMAND_TYPE_MASK: u8 = 0x3F;

/// Interpreter dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum CommandType {
    V3SwapExactIn = 0x00,
    V3SwapExactOut = 0x01,
    Permit2TransferFrom = 0x02,
    Permit2PermitBatch = 0x03,
    Sweep = 0x04,
    Transfer = 0x05,
    PayPortion = 0x06,
    V2SwapExactIn = 0x08,
    V2SwapExactOut = 0x09,
    Permit2Permit = 0x0A,
    WrapEth = 0x0B,
    UnwrapWeth = 0x0C,
    Permit2TransferFromBatch = 0x0D,
    BalanceCheckErc20 = 0x0E,
    SeaportV15 = 0x10,
    LooksRareV2 = 0x11,
    Nftx = 0x12,
    Cryptopunks = 0x13,
    OwnerCheck721 = 0x15,
    OwnerCheck1155 = 0x16,
    SweepErc721 = 0x17,
    X2y2Erc721 = 0x18,
    Sudoswap = 0x19,
    Nft20 = 0x1A,
    X2y2Erc1155 = 0x1B,
    Foundation = 0x1C,
    SweepErc1155 = 0x1D,
    ElementMarket = 0x1E,
    SeaportV14 = 0x20,
    ExecuteSubPlan = 0x21,
    ApproveErc20 = 0x22,
}

/// Permit details tuple layout shared by the single and batch permit opcodes
fn permit_details_param() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::Address,   // token
        ParamType::Uint(160), // amount
        ParamType::Uint(48),  // expiration
        ParamType::Uint(48),  // nonce
    ])
}

impl CommandType {
    /// Canonical ordered argument types for this opcode
    pub fn definition(self) -> Vec<ParamType> {
        use ParamType::{Address, Array, Bool, Bytes, Uint};

        match self {
            CommandType::V3SwapExactIn => vec![
                Address,   // recipient
                Uint(256), // amountIn
                Uint(256), // amountOutMin
                Bytes,     // encodedPath
                Bool,      // payerIsUser
            ],
            CommandType::V3SwapExactOut => vec![
                Address,   // recipient
                Uint(256), // amountOut
                Uint(256), // amountInMax
                Bytes,     // encodedPath
                Bool,      // payerIsUser
            ],
            CommandType::Permit2TransferFrom => vec![Address, Address, Uint(160)],
            CommandType::Permit2PermitBatch => vec![
                Array(Box::new(permit_details_param())),
                Address,   // spender
                Uint(256), // deadline
            ],
            CommandType::Sweep => vec![Address, Address, Uint(256)],
            CommandType::Transfer => vec![Address, Address, Uint(256)],
            CommandType::PayPortion => vec![Address, Address, Uint(256)],
            CommandType::V2SwapExactIn => vec![
                Address,                       // recipient
                Uint(256),                     // amountIn
                Uint(256),                     // amountOutMin
                Array(Box::new(Address)),      // path
                Bool,                          // payerIsUser
            ],
            CommandType::V2SwapExactOut => vec![
                Address,                       // recipient
                Uint(256),                     // amountOut
                Uint(256),                     // amountInMax
                Array(Box::new(Address)),      // path
                Bool,                          // payerIsUser
            ],
            CommandType::Permit2Permit => vec![permit_details_param(), Address, Uint(256)],
            CommandType::WrapEth => vec![Address, Uint(256)],
            CommandType::UnwrapWeth => vec![Address, Uint(256)],
            CommandType::Permit2TransferFromBatch => vec![Array(Box::new(ParamType::Tuple(vec![
                Address,   // sender
                Address,   // recipient
                Uint(160), // amount
                Address,   // token
            ])))],
            CommandType::BalanceCheckErc20 => vec![Address, Address, Uint(256)],
            CommandType::SeaportV15 => vec![Uint(256), Bytes],
            CommandType::LooksRareV2 => vec![Uint(256), Bytes],
            CommandType::Nftx => vec![Uint(256), Bytes],
            CommandType::Cryptopunks => vec![Uint(256), Address, Uint(256)],
            CommandType::OwnerCheck721 => vec![Address, Address, Uint(256)],
            CommandType::OwnerCheck1155 => vec![Address, Address, Uint(256), Uint(256)],
            CommandType::SweepErc721 => vec![Address, Address, Uint(256)],
            CommandType::X2y2Erc721 => vec![Uint(256), Bytes, Address, Address, Uint(256)],
            CommandType::Sudoswap => vec![Uint(256), Bytes],
            CommandType::Nft20 => vec![Uint(256), Bytes],
            CommandType::X2y2Erc1155 => {
                vec![Uint(256), Bytes, Address, Address, Uint(256), Uint(256)]
            }
            CommandType::Foundation => vec![Uint(256), Bytes, Address, Address, Uint(256)],
            CommandType::SweepErc1155 => vec![Address, Address, Uint(256), Uint(256)],
            CommandType::ElementMarket => vec![Uint(256), Bytes],
            CommandType::SeaportV14 => vec![Uint(256), Bytes],
            CommandType::ExecuteSubPlan => vec![Bytes, Array(Box::new(Bytes))],
            CommandType::ApproveErc20 => vec![Address, Address],
        }
    }

    /// Only the marketplace pass-through family (and nested sub-plans) may
    /// carry the allow-revert flag; the interpreter aborts on any other
    /// opcode failing.
    pub fn is_revertible(self) -> bool {
        matches!(
            self,
            CommandType::SeaportV15
                | CommandType::SeaportV14
                | CommandType::LooksRareV2
                | CommandType::Nftx
                | CommandType::Cryptopunks
                | CommandType::OwnerCheck721
                | CommandType::OwnerCheck1155
                | CommandType::X2y2Erc721
                | CommandType::X2y2Erc1155
                | CommandType::Sudoswap
                | CommandType::Nft20
                | CommandType::Foundation
                | CommandType::ElementMarket
                | CommandType::ExecuteSubPlan
        )
    }
}

/// One interpreter instruction: opcode, typed arguments, revert tolerance.
/// Immutable once constructed; construction and decoding both validate the
/// arguments against the opcode's definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    kind: CommandType,
    args: Vec<Token>,
    allow_revert: bool,
}

impl Command {
    /// Construct from raw parts, validating arity, ABI types and the revert
    /// flag. This is the entry point for pass-through opcodes; the typed
    /// constructors below are preferred for the routing subset.
    pub fn new(kind: CommandType, args: Vec<Token>, allow_revert: bool) -> Result<Self, CodecError> {
        let definition = kind.definition();
        if args.len() != definition.len() {
            return Err(CodecError::ArityMismatch {
                kind,
                expected: definition.len(),
                got: args.len(),
            });
        }
        for (index, (token, param)) in args.iter().zip(definition.iter()).enumerate() {
            if !token.type_check(param) {
                return Err(CodecError::TypeMismatch {
                    kind,
                    index,
                    expected: param.to_string(),
                });
            }
        }
        if allow_revert && !kind.is_revertible() {
            return Err(CodecError::NotRevertible { kind });
        }
        Ok(Self {
            kind,
            args,
            allow_revert,
        })
    }

    /// Internal constructor for arguments that are correct by construction
    pub(crate) fn from_parts(kind: CommandType, args: Vec<Token>) -> Self {
        debug_assert_eq!(args.len(), kind.definition().len());
        Self {
            kind,
            args,
            allow_revert: false,
        }
    }

    pub fn kind(&self) -> CommandType {
        self.kind
    }

    pub fn args(&self) -> &[Token] {
        &self.args
    }

    pub fn allow_revert(&self) -> bool {
        self.allow_revert
    }

    /// Tolerate this step reverting; only valid for revertible opcodes
    pub fn with_allow_revert(mut self) -> Result<Self, CodecError> {
        if !self.kind.is_revertible() {
            return Err(CodecError::NotRevertible { kind: self.kind });
        }
        self.allow_revert = true;
        Ok(self)
    }

    /// The wire byte: `(allow_revert << 7) | opcode`
    pub fn command_byte(&self) -> u8 {
        let flag = if self.allow_revert {
            ALLOW_REVERT_FLAG
        } else {
            0
        };
        flag | self.kind as u8
    }

    /// ABI-pack the arguments into the command's byte string
    pub fn encode_args(&self) -> Vec<u8> {
        ethabi::encode(&self.args)
    }

    /// Unpack one command from its wire byte and argument byte string
    pub fn decode(command_byte: u8, data: &[u8]) -> Result<Self, CodecError> {
        let opcode = command_byte & COMMAND_TYPE_MASK;
        let kind = CommandType::try_from(opcode)
            .map_err(|_| CodecError::UnknownOpcode { opcode })?;
        let allow_revert = command_byte & ALLOW_REVERT_FLAG != 0;
        if allow_revert && !kind.is_revertible() {
            return Err(CodecError::NotRevertible { kind });
        }

        let definition = kind.definition();
        let args = ethabi::decode(&definition, data).map_err(|_| CodecError::TruncatedArguments {
            kind,
            got: data.len(),
            need: 32 * definition.len(),
        })?;

        Ok(Self {
            kind,
            args,
            allow_revert,
        })
    }

    // --- typed constructors for the routing-relevant subset ---

    pub fn wrap_eth(recipient: Address, amount_min: U256) -> Self {
        Self::from_parts(
            CommandType::WrapEth,
            vec![Token::Address(recipient), Token::Uint(amount_min)],
        )
    }

    pub fn unwrap_weth(recipient: Address, amount_min: U256) -> Self {
        Self::from_parts(
            CommandType::UnwrapWeth,
            vec![Token::Address(recipient), Token::Uint(amount_min)],
        )
    }

    pub fn sweep(token: Address, recipient: Address, amount_min: U256) -> Self {
        Self::from_parts(
            CommandType::Sweep,
            vec![
                Token::Address(token),
                Token::Address(recipient),
                Token::Uint(amount_min),
            ],
        )
    }

    pub fn transfer(token: Address, recipient: Address, amount: U256) -> Self {
        Self::from_parts(
            CommandType::Transfer,
            vec![
                Token::Address(token),
                Token::Address(recipient),
                Token::Uint(amount),
            ],
        )
    }

    pub fn pay_portion(token: Address, recipient: Address, bips: U256) -> Self {
        Self::from_parts(
            CommandType::PayPortion,
            vec![
                Token::Address(token),
                Token::Address(recipient),
                Token::Uint(bips),
            ],
        )
    }

    pub fn balance_check_erc20(owner: Address, token: Address, min_balance: U256) -> Self {
        Self::from_parts(
            CommandType::BalanceCheckErc20,
            vec![
                Token::Address(owner),
                Token::Address(token),
                Token::Uint(min_balance),
            ],
        )
    }

    pub fn approve_erc20(token: Address, spender: Address) -> Self {
        Self::from_parts(
            CommandType::ApproveErc20,
            vec![Token::Address(token), Token::Address(spender)],
        )
    }

    pub fn v2_swap_exact_in(
        recipient: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: Vec<Address>,
        payer_is_user: bool,
    ) -> Self {
        Self::from_parts(
            CommandType::V2SwapExactIn,
            vec![
                Token::Address(recipient),
                Token::Uint(amount_in),
                Token::Uint(amount_out_min),
                Token::Array(path.into_iter().map(Token::Address).collect()),
                Token::Bool(payer_is_user),
            ],
        )
    }

    pub fn v2_swap_exact_out(
        recipient: Address,
        amount_out: U256,
        amount_in_max: U256,
        path: Vec<Address>,
        payer_is_user: bool,
    ) -> Self {
        Self::from_parts(
            CommandType::V2SwapExactOut,
            vec![
                Token::Address(recipient),
                Token::Uint(amount_out),
                Token::Uint(amount_in_max),
                Token::Array(path.into_iter().map(Token::Address).collect()),
                Token::Bool(payer_is_user),
            ],
        )
    }

    /// Path accepts either pre-packed bytes or a typed hop sequence; the hop
    /// sequence is packed into the canonical path encoding before ABI packing
    pub fn v3_swap_exact_in(
        recipient: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: impl Into<PathInput>,
        payer_is_user: bool,
    ) -> Self {
        Self::from_parts(
            CommandType::V3SwapExactIn,
            vec![
                Token::Address(recipient),
                Token::Uint(amount_in),
                Token::Uint(amount_out_min),
                Token::Bytes(path.into().into_packed()),
                Token::Bool(payer_is_user),
            ],
        )
    }

    pub fn v3_swap_exact_out(
        recipient: Address,
        amount_out: U256,
        amount_in_max: U256,
        path: impl Into<PathInput>,
        payer_is_user: bool,
    ) -> Self {
        Self::from_parts(
            CommandType::V3SwapExactOut,
            vec![
                Token::Address(recipient),
                Token::Uint(amount_out),
                Token::Uint(amount_in_max),
                Token::Bytes(path.into().into_packed()),
                Token::Bool(payer_is_user),
            ],
        )
    }

    /// Nest a whole plan as a single revert-scoped step
    pub fn execute_sub_plan(plan: &Plan) -> Self {
        Self::from_parts(
            CommandType::ExecuteSubPlan,
            vec![
                Token::Bytes(plan.encode_commands()),
                Token::Array(plan.encode_args().into_iter().map(Token::Bytes).collect()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_byte_layout() {
        let command = Command::wrap_eth(Address::zero(), U256::one());
        assert_eq!(command.command_byte(), 0x0B);

        let sub_plan = Command::execute_sub_plan(&Plan::new())
            .with_allow_revert()
            .unwrap();
        assert_eq!(sub_plan.command_byte(), 0x80 | 0x21);
    }

    #[test]
    fn revert_flag_rejected_on_non_revertible_opcode() {
        let result = Command::wrap_eth(Address::zero(), U256::one()).with_allow_revert();
        assert_eq!(
            result,
            Err(CodecError::NotRevertible {
                kind: CommandType::WrapEth
            })
        );

        assert_eq!(
            Command::decode(0x80 | 0x0B, &[0u8; 64]),
            Err(CodecError::NotRevertible {
                kind: CommandType::WrapEth
            })
        );
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        assert_eq!(
            Command::decode(0x3F, &[]),
            Err(CodecError::UnknownOpcode { opcode: 0x3F })
        );
        // 0x07 sits in a hole of the dispatch table
        assert_eq!(
            Command::decode(0x07, &[]),
            Err(CodecError::UnknownOpcode { opcode: 0x07 })
        );
    }

    #[test]
    fn truncated_arguments_are_rejected() {
        let command = Command::wrap_eth(Address::zero(), U256::one());
        let encoded = command.encode_args();
        assert_eq!(
            Command::decode(0x0B, &encoded[..encoded.len() - 1]),
            Err(CodecError::TruncatedArguments {
                kind: CommandType::WrapEth,
                got: 63,
                need: 64,
            })
        );
    }

    #[test]
    fn raw_construction_validates_arity_and_types() {
        assert_eq!(
            Command::new(CommandType::WrapEth, vec![Token::Uint(U256::one())], false),
            Err(CodecError::ArityMismatch {
                kind: CommandType::WrapEth,
                expected: 2,
                got: 1,
            })
        );

        assert!(matches!(
            Command::new(
                CommandType::WrapEth,
                vec![Token::Uint(U256::one()), Token::Uint(U256::one())],
                false,
            ),
            Err(CodecError::TypeMismatch { index: 0, .. })
        ));
    }
}
