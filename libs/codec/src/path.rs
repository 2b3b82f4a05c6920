//! Packed swap-path encoding for the fee-tiered swap opcodes.
//!
//! The canonical layout is `address (uint24 address)*`: a 20-byte start token
//! followed by 3-byte big-endian fee / 20-byte token pairs, one per hop. Swap
//! constructors accept either the packed bytes verbatim or a typed hop
//! sequence which is packed here before ABI packing.

use ethers_core::types::Address;

use types::FeeTier;

use crate::error::CodecError;

const ADDRESS_LEN: usize = 20;
const FEE_LEN: usize = 3;
const HOP_LEN: usize = FEE_LEN + ADDRESS_LEN;

/// Typed fee-tiered path: start token plus (fee, token) per hop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredPath {
    pub first: Address,
    pub hops: Vec<(FeeTier, Address)>,
}

impl TieredPath {
    pub fn new(first: Address, hops: Vec<(FeeTier, Address)>) -> Self {
        Self { first, hops }
    }

    /// Pack into the canonical wire layout
    pub fn pack(&self) -> Vec<u8> {
        let mut packed = Vec::with_capacity(ADDRESS_LEN + self.hops.len() * HOP_LEN);
        packed.extend_from_slice(self.first.as_bytes());
        for (fee, token) in &self.hops {
            packed.extend_from_slice(&fee.pips().to_be_bytes()[1..]);
            packed.extend_from_slice(token.as_bytes());
        }
        packed
    }

    /// Unpack a canonical path, rejecting layouts that do not divide into
    /// whole hops or carry an undeployed fee tier
    pub fn unpack(data: &[u8]) -> Result<Self, CodecError> {
        let len = data.len();
        if len < ADDRESS_LEN + HOP_LEN {
            return Err(CodecError::MalformedPath {
                reason: "shorter than one hop",
                len,
            });
        }
        if (len - ADDRESS_LEN) % HOP_LEN != 0 {
            return Err(CodecError::MalformedPath {
                reason: "does not divide into whole hops",
                len,
            });
        }

        let first = Address::from_slice(&data[..ADDRESS_LEN]);
        let mut hops = Vec::with_capacity((len - ADDRESS_LEN) / HOP_LEN);
        for hop in data[ADDRESS_LEN..].chunks_exact(HOP_LEN) {
            let pips = u32::from_be_bytes([0, hop[0], hop[1], hop[2]]);
            let fee = FeeTier::try_from(pips).map_err(|_| CodecError::MalformedPath {
                reason: "unknown fee tier",
                len,
            })?;
            hops.push((fee, Address::from_slice(&hop[FEE_LEN..])));
        }

        Ok(Self { first, hops })
    }
}

/// Path argument of the fee-tiered swap opcodes: pre-packed bytes are used
/// verbatim, typed paths are packed first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInput {
    Packed(Vec<u8>),
    Hops(TieredPath),
}

impl PathInput {
    pub fn into_packed(self) -> Vec<u8> {
        match self {
            PathInput::Packed(bytes) => bytes,
            PathInput::Hops(path) => path.pack(),
        }
    }
}

impl From<Vec<u8>> for PathInput {
    fn from(bytes: Vec<u8>) -> Self {
        PathInput::Packed(bytes)
    }
}

impl From<TieredPath> for PathInput {
    fn from(path: TieredPath) -> Self {
        PathInput::Hops(path)
    }
}
