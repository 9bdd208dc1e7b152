use crate::{MulticallError, Result};

use alloy::{eips, primitives::BlockNumber};
use std::{fmt::Display, str::FromStr};

/// Block the aggregate call is executed against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BlockId {
    #[default]
    Latest,
    BlockNumber(BlockNumber),
}

impl FromStr for BlockId {
    type Err = MulticallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<u64>() {
            Ok(block_number) => Ok(BlockId::BlockNumber(block_number)),
            Err(_) if s == "latest" => Ok(BlockId::Latest),
            _ => Err(MulticallError::InvalidBlockId(s.to_string())),
        }
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockId::Latest => write!(f, "latest"),
            BlockId::BlockNumber(block_number) => write!(f, "{}", block_number),
        }
    }
}

impl From<BlockId> for eips::BlockId {
    fn from(block_id: BlockId) -> Self {
        match block_id {
            BlockId::Latest => eips::BlockId::latest(),
            BlockId::BlockNumber(block_number) => eips::BlockId::number(block_number),
        }
    }
}
