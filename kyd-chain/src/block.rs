//! Blocks and block-related structures (heights, headers, etc.)
//!
//! This crate only models as much of a block as the genesis block needs:
//! a header and a list of transparent transactions.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

mod hash;
mod header;

pub mod genesis;
pub mod merkle;

#[cfg(test)]
pub(crate) mod tests;

pub use hash::Hash;
pub use header::{BlockHasher, DoubleSha256, Header, HEADER_LEN};

/// The length of the chain back to the genesis block.
///
/// Height 0 is the genesis block.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Height(pub u32);

impl Height {
    /// The genesis height.
    pub const MIN: Height = Height(0);

    /// Returns the next height, or `None` on overflow.
    pub fn next(self) -> Option<Height> {
        self.0.checked_add(1).map(Height)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for Height {
    fn from(height: u32) -> Self {
        Height(height)
    }
}

/// A KYD block, containing a header and a list of transactions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Block {
    /// The block header, containing block metadata.
    pub header: Arc<Header>,
    /// The block transactions.
    pub transactions: Vec<Arc<Transaction>>,
}

impl Block {
    /// Compute the Merkle root of this block's transactions.
    ///
    /// Transaction ids are always double SHA-256, regardless of how the
    /// header itself is hashed.
    pub fn merkle_root(&self) -> Hash {
        merkle::root(self.transactions.iter().map(|tx| tx.hash()))
    }

    /// Compute the hash of this block using `hasher`.
    pub fn hash(&self, hasher: &(impl BlockHasher + ?Sized)) -> Hash {
        hasher.header_hash(&self.header)
    }
}
