//! The block header, and the hashing collaborator that identifies it.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    serialization::KydSerialize,
    work::difficulty::CompactDifficulty,
};

use super::Hash;

/// The serialized length of a block header, in bytes.
pub const HEADER_LEN: usize = 4 + 32 + 32 + 4 + 4 + 4;

/// A block header, containing metadata about a block.
///
/// How are blocks chained together? They are chained together via the
/// backwards reference (previous header hash) present in the block
/// header. Each block points backwards to its parent, all the way
/// back to the genesis block (the first block in the blockchain).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Header {
    /// The block's version field.
    pub version: i32,

    /// The hash of the previous block, used to create a chain of blocks back to
    /// the genesis block.
    ///
    /// This ensures no previous block can be changed without also changing this
    /// block's header.
    pub previous_block_hash: Hash,

    /// The root of the transaction Merkle tree.
    pub merkle_root: Hash,

    /// The block timestamp is a Unix epoch time (UTC) when the miner
    /// started hashing the header (according to the miner).
    pub time: DateTime<Utc>,

    /// An encoded version of the target threshold this block's header
    /// hash must be less than or equal to.
    pub difficulty_threshold: CompactDifficulty,

    /// An arbitrary field that miners can change to modify the header
    /// hash in order to produce a hash less than or equal to the
    /// target threshold.
    pub nonce: u32,
}

impl KydSerialize for Header {
    fn kyd_serialize<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.version)?;
        writer.write_all(&self.previous_block_hash.0)?;
        writer.write_all(&self.merkle_root.0)?;
        // Header times are 32-bit on the wire.
        let time = u32::try_from(self.time.timestamp()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("header time {} is outside the 32-bit range", self.time),
            )
        })?;
        writer.write_u32::<LittleEndian>(time)?;
        writer.write_u32::<LittleEndian>(self.difficulty_threshold.0)?;
        writer.write_u32::<LittleEndian>(self.nonce)
    }
}

/// Computes the identifying hash of a block header.
///
/// The proof-of-work hash function is provided by the node's hashing
/// component, this crate only supplies the header. Closures of type
/// `Fn(&Header) -> Hash` implement this trait.
pub trait BlockHasher: Send + Sync {
    /// Return the hash identifying `header`.
    fn header_hash(&self, header: &Header) -> Hash;
}

impl<F> BlockHasher for F
where
    F: Fn(&Header) -> Hash + Send + Sync,
{
    fn header_hash(&self, header: &Header) -> Hash {
        self(header)
    }
}

/// Hashes headers with double SHA-256 over their 80-byte serialization.
#[derive(Copy, Clone, Debug, Default)]
pub struct DoubleSha256;

impl BlockHasher for DoubleSha256 {
    fn header_hash(&self, header: &Header) -> Hash {
        Hash::sha256d(&header.kyd_serialize_to_vec())
    }
}
