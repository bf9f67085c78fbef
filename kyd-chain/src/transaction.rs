//! Transparent transactions, as used by the genesis coinbase.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};
use serde::Serialize;

use crate::{
    block,
    serialization::{write_compact_size, write_var_bytes, KydSerialize},
    transparent::Script,
    Amount,
};

/// A particular transaction output reference.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct OutPoint {
    /// References the transaction that contains the UTXO being spent.
    pub hash: block::Hash,

    /// Identifies which UTXO from that transaction is referenced; the
    /// first output is 0, etc.
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint spent by coinbase inputs.
    pub const NULL: OutPoint = OutPoint {
        hash: block::Hash::ZERO,
        index: u32::MAX,
    };
}

/// A transparent input to a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Input {
    /// The previous output transaction reference.
    pub outpoint: OutPoint,
    /// The script that authorizes spending `outpoint`.
    pub unlock_script: Script,
    /// The sequence number for the output.
    pub sequence: u32,
}

/// A transparent output from a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Output {
    /// Transaction value, in base units.
    pub value: Amount,
    /// The lock script defines the conditions under which this output can be spent.
    pub lock_script: Script,
}

/// A transparent KYD transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Transaction {
    /// The transaction format version.
    pub version: i32,
    /// The transparent inputs to the transaction.
    pub inputs: Vec<Input>,
    /// The transparent outputs from the transaction.
    pub outputs: Vec<Output>,
    /// The earliest time or block height that this transaction can be added to the
    /// chain.
    pub lock_time: u32,
}

impl Transaction {
    /// Compute the transaction id, the double SHA-256 of its serialization.
    pub fn hash(&self) -> block::Hash {
        block::Hash::sha256d(&self.kyd_serialize_to_vec())
    }

    /// Returns `true` if this transaction spends only the null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].outpoint == OutPoint::NULL
    }
}

impl KydSerialize for Transaction {
    fn kyd_serialize<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.version)?;

        write_compact_size(&mut writer, self.inputs.len() as u64)?;
        for input in &self.inputs {
            writer.write_all(&input.outpoint.hash.0)?;
            writer.write_u32::<LittleEndian>(input.outpoint.index)?;
            write_var_bytes(&mut writer, input.unlock_script.as_raw_bytes())?;
            writer.write_u32::<LittleEndian>(input.sequence)?;
        }

        write_compact_size(&mut writer, self.outputs.len() as u64)?;
        for output in &self.outputs {
            writer.write_i64::<LittleEndian>(output.value)?;
            write_var_bytes(&mut writer, output.lock_script.as_raw_bytes())?;
        }

        writer.write_u32::<LittleEndian>(self.lock_time)
    }
}
