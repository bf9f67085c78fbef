//! Bitcoin-style consensus serialization helpers.
//!
//! Only the pieces needed to reproduce genesis blocks byte-for-byte live here:
//! CompactSize length prefixes and double SHA-256.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};
use sha2::{Digest, Sha256};

/// Write `n` as a Bitcoin CompactSize integer.
pub fn write_compact_size<W: io::Write>(mut writer: W, n: u64) -> io::Result<()> {
    match n {
        0x00..=0xfc => writer.write_u8(n as u8),
        0xfd..=0xffff => {
            writer.write_u8(0xfd)?;
            writer.write_u16::<LittleEndian>(n as u16)
        }
        0x1_0000..=0xffff_ffff => {
            writer.write_u8(0xfe)?;
            writer.write_u32::<LittleEndian>(n as u32)
        }
        _ => {
            writer.write_u8(0xff)?;
            writer.write_u64::<LittleEndian>(n)
        }
    }
}

/// Write `bytes` prefixed by its CompactSize length.
pub fn write_var_bytes<W: io::Write>(mut writer: W, bytes: &[u8]) -> io::Result<()> {
    write_compact_size(&mut writer, bytes.len() as u64)?;
    writer.write_all(bytes)
}

/// Compute `SHA256(SHA256(data))`.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// A type that writes its consensus encoding.
pub trait KydSerialize {
    /// Write the consensus encoding of `self` to `writer`.
    fn kyd_serialize<W: io::Write>(&self, writer: W) -> io::Result<()>;

    /// Return the consensus encoding of `self` as a byte vector.
    fn kyd_serialize_to_vec(&self) -> Vec<u8> {
        let mut data = Vec::new();
        self.kyd_serialize(&mut data)
            .expect("in-memory serialization only fails on out-of-range field values");
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(n: u64) -> Vec<u8> {
        let mut data = Vec::new();
        write_compact_size(&mut data, n).expect("vec writes succeed");
        data
    }

    #[test]
    fn compact_size_boundaries() {
        let _init_guard = kyd_test::init();

        assert_eq!(compact(0), [0x00]);
        assert_eq!(compact(0xfc), [0xfc]);
        assert_eq!(compact(0xfd), [0xfd, 0xfd, 0x00]);
        assert_eq!(compact(0xffff), [0xfd, 0xff, 0xff]);
        assert_eq!(compact(0x1_0000), [0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(
            compact(0x1_0000_0000),
            [0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn sha256d_of_empty_input() {
        let _init_guard = kyd_test::init();

        assert_eq!(
            hex::encode(sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }
}
