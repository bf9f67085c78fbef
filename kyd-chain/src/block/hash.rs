use std::{fmt, str::FromStr};

use hex::{FromHex, ToHex};
use serde::{Serialize, Serializer};

use crate::serialization::sha256d;

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

/// A hash of a block, used to identify blocks and link blocks into a chain. ⛓️
///
/// Technically, this is the (SHA256d or PoW) hash of a block *header*, but
/// since the block header includes the Merkle root of the transaction tree,
/// it binds the entire contents of the block and is used to identify entire
/// blocks.
///
/// The bytes are stored in internal (little-endian) order. `Display`,
/// `FromStr` and `Debug` use the conventional big-endian order shown by
/// block explorers and RPCs.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The all-zero hash, used as the genesis block's previous block hash.
    pub const ZERO: Hash = Hash([0; 32]);

    /// Return the hash bytes in big-endian byte-order suitable for printing out byte by byte.
    pub fn bytes_in_display_order(&self) -> [u8; 32] {
        let mut reversed_bytes = self.0;
        reversed_bytes.reverse();
        reversed_bytes
    }

    /// Convert bytes in big-endian byte-order into a [`Hash`].
    pub fn from_bytes_in_display_order(bytes_in_display_order: &[u8; 32]) -> Hash {
        let mut internal_byte_order = *bytes_in_display_order;
        internal_byte_order.reverse();

        Hash(internal_byte_order)
    }

    /// Hash `data` with double SHA-256.
    pub fn sha256d(data: &[u8]) -> Hash {
        Hash(sha256d(data))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_hex::<String>())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("block::Hash")
            .field(&self.encode_hex::<String>())
            .finish()
    }
}

impl ToHex for &Hash {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.bytes_in_display_order().encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.bytes_in_display_order().encode_hex_upper()
    }
}

impl ToHex for Hash {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        (&self).encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        (&self).encode_hex_upper()
    }
}

impl FromHex for Hash {
    type Error = <[u8; 32] as FromHex>::Error;

    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let hash = <[u8; 32]>::from_hex(hex)?;

        Ok(Self::from_bytes_in_display_order(&hash))
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    /// Parse a hash in display order, with or without a leading `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        Self::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn display_order_is_reversed() {
        let _init_guard = kyd_test::init();

        let mut bytes = [0u8; 32];
        bytes[0] = 0x9b;
        bytes[31] = 0x00;
        bytes[30] = 0x0a;
        let hash = Hash(bytes);

        let display = hash.to_string();
        assert!(display.starts_with("000a"));
        assert!(display.ends_with("9b"));
        assert_eq!(display.parse::<Hash>().expect("display output parses"), hash);
        assert_eq!(
            format!("0x{display}").parse::<Hash>().expect("0x prefix is accepted"),
            hash
        );
    }

    #[test]
    fn short_hashes_are_rejected() {
        let _init_guard = kyd_test::init();

        assert!("0x001".parse::<Hash>().is_err());
        assert!("".parse::<Hash>().is_err());
    }

    proptest! {
        #[test]
        fn debug_uses_display_order(hash in any::<Hash>()) {
            let _init_guard = kyd_test::init();

            prop_assert_eq!(format!("{hash:?}"), format!("block::Hash({:?})", hash.to_string()));
        }
    }
}
