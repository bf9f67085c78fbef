//! Block difficulty data structures and calculations
//!
//! The block difficulty "target threshold" is stored in the block header as a
//! 32-bit `CompactDifficulty`. The `block::Hash` must be less than or equal
//! to the `ExpandedDifficulty` threshold, when represented as a 256-bit integer
//! in little-endian order.

use std::fmt;

use primitive_types::U256;
use serde::{Serialize, Serializer};

/// A 32-bit "compact bits" value, which represents the difficulty threshold for
/// a block header.
///
/// The compact format is a base-256 floating-point number: the high byte is
/// the exponent (the number of bytes in the value), and the low 23 bits are
/// the mantissa. Bit 23 is a sign bit, which must be zero for valid targets.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct CompactDifficulty(pub u32);

/// A 256-bit unsigned "expanded difficulty" value.
///
/// Used as a target threshold for the difficulty of a block header hash, and
/// as the maximum-difficulty ("work limit") bound of each network.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ExpandedDifficulty(U256);

/// The mask for the sign bit of a compact mantissa.
const SIGN_BIT: u32 = 0x0080_0000;

/// The mask for the unsigned mantissa bits.
const UNSIGNED_MANTISSA_MASK: u32 = 0x007f_ffff;

impl CompactDifficulty {
    /// Calculate the `ExpandedDifficulty` for this compact value.
    ///
    /// Returns `None` for negative, zero or overflowing values, which are
    /// never valid difficulty thresholds.
    pub fn to_expanded(self) -> Option<ExpandedDifficulty> {
        let size = self.0 >> 24;
        let mantissa = self.0 & UNSIGNED_MANTISSA_MASK;

        if mantissa == 0 || self.0 & SIGN_BIT != 0 {
            return None;
        }

        let overflows =
            size > 34 || (mantissa > 0xff && size > 33) || (mantissa > 0xffff && size > 32);
        if overflows {
            return None;
        }

        let value = if size <= 3 {
            U256::from(mantissa >> (8 * (3 - size)))
        } else {
            U256::from(mantissa) << (8 * (size - 3))
        };

        if value.is_zero() {
            None
        } else {
            Some(ExpandedDifficulty(value))
        }
    }
}

impl fmt::Debug for CompactDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompactDifficulty")
            .field(&format_args!("{:#010x}", self.0))
            .finish()
    }
}

impl fmt::Display for CompactDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl Serialize for CompactDifficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl ExpandedDifficulty {
    /// Returns the largest 256-bit value shifted right by `shift` bits.
    ///
    /// Network work limits are written this way, for example `~0 >> 20`.
    pub fn from_limit_shift(shift: u32) -> ExpandedDifficulty {
        ExpandedDifficulty(U256::MAX >> shift)
    }

    /// Returns the underlying 256-bit integer.
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Returns the 32 bytes of this value in big-endian order.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    /// Calculate the compact "bits" encoding of this value.
    ///
    /// The encoding is lossy, low-order bits beyond the 23-bit mantissa are
    /// truncated.
    pub fn to_compact(&self) -> CompactDifficulty {
        let mut size = ((self.0.bits() + 7) / 8) as u32;

        let mut compact = if size <= 3 {
            (self.0.low_u64() << (8 * (3 - size))) as u32
        } else {
            (self.0 >> (8 * (size - 3))).low_u64() as u32
        };

        // The mantissa is signed, so keep the sign bit clear by moving one
        // byte into the exponent.
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }

        CompactDifficulty(compact | (size << 24))
    }
}

impl From<U256> for ExpandedDifficulty {
    fn from(value: U256) -> Self {
        ExpandedDifficulty(value)
    }
}

impl fmt::Debug for ExpandedDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExpandedDifficulty")
            .field(&hex::encode(self.to_be_bytes()))
            .finish()
    }
}

impl fmt::Display for ExpandedDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_be_bytes()))
    }
}

impl Serialize for ExpandedDifficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regtest_work_limit_compacts_to_207fffff() {
        let _init_guard = kyd_test::init();

        let limit = ExpandedDifficulty::from_limit_shift(1);
        assert_eq!(limit.to_compact(), CompactDifficulty(0x207f_ffff));
    }

    #[test]
    fn main_limits() {
        let _init_guard = kyd_test::init();

        let pow_limit = ExpandedDifficulty::from_limit_shift(20);
        assert_eq!(
            pow_limit.to_string(),
            "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        );
        assert_eq!(pow_limit.to_compact(), CompactDifficulty(0x1e0f_ffff));

        let pos_limit = ExpandedDifficulty::from_limit_shift(24);
        assert_eq!(pos_limit.to_compact(), CompactDifficulty(0x1e00_ffff));
        assert!(pos_limit < pow_limit);
    }

    #[test]
    fn compact_expansion() {
        let _init_guard = kyd_test::init();

        let expanded = CompactDifficulty(0x1e0f_ffff)
            .to_expanded()
            .expect("main genesis bits are a valid target");
        assert_eq!(expanded.as_u256(), U256::from(0x0f_ffffu32) << 216);
        assert_eq!(expanded.to_compact(), CompactDifficulty(0x1e0f_ffff));

        // small exponents shift the mantissa right
        assert_eq!(
            CompactDifficulty(0x0112_3456).to_expanded(),
            Some(ExpandedDifficulty(U256::from(0x12u32)))
        );
        assert_eq!(
            CompactDifficulty(0x0312_3456).to_expanded(),
            Some(ExpandedDifficulty(U256::from(0x12_3456u32)))
        );
    }

    #[test]
    fn invalid_compact_values() {
        let _init_guard = kyd_test::init();

        // zero mantissa
        assert_eq!(CompactDifficulty(0x1d00_0000).to_expanded(), None);
        // sign bit
        assert_eq!(CompactDifficulty(0x04923456).to_expanded(), None);
        // overflow
        assert_eq!(CompactDifficulty(0xff12_3456).to_expanded(), None);
        // mantissa shifted out entirely
        assert_eq!(CompactDifficulty(0x0000_0001).to_expanded(), None);
    }

    #[test]
    fn compact_display() {
        let _init_guard = kyd_test::init();

        assert_eq!(CompactDifficulty(0x1e0f_ffff).to_string(), "1e0fffff");
        assert_eq!(
            format!("{:?}", CompactDifficulty(0x207f_ffff)),
            "CompactDifficulty(0x207fffff)"
        );
    }
}
