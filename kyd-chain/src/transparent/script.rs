//! Bitcoin script construction.

use std::fmt;

use serde::{Serialize, Serializer};

/// The opcodes used to build coinbase and pay-to-pubkey scripts.
pub mod opcodes {
    /// Push an empty array.
    pub const OP_0: u8 = 0x00;
    /// The next byte is the number of bytes to push.
    pub const OP_PUSHDATA1: u8 = 0x4c;
    /// The next two bytes are the number of bytes to push.
    pub const OP_PUSHDATA2: u8 = 0x4d;
    /// The next four bytes are the number of bytes to push.
    pub const OP_PUSHDATA4: u8 = 0x4e;
    /// Push the number -1.
    pub const OP_1NEGATE: u8 = 0x4f;
    /// Push the number 1. `OP_2` to `OP_16` follow consecutively.
    pub const OP_1: u8 = 0x51;
    /// Check a signature against the public key on the stack.
    pub const OP_CHECKSIG: u8 = 0xac;
}

/// An encoding of a Bitcoin script.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create an empty script.
    pub fn new() -> Script {
        Script(Vec::new())
    }

    /// Return the raw bytes of this script.
    pub fn as_raw_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Append a single opcode.
    pub fn push_opcode(mut self, opcode: u8) -> Script {
        self.0.push(opcode);
        self
    }

    /// Append a data push, using the smallest push opcode that fits.
    pub fn push_slice(mut self, data: &[u8]) -> Script {
        match data.len() {
            len if len < opcodes::OP_PUSHDATA1 as usize => self.0.push(len as u8),
            len if len <= 0xff => {
                self.0.push(opcodes::OP_PUSHDATA1);
                self.0.push(len as u8);
            }
            len if len <= 0xffff => {
                self.0.push(opcodes::OP_PUSHDATA2);
                self.0.extend_from_slice(&(len as u16).to_le_bytes());
            }
            len => {
                self.0.push(opcodes::OP_PUSHDATA4);
                self.0.extend_from_slice(&(len as u32).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Append an integer, using a small-integer opcode where one exists.
    ///
    /// Other values are pushed as a minimally encoded [`ScriptNum`].
    pub fn push_int(self, value: i64) -> Script {
        match value {
            -1 => self.push_opcode(opcodes::OP_1NEGATE),
            0 => self.push_opcode(opcodes::OP_0),
            1..=16 => self.push_opcode(opcodes::OP_1 + (value as u8 - 1)),
            _ => self.push_num(ScriptNum(value)),
        }
    }

    /// Append a [`ScriptNum`] as a data push, even for small values.
    pub fn push_num(self, num: ScriptNum) -> Script {
        self.push_slice(&num.to_bytes())
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Script")
            .field(&hex::encode(&self.0))
            .finish()
    }
}

impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

/// A script number, encoded as minimal little-endian sign-magnitude bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScriptNum(pub i64);

impl ScriptNum {
    /// Encode this number the way script interpreters expect it.
    pub fn to_bytes(self) -> Vec<u8> {
        if self.0 == 0 {
            return Vec::new();
        }

        let negative = self.0 < 0;
        let mut magnitude = self.0.unsigned_abs();
        let mut bytes = Vec::with_capacity(9);

        while magnitude > 0 {
            bytes.push((magnitude & 0xff) as u8);
            magnitude >>= 8;
        }

        // If the top byte already uses the sign bit, add a byte for the sign.
        let last = bytes.len() - 1;
        if bytes[last] & 0x80 != 0 {
            bytes.push(if negative { 0x80 } else { 0x00 });
        } else if negative {
            bytes[last] |= 0x80;
        }

        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_num_minimal_encoding() {
        let _init_guard = kyd_test::init();

        assert_eq!(ScriptNum(0).to_bytes(), Vec::<u8>::new());
        assert_eq!(ScriptNum(4).to_bytes(), vec![0x04]);
        assert_eq!(ScriptNum(-1).to_bytes(), vec![0x81]);
        assert_eq!(ScriptNum(127).to_bytes(), vec![0x7f]);
        assert_eq!(ScriptNum(128).to_bytes(), vec![0x80, 0x00]);
        assert_eq!(ScriptNum(-128).to_bytes(), vec![0x80, 0x80]);
        assert_eq!(ScriptNum(255).to_bytes(), vec![0xff, 0x00]);
        assert_eq!(ScriptNum(486_604_799).to_bytes(), vec![0xff, 0xff, 0x00, 0x1d]);
    }

    #[test]
    fn push_int_uses_small_opcodes() {
        let _init_guard = kyd_test::init();

        assert_eq!(Script::new().push_int(0).as_raw_bytes(), [opcodes::OP_0]);
        assert_eq!(Script::new().push_int(-1).as_raw_bytes(), [opcodes::OP_1NEGATE]);
        assert_eq!(Script::new().push_int(16).as_raw_bytes(), [0x60]);
        assert_eq!(Script::new().push_int(17).as_raw_bytes(), [0x01, 0x11]);

        // push_num always pushes data
        assert_eq!(
            Script::new().push_num(ScriptNum(4)).as_raw_bytes(),
            [0x01, 0x04]
        );
    }

    #[test]
    fn push_slice_lengths() {
        let _init_guard = kyd_test::init();

        let short = Script::new().push_slice(&[0xab; 75]);
        assert_eq!(short.as_raw_bytes()[0], 75);

        let medium = Script::new().push_slice(&[0xab; 76]);
        assert_eq!(&medium.as_raw_bytes()[..2], [opcodes::OP_PUSHDATA1, 76]);

        let long = Script::new().push_slice(&[0xab; 300]);
        assert_eq!(
            &long.as_raw_bytes()[..3],
            [opcodes::OP_PUSHDATA2, 0x2c, 0x01]
        );
    }
}
