//! Genesis block definitions for the KYD networks.
//!
//! Genesis blocks are the first block in a blockchain, with no parent block.
//! They are hard-coded into the node software and define the start of the chain.
//!
//! Every KYD network shares the same genesis coinbase transaction, so they
//! also share its Merkle root. Networks differ only in the header's time,
//! difficulty bits and nonce.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    transaction::{Input, OutPoint, Output, Transaction},
    transparent::{opcodes::OP_CHECKSIG, Script, ScriptNum},
    work::difficulty::CompactDifficulty,
    Amount,
};

use super::{Block, BlockHasher, Hash, Header};

/// The message embedded in the genesis coinbase input.
pub const GENESIS_COINBASE_MESSAGE: &str = "KYD - Trust between community and developer";

/// The public key paid by the genesis coinbase output, hex-encoded.
pub const GENESIS_OUTPUT_PUBKEY: &str = "046e4f58d4517c352854232f9f9e021ee812f4b49df81b8c912fbb622c41678353980a8b7de4bddc393ec263ab64dc696f5cbf89ba20d1bb97bcab94bff5c80b4b";

/// The number pushed first in the genesis coinbase script.
///
/// This is Bitcoin's original genesis difficulty bits, `0x1d00ffff`.
pub const GENESIS_SCRIPT_SIG_BITS: i64 = 486_604_799;

/// The hash of the main network genesis block, in display order.
pub const MAINNET_GENESIS_HASH: &str =
    "00000a063178bcfbd2c7c7dc62702ec982b10d470032916eb4436a5865100d9b";

/// The Merkle root of every KYD genesis block, in display order.
pub const GENESIS_MERKLE_ROOT: &str =
    "67a8d3310ad55d31172e813894733b947de8c5b17dbfc309f7ad07a66ce06e16";

/// The error type for genesis block verification.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GenesisError {
    /// The computed block hash differs from the hard-coded hash.
    #[error("genesis block hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch {
        /// The hard-coded hash.
        expected: Hash,
        /// The hash computed from the constructed header.
        computed: Hash,
    },

    /// The computed Merkle root differs from the hard-coded root.
    #[error("genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleRootMismatch {
        /// The hard-coded Merkle root.
        expected: Hash,
        /// The Merkle root computed from the genesis transactions.
        computed: Hash,
    },
}

/// How strictly a network's genesis block is checked at startup.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum GenesisCheck {
    /// Both the block hash and the Merkle root must match.
    Enforced {
        /// The expected block hash.
        hash: Hash,
        /// The expected Merkle root.
        merkle_root: Hash,
    },

    /// Only the Merkle root must match.
    ///
    /// The block hash is computed and recorded, but no expected value has
    /// been published for this network.
    MerkleRootOnly {
        /// The expected Merkle root.
        merkle_root: Hash,
    },

    /// No checks, for networks under active development.
    Disabled,
}

impl GenesisCheck {
    /// The check used by the main network, and by every network that
    /// shares its genesis block.
    pub fn mainnet() -> GenesisCheck {
        GenesisCheck::Enforced {
            hash: MAINNET_GENESIS_HASH
                .parse()
                .expect("hard-coded genesis hash must be valid hex"),
            merkle_root: genesis_merkle_root(),
        }
    }

    /// A check of the shared genesis Merkle root only.
    pub fn merkle_root_only() -> GenesisCheck {
        GenesisCheck::MerkleRootOnly {
            merkle_root: genesis_merkle_root(),
        }
    }
}

fn genesis_merkle_root() -> Hash {
    GENESIS_MERKLE_ROOT
        .parse()
        .expect("hard-coded genesis merkle root must be valid hex")
}

/// Deterministically constructs a genesis block.
///
/// The coinbase spends the null outpoint with the script
/// `<486604799> <4> <message>`, and pays zero to
/// `<pubkey> OP_CHECKSIG`. The header links to the zero hash.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisBlockBuilder {
    message: String,
    output_pubkey: Vec<u8>,
    output_value: Amount,
    version: i32,
    /// Header time in Unix seconds, which is 32 bits on the wire.
    time: u32,
    bits: CompactDifficulty,
    nonce: u32,
}

impl GenesisBlockBuilder {
    /// The main network genesis block template.
    pub fn kyd() -> GenesisBlockBuilder {
        GenesisBlockBuilder {
            message: GENESIS_COINBASE_MESSAGE.to_string(),
            output_pubkey: hex::decode(GENESIS_OUTPUT_PUBKEY)
                .expect("hard-coded genesis output pubkey must be valid hex"),
            output_value: 0,
            version: 1,
            time: 1_544_339_974,
            bits: CompactDifficulty(0x1e0f_ffff),
            nonce: 8_544_699,
        }
    }

    /// Replace the header time, in seconds since the Unix epoch.
    pub fn with_time(mut self, time: u32) -> GenesisBlockBuilder {
        self.time = time;
        self
    }

    /// Replace the header difficulty bits.
    pub fn with_bits(mut self, bits: CompactDifficulty) -> GenesisBlockBuilder {
        self.bits = bits;
        self
    }

    /// Replace the header nonce.
    pub fn with_nonce(mut self, nonce: u32) -> GenesisBlockBuilder {
        self.nonce = nonce;
        self
    }

    /// Build the genesis coinbase transaction.
    pub fn coinbase(&self) -> Transaction {
        let unlock_script = Script::new()
            .push_int(GENESIS_SCRIPT_SIG_BITS)
            .push_num(ScriptNum(4))
            .push_slice(self.message.as_bytes());

        let lock_script = Script::new()
            .push_slice(&self.output_pubkey)
            .push_opcode(OP_CHECKSIG);

        Transaction {
            version: 1,
            inputs: vec![Input {
                outpoint: OutPoint::NULL,
                unlock_script,
                sequence: u32::MAX,
            }],
            outputs: vec![Output {
                value: self.output_value,
                lock_script,
            }],
            lock_time: 0,
        }
    }

    /// Build the genesis block.
    pub fn build(&self) -> Block {
        let transactions = vec![Arc::new(self.coinbase())];
        let merkle_root = super::merkle::root(transactions.iter().map(|tx| tx.hash()));

        let header = Header {
            version: self.version,
            previous_block_hash: Hash::ZERO,
            merkle_root,
            time: DateTime::<Utc>::from_timestamp(i64::from(self.time), 0)
                .expect("32-bit Unix times are in range"),
            difficulty_threshold: self.bits,
            nonce: self.nonce,
        };

        Block {
            header: Arc::new(header),
            transactions,
        }
    }
}

/// Verify a constructed genesis block against `check`.
///
/// Returns the block hash computed by `hasher`. Every later consensus
/// decision chains back to this hash, so callers must not continue on error.
pub fn verify(
    block: &Block,
    hasher: &(impl BlockHasher + ?Sized),
    check: &GenesisCheck,
) -> Result<Hash, GenesisError> {
    let computed_root = block.merkle_root();
    let computed_hash = block.hash(hasher);

    let expected_root = match check {
        GenesisCheck::Enforced { merkle_root, .. }
        | GenesisCheck::MerkleRootOnly { merkle_root } => Some(*merkle_root),
        GenesisCheck::Disabled => None,
    };

    if let Some(expected) = expected_root {
        if computed_root != expected || block.header.merkle_root != expected {
            return Err(GenesisError::MerkleRootMismatch {
                expected,
                computed: computed_root,
            });
        }
    }

    if let GenesisCheck::Enforced { hash: expected, .. } = check {
        if computed_hash != *expected {
            return Err(GenesisError::HashMismatch {
                expected: *expected,
                computed: computed_hash,
            });
        }
    }

    Ok(computed_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        block::{tests::vectors::*, DoubleSha256},
        serialization::KydSerialize,
    };

    #[test]
    fn genesis_coinbase_matches_recorded_bytes() {
        let _init_guard = kyd_test::init();

        let coinbase = GenesisBlockBuilder::kyd().coinbase();

        assert!(coinbase.is_coinbase());
        assert_eq!(hex::encode(coinbase.kyd_serialize_to_vec()), GENESIS_COINBASE_HEX);
        assert_eq!(
            hex::encode(coinbase.inputs[0].unlock_script.as_raw_bytes()),
            GENESIS_SCRIPT_SIG_HEX
        );
    }

    #[test]
    fn genesis_merkle_root_is_correct() {
        let _init_guard = kyd_test::init();

        let block = GenesisBlockBuilder::kyd().build();

        assert_eq!(block.merkle_root().to_string(), GENESIS_MERKLE_ROOT);
        assert_eq!(block.header.merkle_root, block.merkle_root());
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.header.previous_block_hash, Hash::ZERO);
    }

    #[test]
    fn genesis_headers_match_recorded_bytes() {
        let _init_guard = kyd_test::init();

        let main = GenesisBlockBuilder::kyd().build();
        assert_eq!(hex::encode(main.header.kyd_serialize_to_vec()), MAINNET_GENESIS_HEADER_HEX);

        let test = testnet_builder().build();
        assert_eq!(hex::encode(test.header.kyd_serialize_to_vec()), TESTNET_GENESIS_HEADER_HEX);

        let regtest = regtest_builder().build();
        assert_eq!(
            hex::encode(regtest.header.kyd_serialize_to_vec()),
            REGTEST_GENESIS_HEADER_HEX
        );
    }

    #[test]
    fn mainnet_genesis_hash_is_correct() {
        let _init_guard = kyd_test::init();

        let block = GenesisBlockBuilder::kyd().build();
        let hash = verify(&block, &KnownHeaderHasher, &GenesisCheck::mainnet())
            .expect("main genesis block verifies");

        assert_eq!(hash.to_string(), MAINNET_GENESIS_HASH);
    }

    #[test]
    fn wrong_hash_function_is_rejected() {
        let _init_guard = kyd_test::init();

        let block = GenesisBlockBuilder::kyd().build();
        let error = verify(&block, &DoubleSha256, &GenesisCheck::mainnet())
            .expect_err("SHA256d does not produce the main genesis hash");

        assert!(matches!(error, GenesisError::HashMismatch { .. }));
    }

    #[test]
    fn changed_header_is_rejected() {
        let _init_guard = kyd_test::init();

        let block = GenesisBlockBuilder::kyd().with_nonce(0).build();
        let error = verify(&block, &KnownHeaderHasher, &GenesisCheck::mainnet())
            .expect_err("a different nonce changes the hash");

        assert_eq!(
            error,
            GenesisError::HashMismatch {
                expected: MAINNET_GENESIS_HASH.parse().expect("valid hash"),
                computed: block.hash(&KnownHeaderHasher),
            }
        );
    }

    #[test]
    fn merkle_root_only_and_disabled_checks() {
        let _init_guard = kyd_test::init();

        let block = regtest_builder().build();

        let hash = verify(&block, &DoubleSha256, &GenesisCheck::merkle_root_only())
            .expect("regtest shares the main coinbase");
        assert_eq!(hash, block.hash(&DoubleSha256));

        let wrong_root = GenesisCheck::MerkleRootOnly {
            merkle_root: Hash::ZERO,
        };
        assert!(matches!(
            verify(&block, &DoubleSha256, &wrong_root),
            Err(GenesisError::MerkleRootMismatch { .. })
        ));

        assert_eq!(
            verify(&block, &DoubleSha256, &GenesisCheck::Disabled),
            Ok(block.hash(&DoubleSha256))
        );
    }

    #[test]
    fn latest_header_time_serializes() {
        let _init_guard = kyd_test::init();

        let block = GenesisBlockBuilder::kyd().with_time(u32::MAX).build();
        let bytes = block.header.kyd_serialize_to_vec();

        assert_eq!(block.header.time.timestamp(), i64::from(u32::MAX));
        assert_eq!(bytes[68..72], u32::MAX.to_le_bytes());
        assert_eq!(block.hash(&DoubleSha256), Hash::sha256d(&bytes));
    }

    #[test]
    fn closures_are_hashers() {
        let _init_guard = kyd_test::init();

        let block = GenesisBlockBuilder::kyd().build();
        let constant = |_: &Header| Hash([7; 32]);

        assert_eq!(block.hash(&constant), Hash([7; 32]));
    }
}
