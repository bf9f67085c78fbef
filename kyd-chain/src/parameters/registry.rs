//! The registry of every network's parameters.
//!
//! Main is written out in full. Test derives from Main, RegTest from Test,
//! and UnitTest from Main, each by copying the base set and overriding the
//! fields that differ.

use std::{ops::Deref, sync::Arc};

use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    block::{
        self,
        genesis::{self, GenesisBlockBuilder, GenesisCheck},
        Block, BlockHasher, Height,
    },
    parameters::{
        activation::{ActivationHeights, ActivationSchedule, ActivationTimes},
        checkpoint::{CheckpointData, CheckpointList},
        constants::{magics, mainnet, ports, testnet, ZEROCOIN_MODULUS},
        params::{
            Base58Prefixes, BootstrapData, ConsensusThresholds, MasternodeParams,
            NetworkParameters, PolicyFlags, PowParams, SporkKeys, ZerocoinParams,
        },
        seeds::{self, convert_seeds_now},
        NetworkId,
    },
    work::difficulty::ExpandedDifficulty,
    CENT, COIN,
};

/// The main network checkpoints, as `(height, hash)` pairs.
const MAINNET_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "00000a063178bcfbd2c7c7dc62702ec982b10d470032916eb4436a5865100d9b"),
    (250, "0000027a906e79807e5366cb898801ddae8c1c613079b2b8d86f91d50bca9280"),
    (2500, "c120830f40226255b0b4c9f787c99af92699712fc52ca190fc23000707813f92"),
    (5250, "745c5e4c4e49d7f9d31d87bfe2d5ab9b94f1073c1a7363ecb217ee03104d6858"),
    (122500, "2004719bd307f37b0baaa095bb1ad5433a790e5e5b68dcb6ab8ff40672159b6c"),
    (140000, "280db0c6c619b220d6ab11c34006d9e2644e2060c50ad1806efd7792cd247378"),
];

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("hard-coded timestamp must be in range")
}

/// Build and verify a genesis block.
///
/// # Panics
///
/// If the block fails `check`. Every later block chains back to the genesis
/// hash, so the node must not start with an unverified genesis block.
fn verified_genesis(
    network: NetworkId,
    builder: &GenesisBlockBuilder,
    hasher: &dyn BlockHasher,
    check: &GenesisCheck,
) -> (Arc<Block>, block::Hash) {
    let block = builder.build();

    match genesis::verify(&block, hasher, check) {
        Ok(hash) => (Arc::new(block), hash),
        Err(error) => {
            tracing::error!(%network, %error, "genesis block verification failed");
            panic!("{network} genesis block is invalid: {error}");
        }
    }
}

/// The checkpoint data of a network with only a genesis checkpoint.
fn genesis_only_checkpoints(
    genesis_hash: block::Hash,
    last_checkpoint_time: i64,
    transactions_per_day: f64,
) -> Arc<CheckpointData> {
    Arc::new(CheckpointData {
        checkpoints: CheckpointList::from_list([(Height::MIN, genesis_hash)])
            .expect("a single genesis checkpoint is always valid"),
        last_checkpoint_time: timestamp(last_checkpoint_time),
        transactions_at_last_checkpoint: 0,
        transactions_per_day,
    })
}

/// The main network parameters.
fn main_params(hasher: &dyn BlockHasher) -> NetworkParameters {
    let pow_limit = ExpandedDifficulty::from_limit_shift(20);

    let genesis_check = GenesisCheck::mainnet();
    let (genesis, genesis_hash) = verified_genesis(
        NetworkId::Main,
        &GenesisBlockBuilder::kyd().with_bits(pow_limit.to_compact()),
        hasher,
        &genesis_check,
    );

    let checkpoints = Arc::new(CheckpointData {
        checkpoints: CheckpointList::from_static(MAINNET_CHECKPOINTS),
        last_checkpoint_time: timestamp(1_550_066_841),
        transactions_at_last_checkpoint: 287_552,
        transactions_per_day: 2000.0,
    });
    assert_eq!(
        checkpoints.checkpoints.genesis_hash(),
        genesis_hash,
        "hard-coded genesis checkpoint must match the genesis block"
    );

    NetworkParameters {
        network: NetworkId::Main,
        magic: magics::MAINNET,
        default_port: ports::MAINNET,
        alert_public_key: hex::decode(mainnet::ALERT_PUBLIC_KEY)
            .expect("hard-coded alert key must be valid hex"),

        pow: PowParams {
            pow_limit,
            pos_limit: ExpandedDifficulty::from_limit_shift(24),
            subsidy_halving_interval: 210_000,
            target_timespan_secs: 60,
            target_spacing_secs: 30,
            pos_target_spacing_secs: 60,
            pos_dgw_fork_height: Height(55_000),
            last_pow_height: Height(250),
            modifier_update_height: Height(1),
        },
        consensus: ConsensusThresholds {
            enforce_block_upgrade_majority: 750,
            reject_block_outdated_majority: 950,
            to_check_block_upgrade_majority: 1000,
            coinbase_maturity: 20,
            max_reorganization_depth: 100,
        },
        activation: ActivationSchedule {
            heights: ActivationHeights {
                wallet_fork: Some(Height(275)),
                difficulty_fork: Some(Height(150_000)),
                zerocoin_start: None,
                zerocoin_v2: None,
                enforce_serial_range: Some(Height(1)),
                recalculate_accumulators: None,
                first_fraudulent: None,
                last_good_checkpoint: None,
                enforce_invalid_utxo: None,
            },
            times: ActivationTimes {
                zerocoin_start: None,
                enforce_new_spork_key: Some(timestamp(1_550_880_000)),
                reject_old_spork_key: Some(timestamp(1_550_900_000)),
                masternode_payments_start: Some(timestamp(1_523_435_473)),
            },
        },
        prefixes: Base58Prefixes {
            pubkey_address: mainnet::B58_PUBKEY_ADDRESS_PREFIX.to_vec(),
            script_address: mainnet::B58_SCRIPT_ADDRESS_PREFIX.to_vec(),
            secret_key: mainnet::B58_SECRET_KEY_PREFIX.to_vec(),
            ext_public_key: mainnet::EXT_PUBLIC_KEY_PREFIX,
            ext_secret_key: mainnet::EXT_SECRET_KEY_PREFIX,
            ext_coin_type: mainnet::EXT_COIN_TYPE,
        },
        bootstrap: BootstrapData {
            dns_seeds: seeds::mainnet_dns_seeds(),
            fixed_seeds: convert_seeds_now(seeds::MAIN_SEEDS),
        },

        max_money_out: 21_000_000 * COIN,
        invalid_amount_filtered: 0,

        masternode: MasternodeParams {
            count_drift: 20,
            pool_max_transactions: 3,
            budget_fee_confirmations: 6,
            obfuscation_pool_dummy_address: mainnet::OBFUSCATION_POOL_DUMMY_ADDRESS.to_string(),
            miner_threads: 0,
        },
        spork: SporkKeys {
            current: mainnet::SPORK_KEY.to_string(),
            legacy: mainnet::SPORK_KEY_OLD.to_string(),
        },
        zerocoin: ZerocoinParams {
            modulus: ZEROCOIN_MODULUS.to_string(),
            max_spends_per_transaction: 7,
            min_mint_fee: CENT,
            mint_required_confirmations: 20,
            required_accumulation: 1,
            default_security_level: 100,
            header_version: 4,
            required_stake_depth: 200,
        },
        flags: PolicyFlags {
            mining_requires_peers: true,
            allow_min_difficulty_blocks: false,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            skip_proof_of_work_check: false,
            testnet_to_be_deprecated_field_rpc: false,
            headers_first_syncing_active: false,
        },

        genesis,
        genesis_hash,
        genesis_check,
        checkpoints,
    }
}

/// The test network parameters, derived from `main`.
fn test_params(main: &NetworkParameters, hasher: &dyn BlockHasher) -> NetworkParameters {
    let genesis_check = GenesisCheck::merkle_root_only();
    let (genesis, genesis_hash) = verified_genesis(
        NetworkId::Test,
        &GenesisBlockBuilder::kyd()
            .with_bits(main.pow.pow_limit.to_compact())
            .with_time(1_523_855_288)
            .with_nonce(2_733_486),
        hasher,
        &genesis_check,
    );

    NetworkParameters {
        network: NetworkId::Test,
        magic: magics::TESTNET,
        default_port: ports::TESTNET,
        alert_public_key: hex::decode(testnet::ALERT_PUBLIC_KEY)
            .expect("hard-coded alert key must be valid hex"),

        pow: PowParams {
            target_timespan_secs: 60,
            target_spacing_secs: 60,
            last_pow_height: Height(200),
            modifier_update_height: Height(51_197),
            ..main.pow.clone()
        },
        consensus: ConsensusThresholds {
            enforce_block_upgrade_majority: 51,
            reject_block_outdated_majority: 75,
            to_check_block_upgrade_majority: 100,
            coinbase_maturity: 60,
            ..main.consensus.clone()
        },
        activation: ActivationSchedule {
            heights: ActivationHeights {
                zerocoin_start: None,
                zerocoin_v2: Some(Height(444_020)),
                enforce_serial_range: Some(Height(1)),
                recalculate_accumulators: Some(Height(9_908_000)),
                first_fraudulent: Some(Height(9_891_737)),
                last_good_checkpoint: Some(Height(9_891_730)),
                enforce_invalid_utxo: Some(Height(9_902_850)),
                ..main.activation.heights.clone()
            },
            times: ActivationTimes {
                zerocoin_start: None,
                enforce_new_spork_key: Some(timestamp(1_521_604_800)),
                reject_old_spork_key: Some(timestamp(1_522_454_400)),
                masternode_payments_start: Some(timestamp(1_420_837_558)),
            },
        },
        prefixes: Base58Prefixes {
            pubkey_address: testnet::B58_PUBKEY_ADDRESS_PREFIX.to_vec(),
            script_address: testnet::B58_SCRIPT_ADDRESS_PREFIX.to_vec(),
            secret_key: testnet::B58_SECRET_KEY_PREFIX.to_vec(),
            ext_public_key: testnet::EXT_PUBLIC_KEY_PREFIX,
            ext_secret_key: testnet::EXT_SECRET_KEY_PREFIX,
            ext_coin_type: testnet::EXT_COIN_TYPE,
        },
        bootstrap: BootstrapData {
            dns_seeds: Vec::new(),
            fixed_seeds: convert_seeds_now(seeds::TEST_SEEDS),
        },

        max_money_out: 43_199_500 * COIN,
        invalid_amount_filtered: 0,

        masternode: MasternodeParams {
            count_drift: 4,
            pool_max_transactions: 2,
            budget_fee_confirmations: 3,
            obfuscation_pool_dummy_address: String::new(),
            ..main.masternode.clone()
        },
        spork: SporkKeys {
            current: testnet::SPORK_KEY.to_string(),
            legacy: testnet::SPORK_KEY.to_string(),
        },
        flags: PolicyFlags {
            mining_requires_peers: true,
            allow_min_difficulty_blocks: true,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            testnet_to_be_deprecated_field_rpc: true,
            ..main.flags.clone()
        },

        genesis,
        genesis_hash,
        genesis_check,
        checkpoints: genesis_only_checkpoints(genesis_hash, 1_740_710, 250.0),

        ..main.clone()
    }
}

/// The regression test network parameters, derived from `test`.
fn regtest_params(test: &NetworkParameters, hasher: &dyn BlockHasher) -> NetworkParameters {
    let pow_limit = ExpandedDifficulty::from_limit_shift(1);

    let genesis_check = GenesisCheck::merkle_root_only();
    let (genesis, genesis_hash) = verified_genesis(
        NetworkId::RegTest,
        &GenesisBlockBuilder::kyd()
            .with_bits(pow_limit.to_compact())
            .with_time(1_523_854_631)
            .with_nonce(7_065_194),
        hasher,
        &genesis_check,
    );

    NetworkParameters {
        network: NetworkId::RegTest,
        magic: magics::REGTEST,
        default_port: ports::REGTEST,

        pow: PowParams {
            pow_limit,
            subsidy_halving_interval: 150,
            target_timespan_secs: 24 * 60 * 60,
            target_spacing_secs: 60,
            ..test.pow.clone()
        },
        consensus: ConsensusThresholds {
            enforce_block_upgrade_majority: 750,
            reject_block_outdated_majority: 950,
            to_check_block_upgrade_majority: 1000,
            ..test.consensus.clone()
        },
        bootstrap: BootstrapData {
            dns_seeds: Vec::new(),
            fixed_seeds: Vec::new(),
        },
        masternode: MasternodeParams {
            miner_threads: 1,
            ..test.masternode.clone()
        },
        flags: PolicyFlags {
            mining_requires_peers: false,
            allow_min_difficulty_blocks: true,
            default_consistency_checks: true,
            require_standard: false,
            mine_blocks_on_demand: true,
            testnet_to_be_deprecated_field_rpc: false,
            ..test.flags.clone()
        },

        genesis,
        genesis_hash,
        genesis_check,
        checkpoints: genesis_only_checkpoints(genesis_hash, 1_454_124_731, 100.0),

        ..test.clone()
    }
}

/// The unit test network parameters, derived from `main`.
///
/// Shares the main genesis block and checkpoints.
fn unittest_params(main: &NetworkParameters) -> NetworkParameters {
    NetworkParameters {
        network: NetworkId::UnitTest,
        magic: magics::UNITTEST,
        default_port: ports::UNITTEST,
        bootstrap: BootstrapData {
            dns_seeds: Vec::new(),
            fixed_seeds: Vec::new(),
        },
        flags: PolicyFlags {
            mining_requires_peers: false,
            default_consistency_checks: true,
            allow_min_difficulty_blocks: false,
            mine_blocks_on_demand: true,
            ..main.flags.clone()
        },
        checkpoints: Arc::clone(&main.checkpoints),
        ..main.clone()
    }
}

/// A registered parameter set.
///
/// Only the unit test network is stored in a lock, so only it can change
/// after construction.
#[derive(Debug)]
pub enum ParameterEntry {
    /// Parameters fixed at construction.
    Immutable(NetworkParameters),
    /// Parameters that unit tests may modify.
    TestMutable(RwLock<NetworkParameters>),
}

impl ParameterEntry {
    fn new(params: NetworkParameters) -> ParameterEntry {
        match params.network {
            NetworkId::UnitTest => ParameterEntry::TestMutable(RwLock::new(params)),
            NetworkId::Main | NetworkId::Test | NetworkId::RegTest => {
                ParameterEntry::Immutable(params)
            }
        }
    }

    /// Read the parameters.
    pub fn read(&self) -> ParamsRef<'_> {
        match self {
            ParameterEntry::Immutable(params) => ParamsRef::Fixed(params),
            ParameterEntry::TestMutable(lock) => ParamsRef::Locked(lock.read()),
        }
    }

    /// Returns `true` if these parameters can be modified.
    pub fn is_mutable(&self) -> bool {
        matches!(self, ParameterEntry::TestMutable(_))
    }
}

/// A read-only view of a network's parameters.
///
/// A view of the unit test network holds a read lock. Don't hold one while
/// modifying that network on the same thread.
pub enum ParamsRef<'a> {
    /// An immutable parameter set.
    Fixed(&'a NetworkParameters),
    /// A locked, mutable parameter set.
    Locked(RwLockReadGuard<'a, NetworkParameters>),
}

impl Deref for ParamsRef<'_> {
    type Target = NetworkParameters;

    fn deref(&self) -> &NetworkParameters {
        match self {
            ParamsRef::Fixed(params) => params,
            ParamsRef::Locked(guard) => guard,
        }
    }
}

impl std::fmt::Debug for ParamsRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (**self).fmt(f)
    }
}

/// Write access to the unit test network's parameters.
///
/// Only the fields that unit tests need to change have setters.
pub struct MutableParams<'a>(RwLockWriteGuard<'a, NetworkParameters>);

impl MutableParams<'_> {
    /// Set the number of blocks between subsidy halvings.
    pub fn set_subsidy_halving_interval(&mut self, interval: u32) {
        tracing::debug!(interval, "unit test subsidy halving interval changed");
        self.0.pow.subsidy_halving_interval = interval;
    }

    /// Set the block upgrade enforcement majority.
    pub fn set_enforce_block_upgrade_majority(&mut self, majority: u32) {
        self.0.consensus.enforce_block_upgrade_majority = majority;
    }

    /// Set the outdated block rejection majority.
    pub fn set_reject_block_outdated_majority(&mut self, majority: u32) {
        self.0.consensus.reject_block_outdated_majority = majority;
    }

    /// Set the number of blocks counted for the majority checks.
    pub fn set_to_check_block_upgrade_majority(&mut self, blocks: u32) {
        self.0.consensus.to_check_block_upgrade_majority = blocks;
    }

    /// Enable or disable the default self-consistency checks.
    pub fn set_default_consistency_checks(&mut self, enabled: bool) {
        self.0.flags.default_consistency_checks = enabled;
    }

    /// Allow or forbid minimum difficulty blocks.
    pub fn set_allow_min_difficulty_blocks(&mut self, allowed: bool) {
        self.0.flags.allow_min_difficulty_blocks = allowed;
    }

    /// Skip or perform proof-of-work checks.
    pub fn set_skip_proof_of_work_check(&mut self, skip: bool) {
        self.0.flags.skip_proof_of_work_check = skip;
    }
}

impl Deref for MutableParams<'_> {
    type Target = NetworkParameters;

    fn deref(&self) -> &NetworkParameters {
        &self.0
    }
}

/// The parameters of every network, built once at startup.
#[derive(Debug)]
pub struct ParameterRegistry {
    /// Indexed by [`NetworkId`] declaration order.
    entries: [ParameterEntry; 4],
}

impl ParameterRegistry {
    /// Build and verify every network's parameters.
    ///
    /// `hasher` computes block header hashes.
    ///
    /// # Panics
    ///
    /// If a genesis block fails verification.
    pub fn new(hasher: &dyn BlockHasher) -> ParameterRegistry {
        let main = main_params(hasher);
        let test = test_params(&main, hasher);
        let regtest = regtest_params(&test, hasher);
        let unittest = unittest_params(&main);

        let registry = ParameterRegistry {
            entries: [main, test, regtest, unittest].map(ParameterEntry::new),
        };

        for network in NetworkId::iter() {
            let params = registry.get(network);
            assert_eq!(
                params.network, network,
                "parameter sets must be registered in network order"
            );

            tracing::info!(
                %network,
                genesis_hash = %params.genesis_hash,
                checkpoints = params.checkpoints.checkpoints.len(),
                "registered network parameters"
            );
            tracing::debug!(
                %network,
                dns_seeds = params.bootstrap.dns_seeds.len(),
                fixed_seeds = params.bootstrap.fixed_seeds.len(),
                "registered bootstrap seeds"
            );
        }

        registry
    }

    fn entry(&self, network: NetworkId) -> &ParameterEntry {
        &self.entries[network.index()]
    }

    /// The parameters of `network`.
    pub fn get(&self, network: NetworkId) -> ParamsRef<'_> {
        self.entry(network).read()
    }

    /// Write access to `network`'s parameters, if it is the unit test network.
    pub fn mutable(&self, network: NetworkId) -> Option<MutableParams<'_>> {
        match self.entry(network) {
            ParameterEntry::TestMutable(lock) => Some(MutableParams(lock.write())),
            ParameterEntry::Immutable(_) => None,
        }
    }

    /// Returns `true` if `network`'s parameters can be modified.
    pub fn is_mutable(&self, network: NetworkId) -> bool {
        self.entry(network).is_mutable()
    }
}
