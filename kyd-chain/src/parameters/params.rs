//! The per-network parameter set.
//!
//! Every field is plain data. Networks that derive from another network are
//! built by copying the base set and overriding fields, see
//! [`ParameterRegistry`](super::ParameterRegistry).

use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use crate::{
    block::{self, genesis::GenesisCheck, Block, Height},
    parameters::{
        activation::ActivationSchedule,
        checkpoint::CheckpointData,
        network::magic::Magic,
        seeds::{DnsSeed, SeedAddress},
        NetworkId,
    },
    work::difficulty::ExpandedDifficulty,
    Amount,
};

/// Proof-of-work and proof-of-stake bounds and timing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PowParams {
    /// The easiest allowed proof-of-work target.
    pub pow_limit: ExpandedDifficulty,
    /// The easiest allowed proof-of-stake target.
    pub pos_limit: ExpandedDifficulty,
    /// The number of blocks between subsidy halvings.
    pub subsidy_halving_interval: u32,
    /// The difficulty adjustment timespan, in seconds.
    pub target_timespan_secs: i64,
    /// The target time between proof-of-work blocks, in seconds.
    pub target_spacing_secs: i64,
    /// The target time between proof-of-stake blocks, in seconds.
    pub pos_target_spacing_secs: i64,
    /// The height where proof-of-stake difficulty switches to Dark Gravity Wave.
    pub pos_dgw_fork_height: Height,
    /// The last block that may be mined with proof-of-work.
    pub last_pow_height: Height,
    /// The height where the stake modifier calculation changes.
    pub modifier_update_height: Height,
}

impl PowParams {
    /// The difficulty adjustment timespan.
    pub fn target_timespan(&self) -> Duration {
        Duration::seconds(self.target_timespan_secs)
    }

    /// The target time between proof-of-work blocks.
    pub fn target_spacing(&self) -> Duration {
        Duration::seconds(self.target_spacing_secs)
    }

    /// The target time between proof-of-stake blocks.
    pub fn pos_target_spacing(&self) -> Duration {
        Duration::seconds(self.pos_target_spacing_secs)
    }

    /// The number of blocks in a difficulty adjustment interval.
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.target_timespan_secs / self.target_spacing_secs
    }
}

/// Block version majority thresholds and chain depth limits.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ConsensusThresholds {
    /// New version blocks are enforced once this many of the last
    /// `to_check_block_upgrade_majority` blocks are upgraded.
    pub enforce_block_upgrade_majority: u32,
    /// Old version blocks are rejected once this many of the last
    /// `to_check_block_upgrade_majority` blocks are upgraded.
    pub reject_block_outdated_majority: u32,
    /// The number of recent blocks counted for the majority checks.
    pub to_check_block_upgrade_majority: u32,
    /// The number of confirmations before a coinbase or coinstake can be spent.
    pub coinbase_maturity: u32,
    /// The deepest reorganization the node accepts.
    pub max_reorganization_depth: u32,
}

/// The kinds of Base58Check version prefix.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Base58Type {
    /// Pay-to-public-key-hash addresses.
    PubkeyAddress,
    /// Pay-to-script-hash addresses.
    ScriptAddress,
    /// Private keys.
    SecretKey,
    /// BIP32 extended public keys.
    ExtPublicKey,
    /// BIP32 extended private keys.
    ExtSecretKey,
    /// The BIP44 coin type.
    ExtCoinType,
}

/// Base58Check version prefixes, which set an encoding's leading characters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Base58Prefixes {
    /// Pay-to-public-key-hash addresses.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub pubkey_address: Vec<u8>,
    /// Pay-to-script-hash addresses.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub script_address: Vec<u8>,
    /// Private keys.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub secret_key: Vec<u8>,
    /// BIP32 extended public keys.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub ext_public_key: [u8; 4],
    /// BIP32 extended private keys.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub ext_secret_key: [u8; 4],
    /// The BIP44 coin type, with the hardened bit set.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub ext_coin_type: [u8; 4],
}

impl Base58Prefixes {
    /// The prefix bytes for `kind`.
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
            Base58Type::ExtCoinType => &self.ext_coin_type,
        }
    }
}

/// Peer discovery data.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BootstrapData {
    /// DNS seeders, queried for peer addresses.
    pub dns_seeds: Vec<DnsSeed>,
    /// Compiled-in peer addresses, used when DNS seeding fails.
    pub fixed_seeds: Vec<SeedAddress>,
}

/// Masternode and budget constants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MasternodeParams {
    /// The allowed drift in the masternode count.
    pub count_drift: u32,
    /// The maximum number of transactions in an obfuscation pool.
    pub pool_max_transactions: u32,
    /// Confirmations required for a budget finalization fee.
    pub budget_fee_confirmations: u32,
    /// The address that dummy obfuscation transactions pay to.
    pub obfuscation_pool_dummy_address: String,
    /// The default number of mining threads, or 0 for one per core.
    pub miner_threads: u32,
}

/// The spork signing keys, hex-encoded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SporkKeys {
    /// The key sporks must be signed with.
    pub current: String,
    /// The key accepted until the legacy key is rejected.
    pub legacy: String,
}

impl SporkKeys {
    /// Decode the current key.
    pub fn current_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.current)
    }

    /// Decode the legacy key.
    pub fn legacy_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.legacy)
    }
}

/// Zerocoin constants. The accumulator math lives elsewhere.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ZerocoinParams {
    /// The accumulator modulus, as a decimal string.
    pub modulus: String,
    /// The maximum number of zerocoin spends in one transaction.
    pub max_spends_per_transaction: u32,
    /// The minimum fee for a zerocoin mint.
    pub min_mint_fee: Amount,
    /// Confirmations before a mint can be accumulated.
    pub mint_required_confirmations: u32,
    /// The number of accumulations required before spending.
    pub required_accumulation: u32,
    /// The default accumulator security level.
    pub default_security_level: u32,
    /// The block header version required once zerocoin is active.
    pub header_version: i32,
    /// Confirmations before a zerocoin mint can stake.
    pub required_stake_depth: u32,
}

/// Behavioral switches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PolicyFlags {
    /// Mining waits for peer connections.
    pub mining_requires_peers: bool,
    /// Minimum difficulty blocks are allowed after a long gap.
    pub allow_min_difficulty_blocks: bool,
    /// Expensive self-consistency checks run by default.
    pub default_consistency_checks: bool,
    /// Only standard transactions are relayed and mined.
    pub require_standard: bool,
    /// Blocks can be mined on request, without waiting for the target spacing.
    pub mine_blocks_on_demand: bool,
    /// Proof-of-work is not checked.
    pub skip_proof_of_work_check: bool,
    /// RPC output includes the deprecated `testnet` field.
    pub testnet_to_be_deprecated_field_rpc: bool,
    /// Headers-first synchronization is active.
    pub headers_first_syncing_active: bool,
}

/// Every constant that distinguishes a KYD network.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkParameters {
    /// The network these parameters belong to.
    pub network: NetworkId,
    /// The P2P message start bytes.
    pub magic: Magic,
    /// The default P2P listening port.
    pub default_port: u16,
    /// The public key that signs network alerts.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub alert_public_key: Vec<u8>,

    /// Proof-of-work and proof-of-stake bounds.
    pub pow: PowParams,
    /// Majority thresholds and depth limits.
    pub consensus: ConsensusThresholds,
    /// Feature activation markers.
    pub activation: ActivationSchedule,
    /// Address encoding prefixes.
    pub prefixes: Base58Prefixes,
    /// Peer discovery data.
    pub bootstrap: BootstrapData,

    /// The maximum total supply.
    pub max_money_out: Amount,
    /// Invalid coins filtered through exchanges that are treated as valid.
    pub invalid_amount_filtered: Amount,

    /// Masternode and budget constants.
    pub masternode: MasternodeParams,
    /// Spork signing keys.
    pub spork: SporkKeys,
    /// Zerocoin constants.
    pub zerocoin: ZerocoinParams,
    /// Behavioral switches.
    pub flags: PolicyFlags,

    /// The genesis block.
    pub genesis: Arc<Block>,
    /// The hash of the genesis block.
    pub genesis_hash: block::Hash,
    /// How the genesis block was checked.
    pub genesis_check: GenesisCheck,
    /// The checkpoint table.
    pub checkpoints: Arc<CheckpointData>,
}

impl NetworkParameters {
    /// The network name, as used on the command line and in RPC output.
    pub fn name(&self) -> &'static str {
        self.network.name()
    }

    /// Returns `true` for every network except mainnet.
    pub fn is_test_network(&self) -> bool {
        self.network.is_a_test_network()
    }

    /// The Base58Check prefix for `kind`.
    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.prefixes.get(kind)
    }

    /// Is `amount` a valid money amount on this network?
    pub fn money_range(&self, amount: Amount) -> bool {
        (0..=self.max_money_out).contains(&amount)
    }
}
