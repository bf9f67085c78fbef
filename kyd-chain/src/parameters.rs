//! Chain parameters for the KYD networks.
//!
//! The node builds every network's parameters once with [`init`], selects
//! the network it runs on, and reads the selected parameters from then on.
//!
//! ```ignore
//! let selector = kyd_chain::parameters::init(&quark_hasher);
//! selector.select_from_identifier_or_default(config_network.as_deref())?;
//! let port = selector.active().default_port;
//! ```

pub mod activation;
pub mod checkpoint;
pub mod constants;
pub mod seeds;

mod config;
mod network;
mod params;
mod registry;
mod selector;

pub use config::Config;
pub use network::{magic::Magic, NetworkId, SelectionError, UnknownNetwork};
pub use params::{
    Base58Prefixes, Base58Type, BootstrapData, ConsensusThresholds, MasternodeParams,
    NetworkParameters, PolicyFlags, PowParams, SporkKeys, ZerocoinParams,
};
pub use registry::{MutableParams, ParameterEntry, ParameterRegistry, ParamsRef};
pub use selector::{
    active_network_id, checkpoints, global, init, is_unittest_mutable, modifiable_params, params,
    select_from_identifier_or_default, select_params, select_params_from_flags, NetworkSelector,
};
