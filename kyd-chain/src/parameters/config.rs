//! The network section of the node configuration.

use serde::{Deserialize, Serialize};

use crate::parameters::{NetworkId, NetworkSelector};

/// Network configuration.
///
/// Meant to be embedded in the node's TOML config file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The network to join: `main`, `test`, `regtest` or `unittest`.
    pub network: NetworkId,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            network: NetworkId::Main,
        }
    }
}

impl Config {
    /// Select the configured network on `selector`.
    pub fn select(&self, selector: &NetworkSelector) -> NetworkId {
        selector.select(self.network);
        self.network
    }
}
