//! Network identifiers and selection errors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::parameters::constants::ports;

pub mod magic;

#[cfg(test)]
mod tests;

/// An enum describing the networks a KYD node may join.
///
/// Deserialization accepts the same identifiers as [`FromStr`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum NetworkId {
    /// The production mainnet.
    Main,
    /// The public testnet.
    Test,
    /// The local regression test network.
    RegTest,
    /// The in-process unit test network.
    ///
    /// This is the only network whose parameters may change after startup.
    UnitTest,
}

impl NetworkId {
    /// All networks, in declaration order.
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Main,
        NetworkId::Test,
        NetworkId::RegTest,
        NetworkId::UnitTest,
    ];

    /// Returns an iterator over all the networks.
    pub fn iter() -> impl Iterator<Item = NetworkId> {
        Self::ALL.into_iter()
    }

    /// The lowercase name of this network.
    pub fn name(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::RegTest => "regtest",
            NetworkId::UnitTest => "unittest",
        }
    }

    /// The default P2P listening port.
    pub fn default_port(&self) -> u16 {
        match self {
            NetworkId::Main => ports::MAINNET,
            NetworkId::Test => ports::TESTNET,
            NetworkId::RegTest => ports::REGTEST,
            NetworkId::UnitTest => ports::UNITTEST,
        }
    }

    /// Returns `true` for every network except `Main`.
    pub fn is_a_test_network(&self) -> bool {
        *self != NetworkId::Main
    }

    /// Picks a network from the node's `-testnet` and `-regtest` switches.
    ///
    /// Setting both is an error, not a silent choice of either.
    pub fn from_flags(testnet: bool, regtest: bool) -> Result<NetworkId, SelectionError> {
        match (testnet, regtest) {
            (true, true) => Err(SelectionError::ConflictingFlags),
            (true, false) => Ok(NetworkId::Test),
            (false, true) => Ok(NetworkId::RegTest),
            (false, false) => Ok(NetworkId::Main),
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    pub(crate) fn from_index(index: usize) -> Option<NetworkId> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkId {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkId::Main),
            "test" | "testnet" => Ok(NetworkId::Test),
            "regtest" => Ok(NetworkId::RegTest),
            "unittest" => Ok(NetworkId::UnitTest),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}

impl TryFrom<String> for NetworkId {
    type Error = UnknownNetwork;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An unrecognized network identifier, supplied from outside the node.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown network identifier: {0:?}")]
pub struct UnknownNetwork(pub String);

/// An error selecting or modifying the active network.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SelectionError {
    /// Both the testnet and regtest switches were set.
    #[error("-testnet and -regtest are mutually exclusive")]
    ConflictingFlags,

    /// The parameters of this network can't be modified.
    #[error("{0} network parameters are immutable")]
    NotMutable(NetworkId),

    /// No network is selected yet.
    #[error("no network has been selected")]
    Unselected,

    /// The identifier does not name a network.
    #[error(transparent)]
    Unknown(#[from] UnknownNetwork),
}
