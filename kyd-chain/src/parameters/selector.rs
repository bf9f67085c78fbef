//! Selection of the active network.
//!
//! A [`NetworkSelector`] owns the [`ParameterRegistry`] and records which
//! network the node runs on. Code that can take a context should receive a
//! `&NetworkSelector`. Code that can't uses the process-wide selector
//! installed by [`init`].
//!
//! Selection is written during startup and read by every subsystem after
//! that. Changing the selection while other threads read it is unsupported,
//! except in single-threaded unit test harnesses.

use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

use once_cell::sync::OnceCell;

use crate::{
    block::BlockHasher,
    parameters::{
        checkpoint::CheckpointData,
        network::{NetworkId, SelectionError, UnknownNetwork},
        registry::{MutableParams, ParameterRegistry, ParamsRef},
    },
};

/// The selection state value for "no network selected".
const UNSELECTED: u8 = 0;

/// The registry, and the network the node is running on.
#[derive(Debug)]
pub struct NetworkSelector {
    registry: ParameterRegistry,
    /// [`UNSELECTED`], or the selected network's index plus one.
    selected: AtomicU8,
}

impl NetworkSelector {
    /// Create a selector with no network selected.
    pub fn new(registry: ParameterRegistry) -> NetworkSelector {
        NetworkSelector {
            registry,
            selected: AtomicU8::new(UNSELECTED),
        }
    }

    /// The registry of every network's parameters.
    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    /// Select `network`, replacing any previous selection.
    pub fn select(&self, network: NetworkId) {
        let state = u8::try_from(network.index() + 1)
            .expect("network indexes are small enough for the selection state");

        let previous = self.selected.swap(state, Ordering::AcqRel);
        let previous = decode(previous);

        tracing::info!(%network, ?previous, "selected network parameters");
    }

    /// Select a network from the node's `-testnet` and `-regtest` switches.
    ///
    /// On error, the selection is unchanged.
    pub fn select_from_flags(
        &self,
        testnet: bool,
        regtest: bool,
    ) -> Result<NetworkId, SelectionError> {
        let network = NetworkId::from_flags(testnet, regtest)?;
        self.select(network);

        Ok(network)
    }

    /// Select a network from an identifier supplied by the user.
    ///
    /// `None` selects mainnet. An unrecognized identifier is returned as an
    /// error, and leaves the selection unchanged.
    pub fn select_from_identifier_or_default(
        &self,
        raw: Option<&str>,
    ) -> Result<NetworkId, UnknownNetwork> {
        let network = match raw {
            Some(raw) => raw.parse::<NetworkId>().map_err(|error: UnknownNetwork| {
                tracing::warn!(%error, "network selection failed");
                error
            })?,
            None => NetworkId::Main,
        };

        self.select(network);

        Ok(network)
    }

    /// The selected network, if any.
    pub fn active_network_id(&self) -> Option<NetworkId> {
        decode(self.selected.load(Ordering::Acquire))
    }

    /// The selected network's parameters.
    ///
    /// # Panics
    ///
    /// If no network is selected.
    pub fn active(&self) -> ParamsRef<'_> {
        match self.active_network_id() {
            Some(network) => self.registry.get(network),
            None => panic!("network parameters were read before a network was selected"),
        }
    }

    /// The selected network's parameters, or `None` if no network is selected.
    pub fn try_active(&self) -> Option<ParamsRef<'_>> {
        self.active_network_id()
            .map(|network| self.registry.get(network))
    }

    /// Write access to the selected network's parameters.
    ///
    /// # Panics
    ///
    /// Unless the unit test network is selected.
    pub fn as_mutable(&self) -> MutableParams<'_> {
        match self.try_as_mutable() {
            Ok(params) => params,
            Err(error) => panic!("network parameters can't be modified: {error}"),
        }
    }

    /// Write access to the selected network's parameters, if it is the unit
    /// test network.
    pub fn try_as_mutable(&self) -> Result<MutableParams<'_>, SelectionError> {
        let network = self
            .active_network_id()
            .ok_or(SelectionError::Unselected)?;

        self.registry
            .mutable(network)
            .ok_or(SelectionError::NotMutable(network))
    }

    /// Returns `true` if the selected network's parameters can be modified.
    pub fn is_unittest_mutable(&self) -> bool {
        self.active_network_id()
            .is_some_and(|network| self.registry.is_mutable(network))
    }

    /// The selected network's checkpoints.
    ///
    /// # Panics
    ///
    /// If no network is selected.
    pub fn checkpoints(&self) -> Arc<CheckpointData> {
        Arc::clone(&self.active().checkpoints)
    }
}

fn decode(state: u8) -> Option<NetworkId> {
    match state {
        UNSELECTED => None,
        state => NetworkId::from_index(usize::from(state) - 1),
    }
}

/// The process-wide selector.
static GLOBAL: OnceCell<NetworkSelector> = OnceCell::new();

/// Build the registry and install the process-wide selector.
///
/// Only the first call builds anything. Later calls return the installed
/// selector and ignore `hasher`.
///
/// # Panics
///
/// If a genesis block fails verification.
pub fn init(hasher: &dyn BlockHasher) -> &'static NetworkSelector {
    GLOBAL.get_or_init(|| NetworkSelector::new(ParameterRegistry::new(hasher)))
}

/// The process-wide selector.
///
/// # Panics
///
/// If [`init`] has not been called.
pub fn global() -> &'static NetworkSelector {
    GLOBAL
        .get()
        .expect("network parameters must be initialized before use")
}

/// Select the process-wide network.
pub fn select_params(network: NetworkId) {
    global().select(network)
}

/// Select the process-wide network from the `-testnet` and `-regtest` switches.
pub fn select_params_from_flags(testnet: bool, regtest: bool) -> Result<NetworkId, SelectionError> {
    global().select_from_flags(testnet, regtest)
}

/// Select the process-wide network from a user-supplied identifier.
pub fn select_from_identifier_or_default(raw: Option<&str>) -> Result<NetworkId, UnknownNetwork> {
    global().select_from_identifier_or_default(raw)
}

/// The process-wide network's parameters.
///
/// # Panics
///
/// If no network is selected.
pub fn params() -> ParamsRef<'static> {
    global().active()
}

/// The process-wide network, if one is selected.
pub fn active_network_id() -> Option<NetworkId> {
    GLOBAL.get().and_then(NetworkSelector::active_network_id)
}

/// The process-wide network's checkpoints.
pub fn checkpoints() -> Arc<CheckpointData> {
    global().checkpoints()
}

/// Returns `true` if the process-wide network's parameters can be modified.
pub fn is_unittest_mutable() -> bool {
    GLOBAL
        .get()
        .is_some_and(NetworkSelector::is_unittest_mutable)
}

/// Write access to the process-wide unit test network's parameters.
///
/// # Panics
///
/// Unless the unit test network is selected.
pub fn modifiable_params() -> MutableParams<'static> {
    global().as_mutable()
}

#[cfg(test)]
mod tests;
