//! Feature activation markers.
//!
//! Each marker is a height or time after which a consensus feature takes
//! effect. Markers are declared here and enforced by the consensus code.
//! A `None` marker is never activated.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::block::Height;

/// Block heights at which features activate.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ActivationHeights {
    /// The wallet fork.
    pub wallet_fork: Option<Height>,
    /// The switch to the new difficulty adjustment algorithm.
    pub difficulty_fork: Option<Height>,
    /// The first block that may contain zerocoin transactions.
    pub zerocoin_start: Option<Height>,
    /// The switch to version 2 zerocoin spends.
    pub zerocoin_v2: Option<Height>,
    /// The first block that enforces the zerocoin serial range.
    pub enforce_serial_range: Option<Height>,
    /// The block that triggers a recalculation of the accumulators.
    pub recalculate_accumulators: Option<Height>,
    /// The first block where fraudulent serials appeared.
    pub first_fraudulent: Option<Height>,
    /// The last block with a valid accumulator checkpoint.
    pub last_good_checkpoint: Option<Height>,
    /// The first block that enforces the invalid UTXO list.
    pub enforce_invalid_utxo: Option<Height>,
}

/// Times at which features activate.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ActivationTimes {
    /// The earliest time zerocoin transactions are accepted.
    pub zerocoin_start: Option<DateTime<Utc>>,
    /// Sporks signed after this time must use the current spork key.
    pub enforce_new_spork_key: Option<DateTime<Utc>>,
    /// Sporks signed with the legacy key are rejected after this time.
    pub reject_old_spork_key: Option<DateTime<Utc>>,
    /// Masternode payments start at this time.
    pub masternode_payments_start: Option<DateTime<Utc>>,
}

/// Every activation marker of a network.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ActivationSchedule {
    /// Height-based markers.
    pub heights: ActivationHeights,
    /// Time-based markers.
    pub times: ActivationTimes,
}

/// Returns `true` if `marker` is set and `height` is at or above it.
pub fn height_reached(marker: Option<Height>, height: Height) -> bool {
    marker.is_some_and(|activation| height >= activation)
}

/// Returns `true` if `marker` is set and `time` is at or after it.
pub fn time_reached(marker: Option<DateTime<Utc>>, time: DateTime<Utc>) -> bool {
    marker.is_some_and(|activation| time >= activation)
}

impl ActivationHeights {
    /// Is the wallet fork active at `height`?
    pub fn wallet_fork_active_at(&self, height: Height) -> bool {
        height_reached(self.wallet_fork, height)
    }

    /// Is the new difficulty algorithm active at `height`?
    pub fn difficulty_fork_active_at(&self, height: Height) -> bool {
        height_reached(self.difficulty_fork, height)
    }

    /// Is zerocoin active at `height`?
    pub fn zerocoin_active_at(&self, height: Height) -> bool {
        height_reached(self.zerocoin_start, height)
    }

    /// Are version 2 zerocoin spends active at `height`?
    pub fn zerocoin_v2_active_at(&self, height: Height) -> bool {
        height_reached(self.zerocoin_v2, height)
    }

    /// Is the serial range enforced at `height`?
    pub fn serial_range_enforced_at(&self, height: Height) -> bool {
        height_reached(self.enforce_serial_range, height)
    }

    /// Is the invalid UTXO list enforced at `height`?
    pub fn invalid_utxo_enforced_at(&self, height: Height) -> bool {
        height_reached(self.enforce_invalid_utxo, height)
    }

    /// Is `height` inside the window where fraudulent serials were accepted?
    ///
    /// The window starts at the first fraudulent block and ends before the
    /// accumulator recalculation.
    pub fn in_fraudulent_window(&self, height: Height) -> bool {
        height_reached(self.first_fraudulent, height)
            && !height_reached(self.recalculate_accumulators, height)
    }
}

impl ActivationTimes {
    /// Must sporks signed at `time` use the current key?
    pub fn new_spork_key_enforced_at(&self, time: DateTime<Utc>) -> bool {
        time_reached(self.enforce_new_spork_key, time)
    }

    /// Is the legacy spork key rejected at `time`?
    pub fn old_spork_key_rejected_at(&self, time: DateTime<Utc>) -> bool {
        time_reached(self.reject_old_spork_key, time)
    }

    /// Are masternode payments active at `time`?
    pub fn masternode_payments_active_at(&self, time: DateTime<Utc>) -> bool {
        time_reached(self.masternode_payments_start, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(timestamp: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(timestamp, 0).expect("valid test timestamp")
    }

    #[test]
    fn unset_markers_never_activate() {
        let _init_guard = kyd_test::init();

        let schedule = ActivationSchedule::default();

        assert!(!schedule.heights.zerocoin_active_at(Height(u32::MAX)));
        assert!(!schedule.heights.in_fraudulent_window(Height(u32::MAX)));
        assert!(!schedule.times.masternode_payments_active_at(DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn markers_activate_at_their_height() {
        let _init_guard = kyd_test::init();

        let heights = ActivationHeights {
            wallet_fork: Some(Height(275)),
            first_fraudulent: Some(Height(100)),
            recalculate_accumulators: Some(Height(200)),
            ..Default::default()
        };

        assert!(!heights.wallet_fork_active_at(Height(274)));
        assert!(heights.wallet_fork_active_at(Height(275)));

        assert!(!heights.in_fraudulent_window(Height(99)));
        assert!(heights.in_fraudulent_window(Height(100)));
        assert!(heights.in_fraudulent_window(Height(199)));
        assert!(!heights.in_fraudulent_window(Height(200)));
    }

    #[test]
    fn markers_activate_at_their_time() {
        let _init_guard = kyd_test::init();

        let times = ActivationTimes {
            enforce_new_spork_key: Some(at(1_550_880_000)),
            reject_old_spork_key: Some(at(1_550_900_000)),
            ..Default::default()
        };

        assert!(!times.new_spork_key_enforced_at(at(1_550_879_999)));
        assert!(times.new_spork_key_enforced_at(at(1_550_880_000)));
        assert!(!times.old_spork_key_rejected_at(at(1_550_880_000)));
        assert!(times.old_spork_key_rejected_at(at(1_550_900_000)));
    }
}
