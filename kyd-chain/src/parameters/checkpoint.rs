//! Checkpoint tables.
//!
//! A checkpoint is a trusted `(height, hash)` pair. Collaborators use the
//! table to reject alternate chains below the last checkpoint and to
//! estimate how much of the chain is left to verify.
//!
//! A good checkpoint block is surrounded by blocks with reasonable
//! timestamps (none before it with a later timestamp, none after it with an
//! earlier one) and contains no unusual transactions. That policy is applied
//! when the tables are written, not checked here.

use std::{
    collections::{BTreeMap, HashSet},
    ops::RangeBounds,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::block::{self, Height};

/// The cost of verifying a transaction after the last checkpoint, relative
/// to one before it, when signatures are checked.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// An error building a [`CheckpointList`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CheckpointError {
    /// Heights must be strictly increasing.
    #[error("checkpoint heights must strictly increase: {height} follows {previous}")]
    NotIncreasing {
        /// The height before the bad entry.
        previous: Height,
        /// The bad entry.
        height: Height,
    },

    /// The list does not start with the genesis block.
    #[error("checkpoint list must start at the genesis height")]
    MissingGenesis,

    /// The same hash is listed at two heights.
    #[error("checkpoint hash {0} appears more than once")]
    DuplicateHash(block::Hash),
}

/// An ordered mapping from height to expected block hash.
///
/// Heights strictly increase, the first height is 0, and each hash appears
/// once.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CheckpointList(BTreeMap<Height, block::Hash>);

impl CheckpointList {
    /// Build a checkpoint list from `(height, hash)` pairs, in height order.
    pub fn from_list(
        list: impl IntoIterator<Item = (Height, block::Hash)>,
    ) -> Result<CheckpointList, CheckpointError> {
        let mut checkpoints = BTreeMap::new();
        let mut hashes = HashSet::new();
        let mut previous: Option<Height> = None;

        for (height, hash) in list {
            match previous {
                None if height != Height::MIN => return Err(CheckpointError::MissingGenesis),
                Some(previous) if height <= previous => {
                    return Err(CheckpointError::NotIncreasing { previous, height })
                }
                _ => {}
            }

            if !hashes.insert(hash) {
                return Err(CheckpointError::DuplicateHash(hash));
            }

            checkpoints.insert(height, hash);
            previous = Some(height);
        }

        if checkpoints.is_empty() {
            return Err(CheckpointError::MissingGenesis);
        }

        Ok(CheckpointList(checkpoints))
    }

    /// Parse a hard-coded list of heights and display-order hashes.
    ///
    /// # Panics
    ///
    /// If the table is invalid.
    pub(crate) fn from_static(list: &[(u32, &str)]) -> CheckpointList {
        let parsed = list.iter().map(|(height, hash)| {
            (
                Height(*height),
                hash.parse()
                    .expect("hard-coded checkpoint hash must be valid hex"),
            )
        });

        CheckpointList::from_list(parsed).expect("hard-coded checkpoint list must be valid")
    }

    /// The hash of the genesis block.
    pub fn genesis_hash(&self) -> block::Hash {
        *self
            .0
            .get(&Height::MIN)
            .expect("checkpoint lists always contain the genesis height")
    }

    /// The hash at `height`, if it is a checkpoint.
    pub fn hash(&self, height: Height) -> Option<block::Hash> {
        self.0.get(&height).copied()
    }

    /// Is `height` a checkpoint?
    pub fn contains(&self, height: Height) -> bool {
        self.0.contains_key(&height)
    }

    /// The highest checkpoint height.
    pub fn max_height(&self) -> Height {
        *self
            .0
            .keys()
            .next_back()
            .expect("checkpoint lists are never empty")
    }

    /// The highest checkpoint at or below `height`.
    pub fn last_at_or_below(&self, height: Height) -> Option<(Height, block::Hash)> {
        self.0
            .range(..=height)
            .next_back()
            .map(|(height, hash)| (*height, *hash))
    }

    /// Iterate over the checkpoints within `range`, in height order.
    pub fn range<R: RangeBounds<Height>>(
        &self,
        range: R,
    ) -> impl DoubleEndedIterator<Item = (&Height, &block::Hash)> {
        self.0.range(range)
    }

    /// Iterate over every checkpoint, in height order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Height, &block::Hash)> {
        self.0.iter()
    }

    /// The number of checkpoints.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checkpoint lists always have a genesis entry.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A checkpoint table, with the statistics used to estimate sync progress.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckpointData {
    /// The checkpoints.
    pub checkpoints: CheckpointList,
    /// The time of the newest checkpoint block.
    pub last_checkpoint_time: DateTime<Utc>,
    /// The number of transactions from genesis up to the newest checkpoint.
    pub transactions_at_last_checkpoint: u64,
    /// The estimated number of transactions per day after the newest checkpoint.
    pub transactions_per_day: f64,
}

impl CheckpointData {
    /// The expected hash at `height`, if it is a checkpoint.
    pub fn hash(&self, height: Height) -> Option<block::Hash> {
        self.checkpoints.hash(height)
    }

    /// Is `height` a checkpoint?
    pub fn contains(&self, height: Height) -> bool {
        self.checkpoints.contains(height)
    }

    /// The highest checkpoint height, a lower bound on the chain length.
    pub fn max_height(&self) -> Height {
        self.checkpoints.max_height()
    }

    /// Returns `false` only if `height` is a checkpoint and `hash` differs
    /// from the recorded hash.
    pub fn check_block(&self, height: Height, hash: block::Hash) -> bool {
        self.hash(height).map_or(true, |expected| expected == hash)
    }

    /// The highest checkpoint at or below `height`.
    ///
    /// Reorganizations must not replace blocks at or below this checkpoint.
    pub fn last_checkpoint_below(&self, height: Height) -> Option<(Height, block::Hash)> {
        self.checkpoints.last_at_or_below(height)
    }

    /// Estimate the fraction of verification work already done, in `[0, 1]`.
    ///
    /// `chain_tx` is the number of transactions from genesis to the tip, and
    /// `tip_time` is the tip block's time. Transactions before the last
    /// checkpoint cost 1 unit each. Transactions after it cost
    /// [`SIGCHECK_VERIFICATION_FACTOR`] units when `sigchecks` is set. The
    /// remaining volume is extrapolated from `transactions_per_day`.
    pub fn guess_verification_progress(
        &self,
        chain_tx: u64,
        tip_time: DateTime<Utc>,
        now: DateTime<Utc>,
        sigchecks: bool,
    ) -> f64 {
        let factor = if sigchecks {
            SIGCHECK_VERIFICATION_FACTOR
        } else {
            1.0
        };
        let days_since = |time: DateTime<Utc>| {
            ((now - time).num_seconds().max(0) as f64) / SECONDS_PER_DAY
        };

        let checkpoint_tx = self.transactions_at_last_checkpoint;

        let (work_before, work_after) = if chain_tx <= checkpoint_tx {
            let cheap_before = chain_tx as f64;
            let cheap_after = (checkpoint_tx - chain_tx) as f64;
            let expensive_after =
                days_since(self.last_checkpoint_time) * self.transactions_per_day;

            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = checkpoint_tx as f64;
            let expensive_before = (chain_tx - checkpoint_tx) as f64;
            let expensive_after = days_since(tip_time) * self.transactions_per_day;

            (
                cheap_before + expensive_before * factor,
                expensive_after * factor,
            )
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            // Nothing to verify on either side.
            return 1.0;
        }

        work_before / total
    }
}
