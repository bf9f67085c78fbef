//! Core KYD chain parameters.
//!
//! This crate is the single source of truth for the constants that distinguish
//! the KYD networks: message magic, ports, address prefixes, consensus
//! thresholds, feature activation markers, genesis blocks, checkpoints and
//! bootstrap seeds.
//!
//! The node selects one network at startup, and every other subsystem reads
//! the active [`parameters::NetworkParameters`] through the
//! [`parameters::NetworkSelector`].

#![doc(html_root_url = "https://docs.rs/kyd_chain")]
#![deny(missing_docs)]

pub mod block;
pub mod parameters;
pub mod serialization;
pub mod transaction;
pub mod transparent;
pub mod work;

/// An amount of KYD in base units.
pub type Amount = i64;

/// The number of base units in one KYD.
pub const COIN: Amount = 100_000_000;

/// The number of base units in one hundredth of a KYD.
pub const CENT: Amount = 1_000_000;
