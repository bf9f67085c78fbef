//! Proof-of-work and proof-of-stake difficulty types.

pub mod difficulty;
