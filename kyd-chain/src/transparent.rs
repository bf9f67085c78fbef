//! Transparent-related (Bitcoin-inherited) functionality.

mod script;

pub use script::{opcodes, Script, ScriptNum};
