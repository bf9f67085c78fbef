//! Network `Magic` type and implementation.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::parameters::{constants::magics, NetworkId};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

/// A magic number identifying the network.
///
/// Prepended to every P2P message, so that nodes on different networks
/// reject each other's traffic.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Magic(pub [u8; 4]);

impl fmt::Debug for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Magic").field(&hex::encode(self.0)).finish()
    }
}

impl Serialize for Magic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl NetworkId {
    /// Get the magic value associated to this `NetworkId`.
    pub fn magic(&self) -> Magic {
        match self {
            NetworkId::Main => magics::MAINNET,
            NetworkId::Test => magics::TESTNET,
            NetworkId::RegTest => magics::REGTEST,
            NetworkId::UnitTest => magics::UNITTEST,
        }
    }
}

#[cfg(test)]
mod magic_proptest {

    use proptest::prelude::*;

    use super::{magics, Magic};

    #[test]
    fn magic_debug() {
        let _init_guard = kyd_test::init();

        assert_eq!(format!("{:?}", magics::MAINNET), "Magic(\"a5c2d1e6\")");
        assert_eq!(format!("{:?}", magics::TESTNET), "Magic(\"53647586\")");
        assert_eq!(format!("{:?}", magics::REGTEST), "Magic(\"14549564\")");
    }

    /// The message start bytes must never decode as UTF-8 text.
    #[test]
    fn magics_are_not_utf8() {
        let _init_guard = kyd_test::init();

        for magic in [magics::MAINNET, magics::TESTNET, magics::REGTEST] {
            assert!(
                std::str::from_utf8(&magic.0).is_err(),
                "{magic:?} must not be valid UTF-8"
            );
        }
    }

    /// Test that NetworkId::magic() returns the correct magic for each network.
    #[test]
    fn network_magic() {
        use crate::parameters::NetworkId;

        let _init_guard = kyd_test::init();

        assert_eq!(NetworkId::Main.magic(), magics::MAINNET);
        assert_eq!(NetworkId::Test.magic(), magics::TESTNET);
        assert_eq!(NetworkId::RegTest.magic(), magics::REGTEST);
        // The unit test network never talks to peers, so it reuses mainnet's magic.
        assert_eq!(NetworkId::UnitTest.magic(), magics::MAINNET);

        assert_ne!(NetworkId::Main.magic(), NetworkId::Test.magic());
        assert_ne!(NetworkId::Main.magic(), NetworkId::RegTest.magic());
        assert_ne!(NetworkId::Test.magic(), NetworkId::RegTest.magic());
    }

    proptest! {

        #[test]
        fn proptest_magic_from_array(data in any::<[u8; 4]>()) {
            let _init_guard = kyd_test::init();

            assert_eq!(format!("{:?}", Magic(data)), format!("Magic({:x?})", hex::encode(data)));
        }
    }
}
