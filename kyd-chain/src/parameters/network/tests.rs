use color_eyre::Report;
use proptest::prelude::*;

use super::{NetworkId, SelectionError, UnknownNetwork};

#[test]
fn network_names_round_trip() -> Result<(), Report> {
    let _init_guard = kyd_test::init();

    for network in NetworkId::iter() {
        let parsed: NetworkId = network.to_string().parse()?;
        assert_eq!(parsed, network);

        let parsed: NetworkId = network.to_string().to_uppercase().parse()?;
        assert_eq!(parsed, network);
    }

    assert_eq!("mainnet".parse::<NetworkId>()?, NetworkId::Main);
    assert_eq!("TestNet".parse::<NetworkId>()?, NetworkId::Test);
    assert_eq!(
        "signet".parse::<NetworkId>(),
        Err(UnknownNetwork("signet".to_string()))
    );

    Ok(())
}

#[test]
fn iter_and_ports() {
    let _init_guard = kyd_test::init();

    let all: Vec<_> = NetworkId::iter().collect();
    assert_eq!(
        all,
        [
            NetworkId::Main,
            NetworkId::Test,
            NetworkId::RegTest,
            NetworkId::UnitTest
        ]
    );

    assert_eq!(NetworkId::Main.default_port(), 12244);
    assert_eq!(NetworkId::Test.default_port(), 22244);
    assert_eq!(NetworkId::RegTest.default_port(), 32244);
    assert_eq!(NetworkId::UnitTest.default_port(), 30222);

    assert!(!NetworkId::Main.is_a_test_network());
    assert!(NetworkId::iter().skip(1).all(|n| n.is_a_test_network()));
}

#[test]
fn flags_select_networks() {
    let _init_guard = kyd_test::init();

    assert_eq!(NetworkId::from_flags(false, false), Ok(NetworkId::Main));
    assert_eq!(NetworkId::from_flags(true, false), Ok(NetworkId::Test));
    assert_eq!(NetworkId::from_flags(false, true), Ok(NetworkId::RegTest));
    assert_eq!(
        NetworkId::from_flags(true, true),
        Err(SelectionError::ConflictingFlags)
    );
}

#[test]
fn serde_names() -> Result<(), Report> {
    let _init_guard = kyd_test::init();

    assert_eq!(serde_json::to_string(&NetworkId::RegTest)?, "\"regtest\"");
    assert_eq!(
        serde_json::from_str::<NetworkId>("\"testnet\"")?,
        NetworkId::Test
    );
    assert!(serde_json::from_str::<NetworkId>("\"moon\"").is_err());

    // Config files and the command line accept the same identifiers.
    for raw in ["Main", "TestNet", "REGTEST", "unitTest"] {
        assert_eq!(
            serde_json::from_str::<NetworkId>(&format!("{raw:?}"))?,
            raw.parse::<NetworkId>()?
        );
    }

    Ok(())
}

proptest! {
    #[test]
    fn unknown_identifiers_are_reported(raw in "[a-z]{1,12}") {
        let _init_guard = kyd_test::init();

        let known = ["main", "mainnet", "test", "testnet", "regtest", "unittest"];
        prop_assume!(!known.contains(&raw.as_str()));

        prop_assert_eq!(raw.parse::<NetworkId>(), Err(UnknownNetwork(raw.clone())));
    }

    #[test]
    fn index_round_trip(index in 0usize..8) {
        let _init_guard = kyd_test::init();

        match NetworkId::from_index(index) {
            Some(network) => prop_assert_eq!(network.index(), index),
            None => prop_assert!(index >= NetworkId::ALL.len()),
        }
    }
}
