use color_eyre::Report;

use super::*;
use crate::block::{genesis::MAINNET_GENESIS_HASH, tests::vectors::KnownHeaderHasher};

fn selector() -> NetworkSelector {
    NetworkSelector::new(ParameterRegistry::new(&KnownHeaderHasher))
}

#[test]
fn starts_unselected() {
    let _init_guard = kyd_test::init();

    let selector = selector();

    assert_eq!(selector.active_network_id(), None);
    assert!(selector.try_active().is_none());
    assert!(!selector.is_unittest_mutable());
    assert!(matches!(
        selector.try_as_mutable(),
        Err(SelectionError::Unselected)
    ));
}

#[test]
#[should_panic(expected = "before a network was selected")]
fn reading_before_selection_panics() {
    let _init_guard = kyd_test::init();

    let selector = selector();
    let _ = selector.active();
}

#[test]
fn selection_can_be_overwritten() {
    let _init_guard = kyd_test::init();

    let selector = selector();

    selector.select(NetworkId::Main);
    assert_eq!(selector.active_network_id(), Some(NetworkId::Main));
    assert_eq!(selector.active().genesis_hash.to_string(), MAINNET_GENESIS_HASH);

    for network in NetworkId::iter() {
        selector.select(network);
        assert_eq!(selector.active_network_id(), Some(network));
        assert_eq!(selector.active().network, network);
        assert_eq!(selector.active().default_port, network.default_port());
    }
}

#[test]
fn identifiers_select_networks() -> Result<(), Report> {
    let _init_guard = kyd_test::init();

    let selector = selector();

    assert_eq!(
        selector.select_from_identifier_or_default(Some("regtest"))?,
        NetworkId::RegTest
    );
    assert_eq!(selector.active_network_id(), Some(NetworkId::RegTest));

    // A bad identifier is reported, and the selection is unchanged.
    assert_eq!(
        selector.select_from_identifier_or_default(Some("moon")),
        Err(UnknownNetwork("moon".to_string()))
    );
    assert_eq!(selector.active_network_id(), Some(NetworkId::RegTest));

    assert_eq!(selector.select_from_identifier_or_default(None)?, NetworkId::Main);
    assert_eq!(selector.active_network_id(), Some(NetworkId::Main));

    Ok(())
}

#[test]
fn flags_select_networks() -> Result<(), Report> {
    let _init_guard = kyd_test::init();

    let selector = selector();

    assert_eq!(selector.select_from_flags(true, false)?, NetworkId::Test);
    assert_eq!(
        selector.select_from_flags(true, true),
        Err(SelectionError::ConflictingFlags)
    );
    assert_eq!(selector.active_network_id(), Some(NetworkId::Test));

    Ok(())
}

#[test]
fn only_the_unittest_network_is_mutable() {
    let _init_guard = kyd_test::init();

    let selector = selector();

    for network in [NetworkId::Main, NetworkId::Test, NetworkId::RegTest] {
        selector.select(network);
        assert!(!selector.is_unittest_mutable());
        assert!(matches!(
            selector.try_as_mutable(),
            Err(SelectionError::NotMutable(n)) if n == network
        ));
    }

    selector.select(NetworkId::UnitTest);
    assert!(selector.is_unittest_mutable());

    selector.as_mutable().set_subsidy_halving_interval(100);
    assert_eq!(selector.active().pow.subsidy_halving_interval, 100);

    selector.select(NetworkId::RegTest);
    assert_eq!(selector.active().pow.subsidy_halving_interval, 150);
    selector.select(NetworkId::UnitTest);
    assert_eq!(selector.active().pow.subsidy_halving_interval, 100);
}

#[test]
#[should_panic(expected = "regtest network parameters are immutable")]
fn mutating_regtest_panics() {
    let _init_guard = kyd_test::init();

    let selector = selector();
    selector.select(NetworkId::RegTest);

    selector.as_mutable().set_subsidy_halving_interval(1);
}

#[test]
fn checkpoints_follow_the_selection() {
    let _init_guard = kyd_test::init();

    let selector = selector();

    selector.select(NetworkId::UnitTest);
    let unittest = selector.checkpoints();
    selector.select(NetworkId::Main);
    let main = selector.checkpoints();
    selector.select(NetworkId::Test);
    let test = selector.checkpoints();

    assert!(Arc::ptr_eq(&unittest, &main));
    assert_eq!(test.checkpoints.len(), 1);
    assert_eq!(main.checkpoints.len(), 6);
}

/// The only test that uses the process-wide selector.
#[test]
fn process_wide_selector() -> Result<(), Report> {
    let _init_guard = kyd_test::init();

    let installed = init(&KnownHeaderHasher);
    assert!(std::ptr::eq(installed, global()));
    assert!(std::ptr::eq(installed, init(&KnownHeaderHasher)));

    select_params(NetworkId::Test);
    assert_eq!(active_network_id(), Some(NetworkId::Test));
    assert_eq!(params().network, NetworkId::Test);
    assert!(!is_unittest_mutable());

    assert_eq!(select_params_from_flags(false, true)?, NetworkId::RegTest);
    assert_eq!(checkpoints().checkpoints.len(), 1);

    assert!(select_from_identifier_or_default(Some("bogus")).is_err());
    assert_eq!(active_network_id(), Some(NetworkId::RegTest));

    assert_eq!(select_from_identifier_or_default(Some("unittest"))?, NetworkId::UnitTest);
    assert!(is_unittest_mutable());
    modifiable_params().set_allow_min_difficulty_blocks(true);
    assert!(params().flags.allow_min_difficulty_blocks);

    Ok(())
}
