//! Bootstrap seeds: DNS seeders and compiled-in peer addresses.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

use crate::parameters::constants::mainnet;

/// The length of the "last seen" jitter window, in seconds.
const ONE_WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// A compiled-in seed record: an IPv6 (or IPv4-mapped) address and a port.
///
/// The address is in network byte order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SeedSpec {
    /// The 16-byte address.
    pub addr: [u8; 16],
    /// The port.
    pub port: u16,
}

impl SeedSpec {
    /// The socket address of this seed.
    ///
    /// IPv4-mapped addresses become IPv4 socket addresses.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = Ipv6Addr::from(self.addr);
        let ip = match ip.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(ip),
        };

        SocketAddr::new(ip, self.port)
    }
}

/// A seed peer address, with a "last seen" time for the address book.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct SeedAddress {
    /// The peer's socket address.
    pub addr: SocketAddr,
    /// When the peer was supposedly last seen.
    pub last_seen: DateTime<Utc>,
}

/// A DNS seeder.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct DnsSeed {
    /// A short display name.
    pub name: String,
    /// The host name to resolve.
    pub host: String,
}

impl DnsSeed {
    /// Create a seeder entry.
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> DnsSeed {
        DnsSeed {
            name: name.into(),
            host: host.into(),
        }
    }
}

/// The main network DNS seeders.
pub fn mainnet_dns_seeds() -> Vec<DnsSeed> {
    mainnet::DNS_SEEDS
        .iter()
        .map(|(name, host)| DnsSeed::new(*name, *host))
        .collect()
}

/// Fixed seeds for the main network.
///
/// No fixed seeds have been published yet, so nodes rely on the DNS seeders.
pub static MAIN_SEEDS: &[SeedSpec] = &[];

/// Fixed seeds for the test network.
pub static TEST_SEEDS: &[SeedSpec] = &[];

/// Convert compiled-in seed records into address book entries.
///
/// Each entry gets a random "last seen" time between one and two weeks
/// before `now`. A new node only needs to reach one or two seeds, and the
/// stale times let addresses learned from real peers take over quickly.
pub fn convert_seeds<R: Rng + ?Sized>(
    specs: &[SeedSpec],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SeedAddress> {
    let one_week = Duration::seconds(ONE_WEEK_SECS);

    specs
        .iter()
        .map(|spec| {
            let jitter = Duration::seconds(rng.gen_range(0..ONE_WEEK_SECS));

            SeedAddress {
                addr: spec.socket_addr(),
                last_seen: now - one_week - jitter,
            }
        })
        .collect()
}

/// Convert seed records using the current time and the thread-local RNG.
pub fn convert_seeds_now(specs: &[SeedSpec]) -> Vec<SeedAddress> {
    convert_seeds(specs, Utc::now(), &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn v4_mapped(octets: [u8; 4], port: u16) -> SeedSpec {
        SeedSpec {
            addr: Ipv4Addr::from(octets).to_ipv6_mapped().octets(),
            port,
        }
    }

    #[test]
    fn socket_addr_unmaps_ipv4() {
        let _init_guard = kyd_test::init();

        let spec = v4_mapped([203, 0, 113, 7], 12244);
        assert_eq!(spec.socket_addr(), "203.0.113.7:12244".parse().expect("valid addr"));

        let v6 = SeedSpec {
            addr: "2001:db8::1".parse::<Ipv6Addr>().expect("valid addr").octets(),
            port: 22244,
        };
        assert_eq!(v6.socket_addr(), "[2001:db8::1]:22244".parse().expect("valid addr"));
    }

    #[test]
    fn mainnet_dns_seeds_are_listed() {
        let _init_guard = kyd_test::init();

        let seeds = mainnet_dns_seeds();
        let hosts: Vec<_> = seeds.iter().map(|seed| seed.host.as_str()).collect();

        assert_eq!(
            hosts,
            [
                "seed1.kydcoin.io",
                "seed2.kydcoin.io",
                "seed3.kydcoin.io",
                "seed4.kydcoin.io"
            ]
        );
        assert_eq!(seeds[0].name, "Seed1");
    }

    #[test]
    fn convert_seeds_keeps_order_and_addresses() {
        let _init_guard = kyd_test::init();

        let specs = [v4_mapped([10, 0, 0, 1], 1), v4_mapped([10, 0, 0, 2], 2)];
        let now = Utc::now();
        let converted = convert_seeds(&specs, now, &mut ChaCha8Rng::seed_from_u64(0));

        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].addr, specs[0].socket_addr());
        assert_eq!(converted[1].addr, specs[1].socket_addr());

        assert!(convert_seeds_now(MAIN_SEEDS).is_empty());
    }

    proptest! {
        #[test]
        fn last_seen_is_one_to_two_weeks_old(
            seed in any::<u64>(),
            count in 1usize..32,
            timestamp in 1_500_000_000i64..2_000_000_000,
        ) {
            let _init_guard = kyd_test::init();

            let specs: Vec<_> = (0..count)
                .map(|i| v4_mapped([192, 0, 2, i as u8], 12244))
                .collect();
            let now = DateTime::from_timestamp(timestamp, 0).expect("valid test timestamp");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            for address in convert_seeds(&specs, now, &mut rng) {
                prop_assert!(address.last_seen <= now - Duration::weeks(1));
                prop_assert!(address.last_seen >= now - Duration::weeks(2));
            }
        }
    }
}
