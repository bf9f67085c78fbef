//! Definitions of KYD chain constants, including:
//! - network magic bytes and default ports,
//! - Base58 address prefixes,
//! - alert and spork public keys,
//! - the zerocoin accumulator modulus.

use static_assertions::const_assert;

/// Magic numbers used to identify different KYD networks.
///
/// The message start bytes are designed to be unlikely to occur in normal
/// data: they are rarely used upper ASCII, are not valid UTF-8, and produce
/// a large 4-byte integer at any alignment.
pub mod magics {
    use crate::parameters::network::magic::Magic;

    /// The production mainnet.
    pub const MAINNET: Magic = Magic([0xa5, 0xc2, 0xd1, 0xe6]);
    /// The testnet.
    pub const TESTNET: Magic = Magic([0x53, 0x64, 0x75, 0x86]);
    /// The regression test network.
    pub const REGTEST: Magic = Magic([0x14, 0x54, 0x95, 0x64]);
    /// The in-process unit test network, which shares the mainnet magic.
    pub const UNITTEST: Magic = MAINNET;
}

/// Default P2P listening ports.
pub mod ports {
    /// The production mainnet.
    pub const MAINNET: u16 = 12244;
    /// The testnet.
    pub const TESTNET: u16 = 22244;
    /// The regression test network.
    pub const REGTEST: u16 = 32244;
    /// The in-process unit test network.
    pub const UNITTEST: u16 = 30222;
}

const_assert!(ports::MAINNET != ports::TESTNET);
const_assert!(ports::MAINNET != ports::REGTEST);
const_assert!(ports::MAINNET != ports::UNITTEST);
const_assert!(ports::TESTNET != ports::REGTEST);
const_assert!(ports::TESTNET != ports::UNITTEST);
const_assert!(ports::REGTEST != ports::UNITTEST);

/// Constants for the KYD main network.
pub mod mainnet {
    /// The prefix for a Base58Check-encoded pay-to-public-key-hash address.
    /// This produces addresses starting with "Y".
    pub const B58_PUBKEY_ADDRESS_PREFIX: [u8; 1] = [78];

    /// The prefix for a Base58Check-encoded pay-to-script-hash address.
    pub const B58_SCRIPT_ADDRESS_PREFIX: [u8; 1] = [85];

    /// The prefix for a Base58Check-encoded private key.
    pub const B58_SECRET_KEY_PREFIX: [u8; 1] = [153];

    /// The BIP32 extended public key version bytes.
    pub const EXT_PUBLIC_KEY_PREFIX: [u8; 4] = [0x02, 0x2d, 0x25, 0x33];

    /// The BIP32 extended private key version bytes.
    pub const EXT_SECRET_KEY_PREFIX: [u8; 4] = [0x02, 0x21, 0x31, 0x2b];

    /// The BIP44 coin type, as defined by [SLIP 44], with the hardened bit set.
    ///
    /// [SLIP 44]: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
    pub const EXT_COIN_TYPE: [u8; 4] = [0x80, 0x00, 0x00, 0x77];

    /// The public key that signs network alerts, hex-encoded.
    pub const ALERT_PUBLIC_KEY: &str = "04fd8606e6bbc284001d0ec860080d59d86b1d3a82dd26fde49fc8724de70f4e36fcec5ec2ac113e78e391b59b09c49fb17fc580d8f50f1e7eb1a105edd25e14b1";

    /// The current spork signing key, hex-encoded.
    pub const SPORK_KEY: &str = "04aab04c0811c0a0ceec6f15174c83c351c6bc2fa89f633f11ee6c4e0d5afb2c41718acf73145dcdbd12271e6a1c5fc8a1e6e242d86e3ae257ddf0831fd090231b";

    /// The legacy spork signing key, hex-encoded.
    pub const SPORK_KEY_OLD: &str =
        "03e4668cc19a96b25e35a025387c0796ee84d81770b3bba3a1deffab6e22715b83";

    /// The address that obfuscation pool dummy transactions pay to.
    pub const OBFUSCATION_POOL_DUMMY_ADDRESS: &str = "YKcUbM3ryKwfdjbd33FnAYFspaxDp4vWLs";

    /// The DNS seeders, as `(name, host)` pairs.
    pub const DNS_SEEDS: [(&str, &str); 4] = [
        ("Seed1", "seed1.kydcoin.io"),
        ("Seed2", "seed2.kydcoin.io"),
        ("Seed3", "seed3.kydcoin.io"),
        ("Seed4", "seed4.kydcoin.io"),
    ];
}

/// Constants for the KYD test network.
pub mod testnet {
    /// The prefix for a Base58Check-encoded pay-to-public-key-hash address.
    /// Testnet addresses start with "x" or "y".
    pub const B58_PUBKEY_ADDRESS_PREFIX: [u8; 1] = [140];

    /// The prefix for a Base58Check-encoded pay-to-script-hash address.
    /// Testnet script addresses start with "8" or "9".
    pub const B58_SCRIPT_ADDRESS_PREFIX: [u8; 1] = [29];

    /// The prefix for a Base58Check-encoded private key.
    /// Testnet private keys start with "9" or "c", like Bitcoin's.
    pub const B58_SECRET_KEY_PREFIX: [u8; 1] = [240];

    /// The BIP32 extended public key version bytes ("DRKV").
    pub const EXT_PUBLIC_KEY_PREFIX: [u8; 4] = [0x3a, 0x80, 0x61, 0xa0];

    /// The BIP32 extended private key version bytes ("DRKP").
    pub const EXT_SECRET_KEY_PREFIX: [u8; 4] = [0x3a, 0x80, 0x58, 0x37];

    /// The BIP44 coin type shared by all test networks, with the hardened bit set.
    pub const EXT_COIN_TYPE: [u8; 4] = [0x80, 0x00, 0x00, 0x01];

    /// The public key that signs network alerts, hex-encoded.
    pub const ALERT_PUBLIC_KEY: &str = "04207f3e4229bdd4f408e77918571292e149c52b3ff92ef0ec55c5c4e34ae633c331e24e6e70173b03c18549284e29eea43f74d5b32eba631a5d0c277486103c66";

    /// The spork signing key, hex-encoded. The testnet never rotated its key.
    pub const SPORK_KEY: &str = "0467b0816d0d1575a98c6c6cf0b4a300f978c090119d7986e2b4798cc457aab21bb15104230de3c256401bc4f04f7a00012c107c227555386ccfb9a4db081cf97d";
}

/// The zerocoin accumulator modulus, as a decimal string.
///
/// This is the RSA-2048 challenge number, whose factorization is unknown.
pub const ZEROCOIN_MODULUS: &str = concat!(
    "25195908475657893494027183240048398571429282126204032027777137836043662020707595556264018525880784",
    "4069182906412495150821892985591491761845028084891200728449926873928072877767359714183472702618963750149718246911",
    "6507761337985909570009733045974880842840179742910064245869181719511874612151517265463228221686998754918242243363",
    "7259085141865462043576798423387184774447920739934236584823824281198163815010674810451660377306056201619676256133",
    "8441436038339044149526344321901146575444541784240209246165157233507787077498171257724679629263863563732899121548",
    "31438167899885040445364023527381951378636564391212010397122822120720357",
);
