//! The Bitcoin-inherited Merkle tree of transactions.

use itertools::Itertools;

use super::Hash;

/// Compute the Merkle root of a list of transaction hashes.
///
/// Each level pairs adjacent hashes and hashes their concatenation with
/// double SHA-256. An odd hash at the end of a level is paired with itself.
/// A single transaction is its own root, and an empty list has a zero root.
pub fn root<I>(transaction_hashes: I) -> Hash
where
    I: IntoIterator<Item = Hash>,
{
    let mut level: Vec<Hash> = transaction_hashes.into_iter().collect();

    if level.is_empty() {
        return Hash::ZERO;
    }

    while level.len() > 1 {
        if level.len() % 2 == 1 {
            let last = *level.last().expect("level is not empty");
            level.push(last);
        }

        level = level
            .into_iter()
            .tuples()
            .map(|(left, right)| {
                let mut pair = [0u8; 64];
                pair[..32].copy_from_slice(&left.0);
                pair[32..].copy_from_slice(&right.0);
                Hash::sha256d(&pair)
            })
            .collect();
    }

    level[0]
}
