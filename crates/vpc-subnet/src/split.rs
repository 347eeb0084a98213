//! CIDR splitter
//!
//! Divides one block into N disjoint equal-sized blocks, N a power of two.

use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;

use crate::error::{SubnetError, SubnetResult};

/// Split `block` into `pieces` equal sub-blocks in ascending address order.
///
/// The sub-blocks exactly tile the input: pairwise disjoint, union equal to
/// `block` bit-for-bit. Ordering is the canonical left-to-right binary
/// subdivision — piece 0 is the lowest range, piece `pieces - 1` the highest.
///
/// Fails with [`SubnetError::InvalidSplitCount`] unless `pieces` is a power
/// of two, and with [`SubnetError::BlockTooSmall`] if the result prefix
/// would exceed /32.
pub fn split(block: Ipv4Network, pieces: u32) -> SubnetResult<Vec<Ipv4Network>> {
    if !pieces.is_power_of_two() {
        return Err(SubnetError::InvalidSplitCount { pieces });
    }

    let depth = pieces.trailing_zeros() as u8;
    let prefix = block.prefix() + depth;
    if prefix > 32 {
        return Err(SubnetError::BlockTooSmall {
            block,
            needed_bits: depth,
        });
    }

    if depth == 0 {
        // single piece: the (normalized) block itself
        return Ok(vec![Ipv4Network::new(block.network(), block.prefix())?]);
    }

    // the `depth` new mask bits hold the piece index, most-significant-first,
    // immediately after the existing prefix bits
    let base = u32::from(block.network());
    let shift = 32 - prefix;
    let mut blocks = Vec::with_capacity(pieces as usize);
    for piece in 0..pieces {
        let addr = Ipv4Addr::from(base | (piece << shift));
        blocks.push(Ipv4Network::new(addr, prefix)?);
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn net(s: &str) -> Ipv4Network {
        s.parse().unwrap()
    }

    #[test]
    fn test_split_into_four() {
        let blocks = split(net("10.0.0.0/16"), 4).unwrap();
        assert_eq!(
            blocks,
            vec![
                net("10.0.0.0/18"),
                net("10.0.64.0/18"),
                net("10.0.128.0/18"),
                net("10.0.192.0/18"),
            ]
        );
    }

    #[test]
    fn test_split_single_piece_is_identity() {
        let blocks = split(net("192.168.4.0/22"), 1).unwrap();
        assert_eq!(blocks, vec![net("192.168.4.0/22")]);
    }

    #[test]
    fn test_split_to_host_routes() {
        let blocks = split(net("10.0.0.0/30"), 4).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[3], net("10.0.0.3/32"));
    }

    #[test]
    fn test_split_rejects_non_power_of_two() {
        for pieces in [0, 3, 6, 12] {
            assert!(matches!(
                split(net("10.0.0.0/16"), pieces),
                Err(SubnetError::InvalidSplitCount { .. })
            ));
        }
    }

    #[test]
    fn test_split_rejects_oversubscription() {
        assert!(matches!(
            split(net("10.0.0.0/31"), 4),
            Err(SubnetError::BlockTooSmall { .. })
        ));
    }

    proptest! {
        #[test]
        fn split_partitions_exactly(prefix in 0u8..=26, depth in 0u32..=6, raw in any::<u32>()) {
            let mask = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
            let block = Ipv4Network::new(Ipv4Addr::from(raw & mask), prefix).unwrap();
            let pieces = 1u32 << depth;

            let blocks = split(block, pieces).unwrap();
            prop_assert_eq!(blocks.len(), pieces as usize);

            // ascending, adjacent, and exactly tiling the input block
            let piece_size = 1u64 << (32 - prefix - depth as u8);
            let base = u64::from(u32::from(block.network()));
            for (i, piece) in blocks.iter().enumerate() {
                prop_assert_eq!(piece.prefix(), prefix + depth as u8);
                let piece_base = u64::from(u32::from(piece.network()));
                prop_assert_eq!(piece_base, base + i as u64 * piece_size);
            }
        }
    }
}
