//! Zone allocator
//!
//! Drives the splitter to build the zone hierarchy: root block → zone
//! blocks → role sub-blocks within each zone.

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SubnetError, SubnetResult};
use crate::split::split;

/// Prefix bits consumed by the role carve inside each zone (1/2, 1/4, 1/8, 1/8)
const ROLE_BITS: u8 = 3;

/// One availability zone's block and its four role sub-blocks.
///
/// The roles exactly tile `az_block`: `private` is the first half, `public`
/// the third quarter, `protected` the seventh eighth and `spare` the last
/// eighth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAllocation {
    /// The zone's full range
    pub az_block: Ipv4Network,
    /// First half: internal workloads behind NAT
    pub private: Ipv4Network,
    /// Third quarter: internet-facing subnets
    pub public: Ipv4Network,
    /// Seventh eighth: no internet route in either direction
    pub protected: Ipv4Network,
    /// Eighth eighth: reserved for later use
    pub spare: Ipv4Network,
}

impl ZoneAllocation {
    /// Carve one zone block into its four role sub-blocks.
    fn carve(az_block: Ipv4Network) -> SubnetResult<Self> {
        let halves = split(az_block, 2)?;
        let quarters = split(halves[1], 2)?;
        let eighths = split(quarters[1], 2)?;

        Ok(Self {
            az_block,
            private: halves[0],
            public: quarters[0],
            protected: eighths[0],
            spare: eighths[1],
        })
    }

    /// The four role blocks in address order.
    pub fn roles(&self) -> [Ipv4Network; 4] {
        [self.private, self.public, self.protected, self.spare]
    }
}

/// A fully computed partition of one root block.
///
/// Immutable once constructed; renderers only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// The root block the zones were carved from
    pub vpc: Ipv4Network,
    /// Zone allocations in ordinal order
    pub zones: Vec<ZoneAllocation>,
    /// Zone-sized blocks left over when the zone count is not a power of two,
    /// in ascending address order
    pub unused: Vec<Ipv4Network>,
}

/// Partition `root` across `zone_count` availability zones.
///
/// `zone_count` is rounded up to the next power of two for the top-level
/// split; the blocks beyond `zone_count` are kept on the topology as
/// [`Topology::unused`] rather than silently discarded. Every address of
/// `root` ends up in exactly one returned block.
///
/// Construction is all-or-nothing: any failure yields an error and no
/// partial topology.
pub fn allocate(root: Ipv4Network, zone_count: u32) -> SubnetResult<Topology> {
    if zone_count == 0 {
        return Err(SubnetError::InvalidZoneCount { zone_count });
    }

    let slots = zone_count.next_power_of_two();
    let zone_bits = slots.trailing_zeros() as u8;
    if u32::from(root.prefix()) + u32::from(zone_bits) + u32::from(ROLE_BITS) > 32 {
        return Err(SubnetError::BlockTooSmall {
            block: root,
            needed_bits: zone_bits + ROLE_BITS,
        });
    }

    // normalize so the topology always carries the masked base address
    let vpc = Ipv4Network::new(root.network(), root.prefix())?;
    debug!(%vpc, zone_count, slots, zone_prefix = vpc.prefix() + zone_bits, "partitioning root block");

    let mut az_blocks = split(vpc, slots)?;
    let unused = az_blocks.split_off(zone_count as usize);
    let zones = az_blocks
        .into_iter()
        .map(ZoneAllocation::carve)
        .collect::<SubnetResult<Vec<_>>>()?;

    Ok(Topology { vpc, zones, unused })
}
