//! Error types for VPC subnet allocation

use ipnetwork::{IpNetworkError, Ipv4Network};
use thiserror::Error;

/// Subnet allocation error type
#[derive(Error, Debug)]
pub enum SubnetError {
    /// Split count is not a power of two
    #[error("invalid split count {pieces}: must be a power of two")]
    InvalidSplitCount {
        /// The rejected piece count
        pieces: u32,
    },

    /// Zone count below the minimum of one
    #[error("invalid zone count {zone_count}: must be at least 1")]
    InvalidZoneCount {
        /// The rejected zone count
        zone_count: u32,
    },

    /// Block has too few host bits for the requested subdivision
    #[error("block {block} too small: {needed_bits} subdivision bits would push the prefix past /32")]
    BlockTooSmall {
        /// The block that could not be subdivided
        block: Ipv4Network,
        /// Prefix bits the subdivision would have consumed
        needed_bits: u8,
    },

    /// Malformed network value
    #[error("invalid network: {0}")]
    Network(#[from] IpNetworkError),
}

/// Result type for subnet allocation
pub type SubnetResult<T> = Result<T, SubnetError>;
