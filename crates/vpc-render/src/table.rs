//! Human-readable address table

use std::fmt::Write;

use ipnetwork::Ipv4Network;
use vpc_subnet::{zone_name, Topology};

fn address_count(block: Ipv4Network) -> u64 {
    1u64 << (32 - block.prefix())
}

/// Render the topology as an indented per-zone listing.
pub fn render(topology: &Topology) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "VPC Range - {}", topology.vpc);

    for (ordinal, zone) in topology.zones.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "AZ {} ({}):", zone_name(ordinal), zone.az_block);
        for (block, role) in [
            (zone.private, "Private"),
            (zone.public, "Public"),
            (zone.protected, "Protected"),
            (zone.spare, "Spare"),
        ] {
            let _ = writeln!(
                out,
                "    {} ({} - {} addresses)",
                block,
                role,
                address_count(block)
            );
        }
    }

    if !topology.unused.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unused blocks:");
        for block in &topology.unused {
            let _ = writeln!(out, "    {} ({} addresses)", block, address_count(*block));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_block() {
        let topology = vpc_subnet::allocate("10.0.0.0/16".parse().unwrap(), 3).unwrap();
        let rendered = render(&topology);

        assert!(rendered.starts_with("VPC Range - 10.0.0.0/16\n"));
        assert!(rendered.contains("AZ a (10.0.0.0/18):"));
        assert!(rendered.contains("AZ c (10.0.128.0/18):"));
        assert!(rendered.contains("    10.0.0.0/19 (Private - 8192 addresses)"));
        assert!(rendered.contains("    10.0.32.0/20 (Public - 4096 addresses)"));
        assert!(rendered.contains("    10.0.48.0/21 (Protected - 2048 addresses)"));
        assert!(rendered.contains("    10.0.56.0/21 (Spare - 2048 addresses)"));
        assert!(rendered.contains("Unused blocks:\n    10.0.192.0/18 (16384 addresses)"));
    }

    #[test]
    fn test_table_omits_empty_unused_section() {
        let topology = vpc_subnet::allocate("10.0.0.0/16".parse().unwrap(), 4).unwrap();
        assert!(!render(&topology).contains("Unused blocks"));
    }
}
