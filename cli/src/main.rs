//! VPCBlocks CLI
//!
//! Partitions an IPv4 block across availability zones and prints the
//! result in the chosen format.
//!
//! # Usage
//!
//! ```bash
//! vpcblocks --cidr 10.0.0.0/16
//! vpcblocks --cidr 10.0.0.0/16 --azs 3 --format terraform
//! vpcblocks --cidr 172.16.0.0/12 --format json
//! ```

use clap::Parser;
use ipnetwork::Ipv4Network;
use vpc_render::Format;

mod config;

#[derive(Parser)]
#[command(name = "vpcblocks")]
#[command(version = "0.1.0")]
#[command(about = "Partition a CIDR block into per-AZ subnets", long_about = None)]
struct Cli {
    /// CIDR block to partition
    #[arg(long, env = "VPCBLOCKS_CIDR")]
    cidr: String,

    /// Number of availability zones
    #[arg(long, short)]
    azs: Option<u32>,

    /// Output format (table, terraform, cloudformation, script, json)
    #[arg(long, short)]
    format: Option<Format>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,
}

/// One fully-resolved partitioning request.
struct Request {
    root: Ipv4Network,
    azs: u32,
    format: Format,
}

fn main() {
    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_default();

    let result = resolve(&cli, &config).and_then(|request| run(&request));
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn resolve(cli: &Cli, config: &config::Config) -> Result<Request, String> {
    let root = cli.cidr.parse::<Ipv4Network>().map_err(|e| e.to_string())?;
    let azs = cli.azs.or(config.default_azs).unwrap_or(4);
    let format = match (&cli.format, &config.default_format) {
        (Some(format), _) => *format,
        (None, Some(name)) => name.parse::<Format>().map_err(|e| e.to_string())?,
        (None, None) => Format::Table,
    };

    Ok(Request { root, azs, format })
}

fn run(request: &Request) -> Result<(), String> {
    let topology = vpc_subnet::allocate(request.root, request.azs).map_err(|e| e.to_string())?;
    println!("{}", request.format.render(&topology));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(cidr: &str, azs: Option<u32>, format: Option<Format>) -> Cli {
        Cli {
            cidr: cidr.to_string(),
            azs,
            format,
            profile: None,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = config::Config {
            default_azs: Some(2),
            default_format: Some("json".to_string()),
        };
        let request = resolve(&cli("10.0.0.0/16", Some(6), Some(Format::Table)), &config).unwrap();
        assert_eq!(request.azs, 6);
        assert_eq!(request.format, Format::Table);
    }

    #[test]
    fn test_config_supplies_defaults() {
        let config = config::Config {
            default_azs: Some(2),
            default_format: Some("json".to_string()),
        };
        let request = resolve(&cli("10.0.0.0/16", None, None), &config).unwrap();
        assert_eq!(request.azs, 2);
        assert_eq!(request.format, Format::Json);
    }

    #[test]
    fn test_defaults_without_config() {
        let request = resolve(&cli("10.0.0.0/16", None, None), &config::Config::default()).unwrap();
        assert_eq!(request.azs, 4);
        assert_eq!(request.format, Format::Table);
    }

    #[test]
    fn test_bad_cidr_is_reported() {
        assert!(resolve(&cli("10.0.0.0/99", None, None), &config::Config::default()).is_err());
    }
}
