//! VPC Render - textual artifacts from computed topologies
//!
//! Every renderer is a pure `&Topology -> String`; none of them alters the
//! topology or makes allocation decisions. Format selection happens at the
//! CLI/HTTP boundary through [`Format`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cloudformation;
pub mod script;
pub mod table;
pub mod terraform;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vpc_subnet::Topology;

/// Raised when a format name from the CLI/HTTP boundary is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("format {0} not recognized")]
pub struct UnknownFormat(pub String);

/// Output format selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable address table
    Table,
    /// Terraform HCL for an AWS VPC
    Terraform,
    /// AWS CloudFormation template (JSON)
    Cloudformation,
    /// Bash script driving the aws CLI
    Script,
    /// The topology itself, as JSON
    Json,
}

impl Format {
    /// Render `topology` into this format's textual artifact.
    pub fn render(&self, topology: &Topology) -> String {
        match self {
            Format::Table => table::render(topology),
            Format::Terraform => terraform::render(topology),
            Format::Cloudformation => cloudformation::render(topology),
            Format::Script => script::render(topology),
            Format::Json => serde_json::to_string_pretty(topology).unwrap_or_default(),
        }
    }

    /// MIME type of the rendered artifact.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Cloudformation | Format::Json => "application/json",
            _ => "text/plain; charset=utf-8",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Table => "table",
            Format::Terraform => "terraform",
            Format::Cloudformation => "cloudformation",
            Format::Script => "script",
            Format::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Format::Table),
            "terraform" => Ok(Format::Terraform),
            "cloudformation" => Ok(Format::Cloudformation),
            "script" => Ok(Format::Script),
            "json" => Ok(Format::Json),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trip() {
        for format in [
            Format::Table,
            Format::Terraform,
            Format::Cloudformation,
            Format::Script,
            Format::Json,
        ] {
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_format() {
        let err = "xml".parse::<Format>().unwrap_err();
        assert_eq!(err.to_string(), "format xml not recognized");
    }

    #[test]
    fn test_json_renders_topology_fields() {
        let topology = vpc_subnet::allocate("10.0.0.0/16".parse().unwrap(), 3).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&Format::Json.render(&topology)).unwrap();

        assert_eq!(value["vpc"], "10.0.0.0/16");
        assert_eq!(value["zones"].as_array().unwrap().len(), 3);
        assert_eq!(value["zones"][0]["private"], "10.0.0.0/19");
        assert_eq!(value["unused"][0], "10.0.192.0/18");
    }
}
