//! Terraform HCL for an AWS VPC
//!
//! One `aws_subnet` per public/private/protected role per zone, a shared
//! public route table behind the internet gateway, and a NAT gateway plus
//! private route table per zone. `spare` is reserved capacity and gets no
//! resource.

use std::fmt::Write;

use ipnetwork::Ipv4Network;
use vpc_subnet::Topology;

/// Render the topology as Terraform configuration.
pub fn render(topology: &Topology) -> String {
    let mut out = preamble(topology.vpc);

    for (az, zone) in topology.zones.iter().enumerate() {
        for (block, function) in [
            (zone.public, "public"),
            (zone.private, "private"),
            (zone.protected, "protected"),
        ] {
            subnet(&mut out, az, function, block);
        }
        routing(&mut out, az);
    }

    out
}

fn preamble(vpc: Ipv4Network) -> String {
    format!(
        r#"variable "cidr_block" {{
    type = "string"
    default = "{vpc}"
}}

# Specify the provider and access details
provider "aws" {{

}}

data "aws_region" "default" {{
  current = true
}}

# current availability zones
data "aws_availability_zones" "available" {{}}

# Create a VPC to launch our instances into
resource "aws_vpc" "default" {{
    cidr_block = "${{var.cidr_block}}"
    enable_dns_hostnames = true
}}

# Grant the VPC internet access on its main route table
resource "aws_route" "internet_access" {{
    route_table_id         = "${{aws_route_table.route_table_public.id}}"
    destination_cidr_block = "0.0.0.0/0"
    gateway_id             = "${{aws_internet_gateway.default.id}}"
}}

resource "aws_internet_gateway" "default" {{
    vpc_id = "${{aws_vpc.default.id}}"

    tags {{
        Name = "vpc-igw"
    }}
}}

resource "aws_route_table" "route_table_public" {{
    vpc_id = "${{aws_vpc.default.id}}"
    route {{
        cidr_block = "0.0.0.0/0"
        gateway_id = "${{aws_internet_gateway.default.id}}"
    }}
}}
"#
    )
}

fn subnet(out: &mut String, az: usize, function: &str, block: Ipv4Network) {
    // the public route table is shared; private/protected tables are per zone
    let route_table = if function == "public" {
        "route_table_public".to_string()
    } else {
        format!("route_table_{function}_{az}")
    };
    let map_public_ip = function == "public";

    let _ = write!(
        out,
        r#"
resource "aws_subnet" "az_{az}_{function}" {{
    vpc_id                  = "${{aws_vpc.default.id}}"
    cidr_block              = "{block}"
    availability_zone       = "${{data.aws_availability_zones.available.names[{az}]}}"
    map_public_ip_on_launch = {map_public_ip}
}}

resource "aws_route_table_association" "association_{az}_{function}" {{
    subnet_id      = "${{aws_subnet.az_{az}_{function}.id}}"
    depends_on     = ["aws_route_table.{route_table}"]
    route_table_id = "${{aws_route_table.{route_table}.id}}"
}}
"#
    );
}

fn routing(out: &mut String, az: usize) {
    let _ = write!(
        out,
        r#"
resource "aws_nat_gateway" "nat_gateway_{az}" {{
    allocation_id = "${{aws_eip.eip_nat_{az}.id}}"
    subnet_id     = "${{aws_subnet.az_{az}_public.id}}"

    depends_on = ["aws_internet_gateway.default"]
}}

resource "aws_eip" "eip_nat_{az}" {{
    vpc = true
}}

resource "aws_route" "route_private_{az}" {{
    route_table_id         = "${{aws_route_table.route_table_private_{az}.id}}"
    destination_cidr_block = "0.0.0.0/0"
    nat_gateway_id         = "${{aws_nat_gateway.nat_gateway_{az}.id}}"
}}

resource "aws_route_table" "route_table_private_{az}" {{
    vpc_id = "${{aws_vpc.default.id}}"
}}

resource "aws_route_table" "route_table_protected_{az}" {{
    vpc_id = "${{aws_vpc.default.id}}"
}}
"#
    );
}
