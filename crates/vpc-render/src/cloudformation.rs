//! AWS CloudFormation template
//!
//! Built as `serde_json` values rather than spliced text, so the emitted
//! template is well-formed JSON by construction. Public subnets share the
//! internet route table; private subnets route through a per-zone NAT
//! gateway; protected subnets get a route table with no default route.

use serde_json::{json, Map, Value};
use vpc_subnet::{Topology, ZoneAllocation};

/// Render the topology as a CloudFormation template.
pub fn render(topology: &Topology) -> String {
    let mut resources = Map::new();

    resources.insert(
        "vpc".to_string(),
        json!({
            "Type": "AWS::EC2::VPC",
            "Properties": {
                "CidrBlock": topology.vpc.to_string(),
                "EnableDnsHostnames": true,
                "EnableDnsSupport": true
            }
        }),
    );
    resources.insert(
        "internetgateway".to_string(),
        json!({ "Type": "AWS::EC2::InternetGateway" }),
    );
    resources.insert(
        "internetroutetable".to_string(),
        json!({
            "Type": "AWS::EC2::RouteTable",
            "Properties": { "VpcId": { "Ref": "vpc" } }
        }),
    );
    resources.insert(
        "internetroute".to_string(),
        json!({
            "Type": "AWS::EC2::Route",
            "DependsOn": "internetgateway",
            "Properties": {
                "RouteTableId": { "Ref": "internetroutetable" },
                "DestinationCidrBlock": "0.0.0.0/0",
                "GatewayId": { "Ref": "internetgateway" }
            }
        }),
    );
    resources.insert(
        "AttachGateway".to_string(),
        json!({
            "Type": "AWS::EC2::VPCGatewayAttachment",
            "Properties": {
                "VpcId": { "Ref": "vpc" },
                "InternetGatewayId": { "Ref": "internetgateway" }
            }
        }),
    );

    for (az, zone) in topology.zones.iter().enumerate() {
        zone_resources(&mut resources, az, zone);
    }

    let template = json!({
        "AWSTemplateFormatVersion": "2010-09-09",
        "Resources": Value::Object(resources)
    });
    serde_json::to_string_pretty(&template).unwrap_or_default()
}

fn zone_resources(resources: &mut Map<String, Value>, az: usize, zone: &ZoneAllocation) {
    for (block, function) in [
        (zone.public, "public"),
        (zone.private, "private"),
        (zone.protected, "protected"),
    ] {
        let mut properties = json!({
            "VpcId": { "Ref": "vpc" },
            "CidrBlock": block.to_string(),
            "AvailabilityZone": {
                "Fn::Select": [az.to_string(), { "Fn::GetAZs": "" }]
            }
        });
        if function == "public" {
            properties["MapPublicIpOnLaunch"] = Value::Bool(true);
        }
        resources.insert(
            format!("az{az}{function}"),
            json!({ "Type": "AWS::EC2::Subnet", "Properties": properties }),
        );
    }

    resources.insert(
        format!("eipnat{az}"),
        json!({
            "Type": "AWS::EC2::EIP",
            "DependsOn": "AttachGateway",
            "Properties": { "Domain": "vpc" }
        }),
    );
    resources.insert(
        format!("natgateway{az}"),
        json!({
            "Type": "AWS::EC2::NatGateway",
            "DependsOn": "AttachGateway",
            "Properties": {
                "AllocationId": { "Fn::GetAtt": [format!("eipnat{az}"), "AllocationId"] },
                "SubnetId": { "Ref": format!("az{az}public") }
            }
        }),
    );
    resources.insert(
        format!("privateroutetable{az}"),
        json!({
            "Type": "AWS::EC2::RouteTable",
            "Properties": { "VpcId": { "Ref": "vpc" } }
        }),
    );
    resources.insert(
        format!("protectedroutetable{az}"),
        json!({
            "Type": "AWS::EC2::RouteTable",
            "Properties": { "VpcId": { "Ref": "vpc" } }
        }),
    );
    resources.insert(
        format!("route{az}"),
        json!({
            "Type": "AWS::EC2::Route",
            "Properties": {
                "RouteTableId": { "Ref": format!("privateroutetable{az}") },
                "DestinationCidrBlock": "0.0.0.0/0",
                "NatGatewayId": { "Ref": format!("natgateway{az}") }
            }
        }),
    );
    for (function, route_table) in [
        ("public", "internetroutetable".to_string()),
        ("private", format!("privateroutetable{az}")),
        ("protected", format!("protectedroutetable{az}")),
    ] {
        resources.insert(
            format!("az{az}{function}subnetrouteassociation"),
            json!({
                "Type": "AWS::EC2::SubnetRouteTableAssociation",
                "Properties": {
                    "SubnetId": { "Ref": format!("az{az}{function}") },
                    "RouteTableId": { "Ref": route_table }
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_valid_json_with_expected_resources() {
        let topology = vpc_subnet::allocate("10.0.0.0/16".parse().unwrap(), 2).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render(&topology)).unwrap();

        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
        let resources = value["Resources"].as_object().unwrap();
        assert_eq!(
            resources["vpc"]["Properties"]["CidrBlock"],
            "10.0.0.0/16"
        );
        for az in 0..2 {
            for function in ["public", "private", "protected"] {
                let subnet = &resources[&format!("az{az}{function}")];
                assert_eq!(subnet["Type"], "AWS::EC2::Subnet");
            }
            assert!(resources.contains_key(&format!("natgateway{az}")));
            assert!(resources.contains_key(&format!("az{az}publicsubnetrouteassociation")));
        }
        assert_eq!(
            resources["az0public"]["Properties"]["MapPublicIpOnLaunch"],
            true
        );
        assert_eq!(
            resources["az1private"]["Properties"]["CidrBlock"],
            "10.0.128.0/18"
        );
        // protected subnets never get MapPublicIpOnLaunch
        assert!(resources["az0protected"]["Properties"]
            .get("MapPublicIpOnLaunch")
            .is_none());
    }
}
