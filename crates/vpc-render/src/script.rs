//! Bash provisioning script
//!
//! Drives the aws CLI directly: creates the VPC, internet gateway and
//! public route table, then loops over the zones creating each role subnet,
//! a NAT gateway and the per-zone route tables. Region and credentials come
//! from the caller's environment.

use vpc_subnet::Topology;

/// Render the topology as a bash script using the aws CLI.
pub fn render(topology: &Topology) -> String {
    let zones = &topology.zones;
    let pubs = zones.iter().map(|z| z.public.to_string()).collect::<Vec<_>>().join(" ");
    let privs = zones.iter().map(|z| z.private.to_string()).collect::<Vec<_>>().join(" ");
    let prots = zones.iter().map(|z| z.protected.to_string()).collect::<Vec<_>>().join(" ");
    let vpc = topology.vpc;
    let num = zones.len();

    format!(
        r#"export VPCCIDR="{vpc}"
# get array of available AZs
AZS=$(aws ec2 describe-availability-zones | jq -r '.AvailabilityZones[].ZoneName')
IFS=', ' read -r -a AZS <<< $AZS

VPCID=$(aws ec2 create-vpc --cidr-block $VPCCIDR | jq -r .Vpc.VpcId)
if [[ ${{PIPESTATUS[0]}} -ne 0 ]] ; then
  echo "Failed to create vpc!"
  exit 1
fi

echo "Created VPC $VPCID"

IGWID=$(aws ec2 create-internet-gateway | jq -r .InternetGateway.InternetGatewayId)
if [[ ${{PIPESTATUS[0]}} -ne 0 ]] ; then
  echo "Failed to create internet gateway!"
  exit 1
fi

echo "Created internet gateway $IGWID"

IRTB=$(aws ec2 create-route-table --vpc-id $VPCID | jq -r .RouteTable.RouteTableId)
echo "Created internet route table $IRTB"

aws ec2 attach-internet-gateway --internet-gateway-id $IGWID --vpc-id $VPCID
echo "Attached internet gateway to VPC"

aws ec2 create-route --route-table-id $IRTB --gateway-id $IGWID --destination-cidr-block 0.0.0.0/0
echo "Created route on route table to internet gateway"

PUB_CIDRS=({pubs})
PRIV_CIDRS=({privs})
PROT_CIDRS=({prots})
NUM_AZS={num}

for ((CURR_AZ=0; CURR_AZ < $NUM_AZS; CURR_AZ++)); do
  PUB_SUBNET=$(aws ec2 create-subnet --vpc-id $VPCID --cidr-block ${{PUB_CIDRS[$CURR_AZ]}} --availability-zone ${{AZS[$CURR_AZ]}} | jq -r .Subnet.SubnetId)
  aws ec2 modify-subnet-attribute --subnet-id $PUB_SUBNET --map-public-ip-on-launch

  PRIV_SUBNET=$(aws ec2 create-subnet --vpc-id $VPCID --cidr-block ${{PRIV_CIDRS[$CURR_AZ]}} --availability-zone ${{AZS[$CURR_AZ]}} | jq -r .Subnet.SubnetId)
  PROT_SUBNET=$(aws ec2 create-subnet --vpc-id $VPCID --cidr-block ${{PROT_CIDRS[$CURR_AZ]}} --availability-zone ${{AZS[$CURR_AZ]}} | jq -r .Subnet.SubnetId)

  ALLOC_ID=$(aws ec2 allocate-address --domain vpc | jq -r .AllocationId)
  NATGATEWAY=$(aws ec2 create-nat-gateway --subnet-id $PUB_SUBNET --allocation-id $ALLOC_ID | jq -r .NatGateway.NatGatewayId)

  PRIV_RT=$(aws ec2 create-route-table --vpc-id $VPCID | jq -r .RouteTable.RouteTableId)
  aws ec2 associate-route-table --subnet-id $PRIV_SUBNET --route-table-id $PRIV_RT
  aws ec2 create-route --route-table-id $PRIV_RT --gateway-id $NATGATEWAY --destination-cidr-block 0.0.0.0/0

  PROT_RT=$(aws ec2 create-route-table --vpc-id $VPCID | jq -r .RouteTable.RouteTableId)
  aws ec2 associate-route-table --subnet-id $PROT_SUBNET --route-table-id $PROT_RT

  aws ec2 associate-route-table --subnet-id $PUB_SUBNET --route-table-id $IRTB
done
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_embeds_topology_blocks() {
        let topology = vpc_subnet::allocate("10.0.0.0/16".parse().unwrap(), 3).unwrap();
        let rendered = render(&topology);

        assert!(rendered.starts_with("export VPCCIDR=\"10.0.0.0/16\"\n"));
        assert!(rendered.contains("NUM_AZS=3"));
        assert!(rendered.contains("PUB_CIDRS=(10.0.32.0/20 10.0.96.0/20 10.0.160.0/20)"));
        assert!(rendered.contains("PRIV_CIDRS=(10.0.0.0/19 10.0.64.0/19 10.0.128.0/19)"));
        assert!(rendered.contains("PROT_CIDRS=(10.0.48.0/21 10.0.112.0/21 10.0.176.0/21)"));
    }
}
