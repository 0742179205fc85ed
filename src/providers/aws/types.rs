use std::collections::HashMap;

use serde::Deserialize;

use crate::providers::Vpc;

pub const DEFAULT_REGION: &str = "us-east-1";

/// Region for control-API calls: AWS_DEFAULT_REGION when set, otherwise
/// the fixed default.
pub fn default_region() -> String {
    std::env::var("AWS_DEFAULT_REGION")
        .ok()
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

/// `aws ec2 describe-vpcs --output json` envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DescribeVpcsResponse {
    #[serde(default)]
    pub vpcs: Vec<VpcRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct VpcRecord {
    pub vpc_id: String,
    pub cidr_block: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TagRecord {
    pub key: String,
    pub value: String,
}

impl VpcRecord {
    pub(crate) fn into_vpc(self) -> Vpc {
        let tags: HashMap<String, String> =
            self.tags.into_iter().map(|t| (t.key, t.value)).collect();
        Vpc {
            vpc_id: self.vpc_id,
            cidr_block: self.cidr_block,
            state: self.state,
            is_default: self.is_default,
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_describe_vpcs_deserialization() {
        let json = r#"{
            "Vpcs": [
                {
                    "VpcId": "vpc-0abc123",
                    "CidrBlock": "10.0.0.0/16",
                    "State": "available",
                    "IsDefault": false,
                    "Tags": [
                        {"Key": "Name", "Value": "test-vpc-abc123-vpc"},
                        {"Key": "ManagedBy", "Value": "Terraform"}
                    ]
                }
            ]
        }"#;
        let response: DescribeVpcsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.vpcs.len(), 1);

        let vpc = response.vpcs.into_iter().next().unwrap().into_vpc();
        assert_eq!(vpc.vpc_id, "vpc-0abc123");
        assert_eq!(vpc.cidr_block, "10.0.0.0/16");
        assert_eq!(vpc.state, "available");
        assert!(!vpc.is_default);
        assert_eq!(vpc.tags["ManagedBy"], "Terraform");
    }

    #[test]
    fn test_describe_vpcs_tolerates_missing_tags() {
        let json = r#"{"Vpcs": [{"VpcId": "vpc-1", "CidrBlock": "10.1.0.0/16"}]}"#;
        let response: DescribeVpcsResponse = serde_json::from_str(json).unwrap();
        let vpc = response.vpcs.into_iter().next().unwrap().into_vpc();
        assert!(vpc.tags.is_empty());
        assert!(vpc.state.is_empty());
    }

    #[test]
    fn test_empty_response() {
        let response: DescribeVpcsResponse = serde_json::from_str(r#"{"Vpcs": []}"#).unwrap();
        assert!(response.vpcs.is_empty());
    }

    #[test]
    #[serial]
    fn test_default_region_from_env() {
        let backup = std::env::var("AWS_DEFAULT_REGION").ok();
        unsafe {
            std::env::set_var("AWS_DEFAULT_REGION", "eu-central-1");
        }
        assert_eq!(default_region(), "eu-central-1");
        unsafe {
            match backup {
                Some(r) => std::env::set_var("AWS_DEFAULT_REGION", r),
                None => std::env::remove_var("AWS_DEFAULT_REGION"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_region_fallback() {
        let backup = std::env::var("AWS_DEFAULT_REGION").ok();
        unsafe {
            std::env::remove_var("AWS_DEFAULT_REGION");
        }
        assert_eq!(default_region(), "us-east-1");
        unsafe {
            if let Some(r) = backup {
                std::env::set_var("AWS_DEFAULT_REGION", r);
            }
        }
    }
}
