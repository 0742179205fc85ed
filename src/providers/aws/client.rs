use std::process::Stdio;

use tokio::process::Command;

use super::error::AwsError;
use super::types::DescribeVpcsResponse;
use crate::providers::Vpc;

const DEFAULT_AWS_BINARY: &str = "aws";

/// Thin wrapper over the `aws` command-line tool. The harness never
/// signs requests itself; existence/tag checks go through the same
/// external-CLI pattern as the terraform layer.
#[derive(Debug, Clone)]
pub struct AwsCli {
    binary: String,
    region: String,
}

impl AwsCli {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            binary: DEFAULT_AWS_BINARY.to_string(),
            region: region.into(),
        }
    }

    /// NOTE: Primarily used for testing with stub binaries.
    pub fn with_binary(binary: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    async fn ec2(&self, args: &[&str]) -> Result<String, AwsError> {
        let mut full: Vec<&str> = vec!["ec2"];
        full.extend_from_slice(args);
        full.extend_from_slice(&["--region", self.region.as_str(), "--output", "json"]);

        tracing::debug!(binary = %self.binary, ?full, "running aws cli");

        let output = Command::new(&self.binary)
            .args(&full)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AwsError::CliNotFound {
                        binary: self.binary.clone(),
                    }
                } else {
                    AwsError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(AwsError::CommandFailed {
                command: format!("ec2 {}", args.join(" ")),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Looks a VPC up by id. A NotFound answer from the API is `None`,
    /// which is the expected state after destroy.
    pub async fn describe_vpc(&self, vpc_id: &str) -> Result<Option<Vpc>, AwsError> {
        let result = self
            .ec2(&["describe-vpcs", "--vpc-ids", vpc_id])
            .await;

        let stdout = match result {
            Ok(stdout) => stdout,
            Err(AwsError::CommandFailed { ref stderr, .. })
                if stderr.contains("InvalidVpcID.NotFound") =>
            {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let response: DescribeVpcsResponse = serde_json::from_str(stdout.trim())?;
        Ok(response.vpcs.into_iter().next().map(|r| r.into_vpc()))
    }
}
