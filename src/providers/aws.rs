mod client;
mod error;
mod types;

pub use client::AwsCli;
pub use error::AwsError;
pub use types::{DEFAULT_REGION, default_region};

use async_trait::async_trait;

use super::{CloudProvider, ProviderError, Vpc};

pub struct AwsProvider {
    cli: AwsCli,
}

impl AwsProvider {
    pub fn new(region: Option<String>) -> Self {
        let region = region.unwrap_or_else(default_region);
        Self {
            cli: AwsCli::new(region),
        }
    }

    /// NOTE: Primarily used for testing with stub binaries.
    pub fn with_cli(cli: AwsCli) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl CloudProvider for AwsProvider {
    fn name(&self) -> &str {
        "aws"
    }

    async fn get_vpc(&self, vpc_id: &str) -> Result<Option<Vpc>, ProviderError> {
        let vpc = self.cli.describe_vpc(vpc_id).await?;
        if vpc.is_some() {
            tracing::debug!(vpc_id, region = %self.cli.region(), "vpc found");
        } else {
            tracing::debug!(vpc_id, region = %self.cli.region(), "vpc absent");
        }
        Ok(vpc)
    }
}
