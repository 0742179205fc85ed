pub mod aws;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("aws error: {0}")]
    Aws(String),
}

/// A VPC as reported by the cloud control API, independent of
/// terraform's own state. Used to corroborate what apply claims.
#[derive(Debug, Clone, PartialEq)]
pub struct Vpc {
    pub vpc_id: String,
    pub cidr_block: String,
    pub state: String,
    pub is_default: bool,
    pub tags: HashMap<String, String>,
}

/// Control-API lookups used by tests to verify resources exist (or are
/// gone after destroy) outside of terraform's state file.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn get_vpc(&self, vpc_id: &str) -> Result<Option<Vpc>, ProviderError>;
    async fn vpc_exists(&self, vpc_id: &str) -> Result<bool, ProviderError> {
        Ok(self.get_vpc(vpc_id).await?.is_some())
    }
}

pub fn get_provider(
    name: &str,
    region: Option<String>,
) -> Result<Box<dyn CloudProvider>, ProviderError> {
    match name {
        "aws" => Ok(Box::new(aws::AwsProvider::new(region))),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}
