use thiserror::Error;

/// AWS-CLI-specific errors.
///
/// SECURITY: Error messages must NEVER contain credential material.
#[derive(Debug, Error)]
pub enum AwsError {
    /// The aws binary could not be spawned
    #[error("aws cli not found: '{binary}'")]
    CliNotFound { binary: String },

    /// The aws cli exited non-zero
    #[error("aws {command} failed (exit {status}): {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("failed to parse aws cli output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AwsError> for crate::providers::ProviderError {
    fn from(err: AwsError) -> Self {
        crate::providers::ProviderError::Aws(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_not_found_display() {
        let err = AwsError::CliNotFound {
            binary: "aws".to_string(),
        };
        assert_eq!(err.to_string(), "aws cli not found: 'aws'");
    }

    #[test]
    fn test_command_failed_display() {
        let err = AwsError::CommandFailed {
            command: "ec2 describe-vpcs".to_string(),
            status: 254,
            stderr: "An error occurred (UnauthorizedOperation)".to_string(),
        };
        assert!(err.to_string().contains("ec2 describe-vpcs"));
        assert!(err.to_string().contains("UnauthorizedOperation"));
    }

    #[test]
    fn test_conversion_to_provider_error() {
        let err = AwsError::CliNotFound {
            binary: "aws".to_string(),
        };
        let provider_err: crate::providers::ProviderError = err.into();
        assert!(matches!(
            provider_err,
            crate::providers::ProviderError::Aws(_)
        ));
        assert!(provider_err.to_string().contains("aws cli not found"));
    }
}
