use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Terraform(#[from] crate::terraform::TerraformError),

    #[error(transparent)]
    Provider(#[from] crate::providers::ProviderError),

    #[error(transparent)]
    Http(#[from] crate::http::HttpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_error_display() {
        let err = HarnessError::Config("no cache directory".to_string());
        assert_eq!(err.to_string(), "configuration error: no cache directory");
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: HarnessError = io_err.into();
        assert!(matches!(err, HarnessError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_terraform_error_from_conversion() {
        let tf_err = crate::terraform::TerraformError::OutputNotFound {
            name: "vpc_id".to_string(),
        };
        let err: HarnessError = tf_err.into();
        assert!(matches!(err, HarnessError::Terraform(_)));
        assert!(err.to_string().contains("vpc_id"));
    }

    #[test]
    fn test_provider_error_from_conversion() {
        let provider_err = crate::providers::ProviderError::UnknownProvider("gcp".to_string());
        let err: HarnessError = provider_err.into();
        assert!(matches!(err, HarnessError::Provider(_)));
        assert!(err.to_string().contains("unknown provider: gcp"));
    }
}
