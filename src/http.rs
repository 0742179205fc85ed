use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response from {url}: status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("response from {url} did not contain '{needle}'")]
    BodyMismatch { url: String, needle: String },

    #[error("{url} did not become healthy after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last: Box<HttpError>,
    },
}

/// What a provisioned endpoint must answer before the check passes.
#[derive(Debug, Clone)]
pub struct HttpCheck {
    pub url: String,
    pub expected_status: u16,
    pub body_substring: Option<String>,
    pub max_retries: u32,
    pub time_between_retries: Duration,
}

impl HttpCheck {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            expected_status: 200,
            body_substring: None,
            max_retries: 0,
            time_between_retries: Duration::from_secs(5),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn with_body_substring(mut self, needle: impl Into<String>) -> Self {
        self.body_substring = Some(needle.into());
        self
    }

    pub fn with_retries(mut self, max_retries: u32, time_between_retries: Duration) -> Self {
        self.max_retries = max_retries;
        self.time_between_retries = time_between_retries;
        self
    }
}

async fn attempt(client: &reqwest::Client, check: &HttpCheck) -> Result<String, HttpError> {
    let response = client.get(&check.url).send().await?;
    let status = response.status().as_u16();
    if status != check.expected_status {
        return Err(HttpError::UnexpectedStatus {
            url: check.url.clone(),
            status,
        });
    }
    let body = response.text().await?;
    if let Some(needle) = &check.body_substring {
        if !body.contains(needle) {
            return Err(HttpError::BodyMismatch {
                url: check.url.clone(),
                needle: needle.clone(),
            });
        }
    }
    Ok(body)
}

/// Polls an endpoint until it answers with the expected status (and body
/// substring, when configured) or the retry budget runs out. Every kind
/// of failure counts as transient here: freshly provisioned
/// infrastructure routinely refuses connections or serves 503 while
/// booting.
pub async fn get_with_retry(check: &HttpCheck) -> Result<String, HttpError> {
    let client = reqwest::Client::new();
    let mut attempt_no = 0u32;
    loop {
        attempt_no += 1;
        let err = match attempt(&client, check).await {
            Ok(body) => {
                tracing::debug!(url = %check.url, attempt = attempt_no, "endpoint healthy");
                return Ok(body);
            }
            Err(e) => e,
        };
        if attempt_no <= check.max_retries {
            tracing::warn!(
                url = %check.url,
                attempt = attempt_no,
                error = %err,
                "endpoint not ready, backing off"
            );
            tokio::time::sleep(check.time_between_retries).await;
            continue;
        }
        if attempt_no > 1 {
            return Err(HttpError::RetriesExhausted {
                url: check.url.clone(),
                attempts: attempt_no,
                last: Box::new(err),
            });
        }
        return Err(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let check = HttpCheck::new("http://example.com/health");
        assert_eq!(check.expected_status, 200);
        assert_eq!(check.max_retries, 0);
        assert!(check.body_substring.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let check = HttpCheck::new("http://example.com")
            .with_status(204)
            .with_body_substring("ok")
            .with_retries(3, Duration::from_millis(10));
        assert_eq!(check.expected_status, 204);
        assert_eq!(check.body_substring.as_deref(), Some("ok"));
        assert_eq!(check.max_retries, 3);
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = HttpError::RetriesExhausted {
            url: "http://example.com".to_string(),
            attempts: 4,
            last: Box::new(HttpError::UnexpectedStatus {
                url: "http://example.com".to_string(),
                status: 503,
            }),
        };
        assert!(err.to_string().contains("after 4 attempts"));
        assert!(err.to_string().contains("503"));
    }
}
