use thiserror::Error;

/// Failure modes of a single upstream fetch.
///
/// Validation of caller input (location, units, day bounds) happens before the
/// provider is invoked and is never reported through this type.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response: DNS, connect or timeout failure.
    #[error("failed to reach weather provider: {0}")]
    Transient(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("weather provider returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The response body did not match the expected schema, which usually
    /// signals a provider contract change.
    #[error("failed to decode weather provider response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether a later retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transient(_) => true,
            // 5xx and 429 are provider-side and may clear up on their own.
            FetchError::Upstream { status, .. } => *status == 429 || *status >= 500,
            FetchError::Malformed(_) => false,
        }
    }

    /// Upstream HTTP status, when the provider answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            FetchError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_rate_limit_is_retryable() {
        let err = FetchError::Upstream { status: 429, body: String::new() };
        assert!(err.is_retryable());
        assert_eq!(err.upstream_status(), Some(429));
    }

    #[test]
    fn upstream_not_found_is_not_retryable() {
        let err = FetchError::Upstream { status: 404, body: "city not found".into() };
        assert!(!err.is_retryable());
    }

    #[test]
    fn malformed_is_not_retryable() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = FetchError::from(json_err);
        assert!(!err.is_retryable());
        assert_eq!(err.upstream_status(), None);
    }
}
