use std::time::Duration;

/// Connection settings for the inference service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the inference service, without a trailing slash.
    pub base_url: String,
    /// Hard deadline for any single request.
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5000";
    pub const DEFAULT_TIMEOUT_S: u64 = 10;

    /// Read settings from PREDICTOR_URL / PREDICTOR_TIMEOUT_S, falling back
    /// to the defaults when unset or unparseable.
    pub fn from_env() -> Self {
        let base_url = std::env::var("PREDICTOR_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let timeout_s = std::env::var("PREDICTOR_TIMEOUT_S")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_S);
        Self::new(base_url, Duration::from_secs(timeout_s))
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, timeout }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_BASE_URL,
            Duration::from_secs(Self::DEFAULT_TIMEOUT_S),
        )
    }
}
