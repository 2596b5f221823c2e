use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::risk::RiskTier;
use crate::sample::NormalizedSample;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server explicitly declined the request; the message is the
    /// server-supplied string verbatim.
    #[error("prediction rejected: {0}")]
    Rejected(String),
    /// Network failure, timeout, or a response the client cannot read.
    /// Worded so the operator checks whether the backend is up at all.
    #[error("failed to reach the inference service at {url} ({detail}); is the backend running?")]
    Transport { url: String, detail: String },
}

/// One settled prediction, held by the controller for the display cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Normalized scalar, nominally [0,1]: temperature / 100.
    pub prediction: f64,
    pub risk_tier: RiskTier,
    /// Server-produced instant, or time of receipt when absent.
    pub timestamp: DateTime<Utc>,
    /// The sample as sent, for audit display.
    pub input_features: NormalizedSample,
}

// ---------- wire types ----------

#[derive(Debug, Deserialize)]
struct PredictResponse {
    success: bool,
    prediction: Option<f64>,
    risk_level: Option<RiskTier>,
    timestamp: Option<String>,
    input_features: Option<NormalizedSample>,
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub scaler_loaded: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelPerformance {
    pub r2_score: f64,
    pub rmse: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub target: String,
    pub performance: ModelPerformance,
}

// ---------- client ----------

/// HTTP client for the inference service. Stateless per call; the one
/// in-flight-request rule is enforced by the controller, not here.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one sample to POST /predict.
    ///
    /// The original server pairs `success: false` with a 4xx/5xx status, so
    /// the body is parsed before the status is considered: a readable
    /// rejection surfaces as `Rejected`, anything unreadable as `Transport`.
    pub async fn submit(
        &self,
        sample: &NormalizedSample,
    ) -> Result<PredictionResult, ClientError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!(%url, "submitting telemetry sample");

        let response = self
            .http
            .post(&url)
            .json(sample)
            .send()
            .await
            .map_err(|e| self.transport(&url, &e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport(&url, &e))?;

        let parsed: PredictResponse = serde_json::from_slice(&body).map_err(|_| {
            ClientError::Transport {
                url: url.clone(),
                detail: format!("unexpected response (HTTP {})", status.as_u16()),
            }
        })?;

        if !parsed.success {
            let reason = parsed
                .error
                .or(parsed.message)
                .unwrap_or_else(|| format!("server returned HTTP {}", status.as_u16()));
            tracing::warn!(%reason, "prediction rejected by server");
            return Err(ClientError::Rejected(reason));
        }

        let (prediction, risk_tier) = match (parsed.prediction, parsed.risk_level) {
            (Some(p), Some(t)) => (p, t),
            _ => {
                return Err(ClientError::Transport {
                    url,
                    detail: "success response missing prediction or risk_level".to_string(),
                })
            }
        };

        Ok(PredictionResult {
            prediction,
            risk_tier,
            timestamp: parse_server_timestamp(parsed.timestamp.as_deref()),
            input_features: parsed.input_features.unwrap_or(*sample),
        })
    }

    /// GET /health. Used once at startup; failures are reported, not fatal.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = format!("{}/health", self.base_url);
        self.get_json(&url).await
    }

    /// GET /model-info, for the dashboard metadata panel.
    pub async fn model_info(&self) -> Result<ModelInfo, ClientError> {
        let url = format!("{}/model-info", self.base_url);
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport(url, &e))?;
        let status = response.status();
        response.json::<T>().await.map_err(|_| ClientError::Transport {
            url: url.to_string(),
            detail: format!("unexpected response (HTTP {})", status.as_u16()),
        })
    }

    fn transport(&self, url: &str, err: &reqwest::Error) -> ClientError {
        let detail = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection refused".to_string()
        } else {
            err.to_string()
        };
        ClientError::Transport {
            url: url.to_string(),
            detail,
        }
    }
}

/// The reference backend emits a naive ISO-8601 local timestamp; newer
/// deployments send RFC 3339. Accept both, default to time of receipt.
fn parse_server_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Utc.from_utc_datetime(&naive);
        }
    }
    Utc::now()
}
