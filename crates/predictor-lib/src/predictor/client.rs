//! HTTP client for the remote inference service

use super::features::{ConservationFeatureRecord, LifespanFeatureRecord};
use super::PredictionService;
use crate::config::ResolvedConfig;
use crate::error::{ConfigError, PredictionError, PredictionResult};
use crate::models::{ConservationPrediction, LifespanPrediction, PredictionKind};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Header carrying the service credential (`X-API-Key`)
pub const API_KEY_HEADER: &str = "x-api-key";

/// Response body of `predict/lifespan`
#[derive(Debug, Clone, Deserialize)]
struct LifespanResponse {
    predicted_lifespan: f64,
}

/// Response body of `predict/conservation`
#[derive(Debug, Clone, Deserialize)]
struct ConservationResponse {
    #[serde(deserialize_with = "whole_number")]
    predicted_conservation_status: i64,
    probability_endangered: f64,
}

/// Accept `1` and `1.0` alike; reject fractional codes
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Integer(i64),
        Float(f64),
    }

    match Code::deserialize(deserializer)? {
        Code::Integer(code) => Ok(code),
        Code::Float(code)
            if code.fract() == 0.0 && code >= i64::MIN as f64 && code < i64::MAX as f64 =>
        {
            Ok(code as i64)
        }
        Code::Float(code) => Err(de::Error::custom(format!(
            "predicted_conservation_status must be a whole number, got {}",
            code
        ))),
    }
}

/// Authenticated client for the prediction endpoints.
///
/// Stateless apart from the connection pool, so concurrent calls are
/// independent. Never retries and never substitutes a local estimate.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: Url,
    api_key: HeaderValue,
}

impl InferenceClient {
    pub fn new(config: &ResolvedConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConfigError::Client)?;

        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| ConfigError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full endpoint address for a prediction kind
    pub fn endpoint(&self, kind: PredictionKind) -> PredictionResult<Url> {
        self.base_url
            .join(kind.endpoint_path())
            .map_err(|source| PredictionError::InvalidEndpoint { kind, source })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), self.api_key.clone());
        headers
    }

    /// POST a feature record and decode the kind-specific response
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        kind: PredictionKind,
        body: &B,
    ) -> PredictionResult<T> {
        let url = self.endpoint(kind)?;
        debug!(kind = %kind, url = %url, "Issuing inference request");
        let start = Instant::now();

        let response = self
            .client
            .post(url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(PredictionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(kind = %kind, status = status.as_u16(), body = %body, "Inference request rejected");
            return Err(PredictionError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(PredictionError::Transport)?;
        debug!(
            kind = %kind,
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = bytes.len(),
            "Inference response received"
        );

        serde_json::from_slice(&bytes).map_err(|e| PredictionError::decode(kind, e.to_string()))
    }
}

#[async_trait]
impl PredictionService for InferenceClient {
    async fn predict_lifespan(
        &self,
        record: &LifespanFeatureRecord,
    ) -> PredictionResult<LifespanPrediction> {
        let response: LifespanResponse = self.post(PredictionKind::Lifespan, record).await?;
        let years = response.predicted_lifespan;
        if !years.is_finite() || years < 0.0 {
            return Err(PredictionError::decode(
                PredictionKind::Lifespan,
                format!("predicted_lifespan must be a non-negative number, got {}", years),
            ));
        }
        Ok(LifespanPrediction { years })
    }

    async fn predict_conservation(
        &self,
        record: &ConservationFeatureRecord,
    ) -> PredictionResult<ConservationPrediction> {
        let response: ConservationResponse =
            self.post(PredictionKind::Conservation, record).await?;
        let probability = response.probability_endangered;
        if !(0.0..=1.0).contains(&probability) {
            return Err(PredictionError::decode(
                PredictionKind::Conservation,
                format!("probability_endangered must be within [0, 1], got {}", probability),
            ));
        }
        Ok(ConservationPrediction {
            status_code: response.predicted_conservation_status,
            probability_endangered: probability,
        })
    }
}
