//! The inference provider is the external service that actually runs the
//! model. The relay only knows it through the `InferenceProvider` capability;
//! `HfInferenceClient` is the hosted Hugging Face implementation used in
//! production.

use crate::config::ProviderSettings;
use crate::error::ProviderError;
use crate::imaging::InferencePayload;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::time::Duration;
use tracing::*;

/// Default base URL of the Hugging Face hosted inference API
pub const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co";

type Result<T> = std::result::Result<T, ProviderError>;

/// Submit an encoded image to a model and get back its raw prediction
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn submit(&self, model: &str, payload: &InferencePayload) -> Result<Value>;
}

/// Client for the Hugging Face hosted inference API
pub struct HfInferenceClient {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl std::fmt::Debug for HfInferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfInferenceClient")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HfInferenceClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(HfInferenceClient {
            client: builder.build()?,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            token: settings.api_token.clone(),
        })
    }

    /// The URL a model identifier resolves to. Full URLs are used as-is so a
    /// dedicated inference endpoint can be configured in place of a model id
    pub fn endpoint(&self, model: &str) -> String {
        if model.starts_with("http://") || model.starts_with("https://") {
            model.to_string()
        } else {
            format!("{}/models/{}", self.api_base, model)
        }
    }
}

#[async_trait]
impl InferenceProvider for HfInferenceClient {
    #[tracing::instrument(skip(self, payload))]
    async fn submit(&self, model: &str, payload: &InferencePayload) -> Result<Value> {
        let url = self.endpoint(model);
        debug!("submitting {payload:?} to {url}");

        let mut request = self.client.post(&url).json(payload);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            warn!("provider answered {status}: {message}");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Pull a human readable message out of a provider error body. The hosted
/// API answers `{"error": "..."}`, anything else is returned as text
fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        match map.get("error") {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(other) => return Some(other.to_string()),
            None => {}
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}
