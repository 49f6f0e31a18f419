//! The relay turns an uploaded image into a provider request and hands the
//! provider's answer back untouched

use crate::error::{ProviderError, RelayError};
use crate::imaging::{InferencePayload, NormalizedImage};
use crate::provider::InferenceProvider;
use serde_json::Value;
use std::sync::Arc;
use tracing::*;

type Result<T> = std::result::Result<T, RelayError>;

/// Shared across all requests. Holds no mutable state
pub struct Relay {
    provider: Arc<dyn InferenceProvider>,

    /// The model (or endpoint URL) predictions are submitted to
    model: Option<String>,
}

impl Relay {
    pub fn new(provider: Arc<dyn InferenceProvider>, model: Option<String>) -> Self {
        Relay { provider, model }
    }

    /// Normalize the upload, submit it, and return the provider's prediction
    #[tracing::instrument(skip_all, fields(upload_bytes = upload.len()))]
    pub async fn predict(&self, upload: Vec<u8>) -> Result<Value> {
        // Decoding and re-encoding is CPU bound; keep it off the async workers
        let image = tokio::task::spawn_blocking(move || NormalizedImage::from_bytes(&upload)).await??;
        debug!("normalized upload to {image:?}");

        let model = self.model.as_deref().ok_or(ProviderError::MissingModel)?;
        let payload = InferencePayload::from(&image);
        let prediction = self.provider.submit(model, &payload).await?;

        info!("finished serving inference request");
        Ok(prediction)
    }
}
