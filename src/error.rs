//! Errors raised while relaying an upload to the inference provider

use thiserror::Error;

/// A failure anywhere in the upload -> normalize -> submit pipeline
#[derive(Error, Debug)]
pub enum RelayError {
    /// The request body could not be read as a multipart upload
    #[error("{0}")]
    Upload(String),

    /// The upload is not a decodable raster image, or re-encoding failed
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The blocking image task panicked or was cancelled
    #[error("image processing task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl RelayError {
    /// Whether the caller sent something we cannot work with
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, RelayError::Upload(_) | RelayError::Image(_))
    }
}

/// A failure talking to the external inference provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no model configured for inference")]
    MissingModel,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Free-form failure reported by a provider implementation
    #[error("{0}")]
    Message(String),
}
