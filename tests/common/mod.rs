#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};
use inference_relay::error::ProviderError;
use inference_relay::imaging::InferencePayload;
use inference_relay::provider::InferenceProvider;
use serde_json::{json, Value};
use std::io::Cursor;
use std::time::Duration;

pub const BOUNDARY: &str = "----relay-test-boundary";

/// Content-Type header value matching `multipart_body`
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// A multipart body with a single file field
pub fn multipart_body(field: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"upload.bin\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn encode(image: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = ImageBuffer::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
    encode(DynamicImage::ImageRgb8(image), ImageOutputFormat::Png)
}

/// Always answers with the same value
pub struct FixedProvider(pub Value);

#[async_trait]
impl InferenceProvider for FixedProvider {
    async fn submit(&self, _model: &str, _payload: &InferencePayload) -> Result<Value, ProviderError> {
        Ok(self.0.clone())
    }
}

/// Always fails with the same message
pub struct FailingProvider(pub &'static str);

#[async_trait]
impl InferenceProvider for FailingProvider {
    async fn submit(&self, _model: &str, _payload: &InferencePayload) -> Result<Value, ProviderError> {
        Err(ProviderError::Message(self.0.to_string()))
    }
}

/// Answers with the dimensions of the image it received, after a delay that
/// shrinks as the image grows so responses finish out of order
pub struct EchoProvider;

#[async_trait]
impl InferenceProvider for EchoProvider {
    async fn submit(&self, model: &str, payload: &InferencePayload) -> Result<Value, ProviderError> {
        let png = general_purpose::STANDARD
            .decode(&payload.image)
            .map_err(|e| ProviderError::Message(e.to_string()))?;
        let image =
            image::load_from_memory(&png).map_err(|e| ProviderError::Message(e.to_string()))?;

        let delay = 200u64.saturating_sub(image.width() as u64 * 10);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        Ok(json!({
            "model": model,
            "width": image.width(),
            "height": image.height(),
            "channels": image.color().channel_count(),
        }))
    }
}
