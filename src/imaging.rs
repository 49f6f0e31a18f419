//! Image normalization: every upload, whatever its format or channel layout,
//! leaves here as an 8-bit RGB PNG ready to be base 64 encoded

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageError, ImageOutputFormat};
use serde::Serialize;
use std::{fmt::Debug, io::Cursor};

/// An uploaded image after conversion to RGB8 and re-encoding as PNG
#[derive(Clone)]
pub struct NormalizedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl NormalizedImage {
    /// Decode `bytes` (format guessed from content), drop alpha, expand
    /// grayscale and palette images to full color, and encode the result as
    /// PNG
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut png: Vec<u8> = Vec::new();
        DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;

        Ok(NormalizedImage { png, width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The encoded PNG
    pub fn as_png(&self) -> &[u8] {
        &self.png
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.png)
    }
}

impl Debug for NormalizedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NormalizedImage {{ png: <{} bytes>, width: {}, height: {} }}",
            self.png.len(),
            self.width,
            self.height
        )
    }
}

/// The JSON body sent to the inference provider
#[derive(Serialize)]
pub struct InferencePayload {
    /// Base 64 encoded PNG
    pub image: String,
}

impl Debug for InferencePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferencePayload {{ image: <{} chars> }}", self.image.len())
    }
}

impl From<&NormalizedImage> for InferencePayload {
    fn from(image: &NormalizedImage) -> Self {
        InferencePayload {
            image: image.to_base64(),
        }
    }
}
