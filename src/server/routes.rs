//! The user-facing JSON web server. `/predict` relays uploads to the
//! inference provider, `/` reports the model's evaluation metrics.

use super::protocol::PredictResponse;
use super::WebError;
use crate::config::RelaySettings;
use crate::error::RelayError;
use crate::metrics::WELCOME;
use crate::relay::Relay;
use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use tracing::*;

type Result<T> = std::result::Result<T, WebError>;

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

#[get("/")]
pub async fn home() -> impl Responder {
    web::Json(WELCOME)
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// HTTP request to classify an uploaded image
#[post("/predict")]
pub async fn predict(
    payload: Multipart,
    relay: web::Data<Relay>,
    settings: web::Data<RelaySettings>,
) -> Result<impl Responder> {
    let policy = settings.status_policy;

    let prediction = async {
        let upload = read_upload(payload, settings.max_upload_bytes).await?;
        relay.predict(upload).await
    }
    .await
    .map_err(|err| {
        warn!("prediction failed: {err}");
        WebError::new(err, policy)
    })?;

    Ok(web::Json(PredictResponse::Prediction(prediction)))
}

/// Read the `file` field of a multipart body into memory, skipping any other
/// fields
async fn read_upload(
    mut payload: Multipart,
    limit: Option<usize>,
) -> std::result::Result<Vec<u8>, RelayError> {
    let upload_err = |e: actix_multipart::MultipartError| RelayError::Upload(e.to_string());

    while let Some(mut field) = payload.try_next().await.map_err(upload_err)? {
        if field.content_disposition().get_name() != Some(FILE_FIELD) {
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(upload_err)? {
            bytes.extend_from_slice(&chunk);
            if let Some(limit) = limit {
                if bytes.len() > limit {
                    return Err(RelayError::Upload(format!(
                        "upload exceeds the {limit} byte limit"
                    )));
                }
            }
        }

        debug!("read {} byte upload", bytes.len());
        return Ok(bytes);
    }

    Err(RelayError::Upload(format!(
        "missing `{FILE_FIELD}` field in multipart body"
    )))
}
