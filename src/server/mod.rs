use crate::config::CorsSettings;
use crate::error::RelayError;
use actix_cors::Cors;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

pub mod protocol;
pub mod routes;

/// Decides the HTTP status of a failed prediction. The body is always
/// `{"error": ...}`, only the status differs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Always answer 200 and let callers look for the `error` key
    #[default]
    Compat,

    /// 400 for malformed uploads, 502 for provider failures
    Strict,
}

impl StatusPolicy {
    pub fn status_for(&self, err: &RelayError) -> StatusCode {
        match self {
            StatusPolicy::Compat => StatusCode::OK,
            StatusPolicy::Strict => match err {
                e if e.is_malformed_input() => StatusCode::BAD_REQUEST,
                RelayError::Provider(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

#[derive(Debug)]
pub struct WebError {
    err: RelayError,
    status: StatusCode,
}

impl WebError {
    pub fn new(err: RelayError, policy: StatusPolicy) -> Self {
        let status = policy.status_for(&err);
        WebError { err, status }
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl actix_web::error::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(protocol::PredictResponse::Error(self.to_string()))
    }

    fn status_code(&self) -> StatusCode {
        self.status
    }
}

/// Register the relay's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::home)
        .service(routes::health)
        .service(routes::predict);
}

/// Build the CORS middleware. With no configured origins every origin,
/// method and header is allowed
pub fn cors(settings: &CorsSettings) -> Cors {
    let mut cors = Cors::default().allow_any_method().allow_any_header();

    if settings.allowed_origins.is_empty() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &settings.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if settings.allow_credentials {
        cors = cors.supports_credentials();
    }
    cors
}
