//! The Hugging Face client against an in-process mock of the hosted API

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use inference_relay::config::ProviderSettings;
use inference_relay::error::ProviderError;
use inference_relay::imaging::InferencePayload;
use inference_relay::provider::{HfInferenceClient, InferenceProvider};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct MockBody {
    image: String,
}

async fn mock_model(
    req: HttpRequest,
    model: web::Path<(String, String)>,
    body: web::Json<MockBody>,
) -> HttpResponse {
    let (owner, name) = model.into_inner();
    let auth = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match name.as_str() {
        "loading" => HttpResponse::ServiceUnavailable()
            .json(json!({"error": "Model acme/loading is currently loading", "estimated_time": 20.0})),
        "exploding" => HttpResponse::InternalServerError().body("upstream exploded"),
        "garbage" => HttpResponse::Ok().body("<html>not json</html>"),
        _ => HttpResponse::Ok().json(json!({
            "model": format!("{owner}/{name}"),
            "auth": auth,
            "image": body.image,
        })),
    }
}

/// Start the mock API on an ephemeral port and return its base URL
fn spawn_mock() -> String {
    let server = HttpServer::new(|| {
        App::new().route("/models/{owner}/{name}", web::post().to(mock_model))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

fn client(api_base: &str, token: Option<&str>) -> HfInferenceClient {
    HfInferenceClient::new(&ProviderSettings {
        api_base: api_base.to_string(),
        api_token: token.map(str::to_string),
        timeout_secs: Some(10),
        ..ProviderSettings::default()
    })
    .unwrap()
}

fn payload() -> InferencePayload {
    InferencePayload {
        image: "iVBORw0KGgo=".to_string(),
    }
}

#[actix_web::test]
async fn test_submit_sends_token_and_image() {
    let base = spawn_mock();
    let client = client(&base, Some("hf_test"));

    let value = client.submit("acme/histo", &payload()).await.unwrap();
    assert_eq!(
        value,
        json!({"model": "acme/histo", "auth": "Bearer hf_test", "image": "iVBORw0KGgo="})
    );
}

#[actix_web::test]
async fn test_submit_without_token() {
    let base = spawn_mock();
    let client = client(&base, None);

    let value = client.submit("acme/histo", &payload()).await.unwrap();
    assert_eq!(value["auth"], serde_json::Value::Null);
}

#[actix_web::test]
async fn test_submit_to_endpoint_url() {
    let base = spawn_mock();
    let client = client("http://unused.invalid", None);

    let value = client
        .submit(&format!("{base}/models/acme/dedicated"), &payload())
        .await
        .unwrap();
    assert_eq!(value["model"], "acme/dedicated");
}

#[actix_web::test]
async fn test_provider_error_message() {
    let base = spawn_mock();
    let client = client(&base, Some("hf_test"));

    let err = client.submit("acme/loading", &payload()).await.unwrap_err();
    match &err {
        ProviderError::Status { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "Model acme/loading is currently loading");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "provider returned 503: Model acme/loading is currently loading"
    );
}

#[actix_web::test]
async fn test_provider_plain_text_error() {
    let base = spawn_mock();
    let client = client(&base, None);

    let err = client.submit("acme/exploding", &payload()).await.unwrap_err();
    assert_eq!(err.to_string(), "provider returned 500: upstream exploded");
}

#[actix_web::test]
async fn test_provider_invalid_json() {
    let base = spawn_mock();
    let client = client(&base, None);

    let err = client.submit("acme/garbage", &payload()).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[actix_web::test]
async fn test_provider_unreachable() {
    // Bind then drop a listener to get a port nobody is serving
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = client(&format!("http://127.0.0.1:{port}"), None);

    let err = client.submit("acme/histo", &payload()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Transport(_)));
}
