use serde::Serialize;
use serde_json::Value;

/// Body of a `/predict` response: `{"prediction": ...}` or `{"error": ...}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictResponse {
    /// The provider's answer, untouched
    Prediction(Value),
    Error(String),
}
