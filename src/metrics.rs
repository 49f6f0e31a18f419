//! Evaluation metrics of the hosted classifier, measured offline on the held
//! out test split and served as-is from `GET /`

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassReport {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub benign: ClassReport,
    pub malignant: ClassReport,
    pub macro_avg: ClassReport,
    pub weighted_avg: ClassReport,
}

/// The landing payload
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Welcome {
    pub message: &'static str,
    pub metrics: EvaluationMetrics,
}

pub const WELCOME: Welcome = Welcome {
    message: "Welcome to Breast Cancer Image Classifier API",
    metrics: EvaluationMetrics {
        accuracy: 0.85,
        benign: ClassReport {
            precision: 0.78,
            recall: 0.74,
            f1_score: 0.76,
            support: 176,
        },
        malignant: ClassReport {
            precision: 0.88,
            recall: 0.90,
            f1_score: 0.89,
            support: 369,
        },
        macro_avg: ClassReport {
            precision: 0.83,
            recall: 0.82,
            f1_score: 0.83,
            support: 545,
        },
        weighted_avg: ClassReport {
            precision: 0.85,
            recall: 0.85,
            f1_score: 0.85,
            support: 545,
        },
    },
};
