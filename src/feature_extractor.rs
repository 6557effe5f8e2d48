//! Feature extraction for student performance model inference.
//!
//! The scaler and model artifacts were fitted on columns in a fixed order.
//! That order is not recorded in the artifacts themselves, so it lives here
//! and every artifact loaded at startup is checked against its width.

use crate::types::request::PredictionRequest;

/// Number of features the artifacts expect
pub const FEATURE_COUNT: usize = 5;

/// Feature names in the order the artifacts were fitted on
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "HoursStudied",
    "PreviousScores",
    "ExtracurricularActivities",
    "SleepHours",
    "SampleQuestionPapersPracticed",
];

/// Turns a validated request into the single feature row fed to the scaler.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the feature row from a request, in `FEATURE_NAMES` order.
    pub fn extract(&self, request: &PredictionRequest) -> [f64; FEATURE_COUNT] {
        [
            request.hours_studied as f64,
            request.previous_scores as f64,
            request.extracurricular_activities as f64,
            request.sleep_hours as f64,
            request.sample_question_papers_practiced as f64,
        ]
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (matching training column order).
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
