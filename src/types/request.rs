//! Prediction request payload

use serde::{Deserialize, Serialize};

/// Student features submitted for a performance prediction.
///
/// Field names on the wire match the columns the artifacts were fitted on.
/// Every field is required and must be a JSON integer; unknown fields are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Hours spent studying
    #[serde(rename = "HoursStudied")]
    pub hours_studied: i64,

    /// Score obtained in previous tests
    #[serde(rename = "PreviousScores")]
    pub previous_scores: i64,

    /// Extracurricular activities (flag or count, as encoded at training time)
    #[serde(rename = "ExtracurricularActivities")]
    pub extracurricular_activities: i64,

    /// Average hours of sleep per day
    #[serde(rename = "SleepHours")]
    pub sleep_hours: i64,

    /// Number of sample question papers practiced
    #[serde(rename = "SampleQuestionPapersPracticed")]
    pub sample_question_papers_practiced: i64,
}

impl PredictionRequest {
    /// Create a request from the five features in wire order
    pub fn new(
        hours_studied: i64,
        previous_scores: i64,
        extracurricular_activities: i64,
        sleep_hours: i64,
        sample_question_papers_practiced: i64,
    ) -> Self {
        Self {
            hours_studied,
            previous_scores,
            extracurricular_activities,
            sleep_hours,
            sample_question_papers_practiced,
        }
    }
}
