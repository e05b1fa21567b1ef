use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use analysis_cell::CrisisFlag;
use shared_database::StoreError;
use shared_models::{AppError, SentimentLabel};

// ==============================================================================
// POST-CALL WEBHOOK
// ==============================================================================

/// Payload the voice platform sends once a call ends.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostCallRequest {
    /// Platform-side call id, kept as `externalCallId`.
    pub call_id: Option<String>,
    pub patient_id: Option<String>,
    pub bot_id: Option<String>,
    pub transcript: Option<String>,
    pub duration: Option<i64>,
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub sentiment: SentimentLabel,
    pub score: f64,
    pub confidence: f64,
    pub flags: Vec<CrisisFlag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCallResponse {
    pub call_id: String,
    pub analysis: AnalysisSummary,
    pub message: String,
}

// ==============================================================================
// DASHBOARD
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Calls since midnight UTC.
    pub active_calls: usize,
    /// High-severity flags across all calls.
    pub crisis_flags: usize,
    pub avg_response_time: String,
    pub active_bots: usize,
    /// Whole seconds.
    pub avg_duration: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSummaryResponse {
    pub call_id: String,
    pub summary: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Error)]
pub enum CallError {
    #[error("Call not found")]
    NotFound,

    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CallError> for AppError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::NotFound => AppError::not_found("Call"),
            CallError::Required(field) => AppError::required(field),
            CallError::Validation(msg) => AppError::ValidationError(msg),
            CallError::Store(store_err) => store_err.into(),
        }
    }
}
