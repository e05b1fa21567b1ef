use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::{NewCallFlag, SentimentLabel, Severity};

/// One concerning phrase or keyword found in a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisFlag {
    #[serde(rename = "type")]
    pub flag_type: String,
    pub severity: Severity,
    pub content: String,
}

impl From<CrisisFlag> for NewCallFlag {
    fn from(flag: CrisisFlag) -> Self {
        NewCallFlag {
            flag_type: flag.flag_type,
            severity: flag.severity,
            content: Some(flag.content),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    LanguageModel,
    KeywordFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    /// -1 (severe distress) to 1 (very positive).
    pub score: f64,
    pub label: SentimentLabel,
    /// 0 to 1.
    pub confidence: f64,
    pub flags: Vec<CrisisFlag>,
    #[serde(skip, default = "default_source")]
    pub source: AnalysisSource,
}

fn default_source() -> AnalysisSource {
    AnalysisSource::LanguageModel
}

impl SentimentAnalysis {
    pub fn high_severity_flags(&self) -> usize {
        self.flags
            .iter()
            .filter(|flag| flag.severity == Severity::High)
            .count()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Language model not configured")]
    NotConfigured,

    #[error("Language model request failed: {0}")]
    Http(String),

    #[error("Language model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Language model timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Invalid language model response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::InvalidResponse(err.to_string())
    }
}
