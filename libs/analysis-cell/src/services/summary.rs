use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use crate::services::openai::{ChatRequest, LanguageModel};

pub const SUMMARY_UNAVAILABLE: &str = "Unable to generate summary";
pub const SUMMARY_FAILED: &str = "Summary generation failed";

pub struct CallSummaryService {
    model: Arc<dyn LanguageModel>,
    timeout: Duration,
}

impl CallSummaryService {
    pub fn new(model: Arc<dyn LanguageModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Short professional summary of a call. Failures yield a fixed notice
    /// rather than an error.
    pub async fn summarize(&self, transcript: &str) -> String {
        let request = ChatRequest {
            system: "You are a mental health professional. Create a concise, professional \
                     summary of this patient interaction. Focus on key concerns, emotional \
                     state, resources provided, and any follow-up needs. Keep it under 200 words."
                .to_string(),
            user: format!("Summarize this mental health call transcript:\n\n{}", transcript),
            json_response: false,
        };

        match timeout(self.timeout, self.model.complete(request)).await {
            Ok(Ok(summary)) if summary.trim().is_empty() => SUMMARY_UNAVAILABLE.to_string(),
            Ok(Ok(summary)) => summary.trim().to_string(),
            Ok(Err(err)) => {
                warn!("Failed to generate call summary: {}", err);
                SUMMARY_FAILED.to_string()
            }
            Err(_) => {
                warn!("Call summary timed out after {:?}", self.timeout);
                SUMMARY_FAILED.to_string()
            }
        }
    }
}
