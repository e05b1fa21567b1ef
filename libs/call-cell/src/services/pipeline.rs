use std::sync::Arc;

use tracing::{debug, info, warn};

use analysis_cell::SentimentAnalyzer;
use shared_database::RecordStore;
use shared_models::{format_sentiment_score, CallStatus, NewCall, NewCallFlag};

use crate::models::{AnalysisSummary, CallError, PostCallRequest, PostCallResponse};

/// Used when the call names no bot or an unknown bot.
pub const DEFAULT_CRISIS_KEYWORDS: [&str; 3] = ["suicidal", "harm", "hopeless"];

pub const PROCESSED_MESSAGE: &str = "Call processed successfully";

/// Turns a finished call's transcript into a persisted, analysed call record.
pub struct PostCallService {
    store: Arc<dyn RecordStore>,
    analyzer: Arc<SentimentAnalyzer>,
}

impl PostCallService {
    pub fn new(store: Arc<dyn RecordStore>, analyzer: Arc<SentimentAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    pub async fn process_call(&self, request: PostCallRequest) -> Result<PostCallResponse, CallError> {
        let transcript = request
            .transcript
            .filter(|t| !t.trim().is_empty())
            .ok_or(CallError::Required("Transcript"))?;

        if let Some(metadata) = &request.metadata {
            debug!("Post-call metadata: {}", metadata);
        }

        let keywords = self.crisis_keywords(request.bot_id.as_deref()).await?;
        let analysis = self.analyzer.analyze(&transcript, &keywords).await;

        let new_call = NewCall {
            patient_id: request.patient_id,
            bot_id: request.bot_id,
            external_call_id: request.call_id,
            duration: request.duration,
            transcript: Some(transcript),
            sentiment_score: Some(format_sentiment_score(analysis.score)),
            sentiment_label: Some(analysis.label),
            status: CallStatus::from_label(analysis.label),
        };
        let flags: Vec<NewCallFlag> = analysis.flags.iter().cloned().map(Into::into).collect();

        let (call, stored_flags) = self.store.create_call_with_flags(new_call, flags).await?;

        info!(
            "Call {} processed: status={:?} label={} flags={} high={}",
            call.id,
            call.status,
            analysis.label.as_str(),
            stored_flags.len(),
            analysis.high_severity_flags()
        );

        Ok(PostCallResponse {
            call_id: call.id,
            analysis: AnalysisSummary {
                sentiment: analysis.label,
                score: analysis.score,
                confidence: analysis.confidence,
                flags: analysis.flags,
            },
            message: PROCESSED_MESSAGE.to_string(),
        })
    }

    async fn crisis_keywords(&self, bot_id: Option<&str>) -> Result<Vec<String>, CallError> {
        let bot = match bot_id {
            Some(id) => self.store.get_bot(id).await?,
            None => None,
        };

        match bot {
            Some(bot) => {
                if bot.crisis_keywords.is_empty() {
                    warn!("Bot {} has no crisis keywords configured", bot.id);
                }
                Ok(bot.crisis_keywords)
            }
            None => {
                if let Some(id) = bot_id {
                    warn!("Bot {} not found; using default crisis keywords", id);
                }
                Ok(default_keywords())
            }
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_CRISIS_KEYWORDS.iter().map(|k| k.to_string()).collect()
}
