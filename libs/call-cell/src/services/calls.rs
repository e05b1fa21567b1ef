use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use analysis_cell::CallSummaryService;
use shared_database::RecordStore;
use shared_models::{CallStatus, CallUpdate, CallWithDetails};

use crate::models::{CallError, CallSummaryResponse, DashboardStats};
use crate::services::stats::dashboard_stats;

/// Read and edit access to processed calls.
pub struct CallService {
    store: Arc<dyn RecordStore>,
    summaries: Arc<CallSummaryService>,
}

impl CallService {
    pub fn new(store: Arc<dyn RecordStore>, summaries: Arc<CallSummaryService>) -> Self {
        Self { store, summaries }
    }

    pub async fn list_calls(&self) -> Result<Vec<CallWithDetails>, CallError> {
        Ok(self.store.list_calls_with_details().await?)
    }

    pub async fn get_call(&self, id: &str) -> Result<CallWithDetails, CallError> {
        self.store
            .get_call_with_details(id)
            .await?
            .ok_or(CallError::NotFound)
    }

    /// Partial update. Status is derived from the resulting label: crisis iff
    /// the label is crisis. Staff may only move a non-crisis call between
    /// `completed` and `follow-up`.
    pub async fn update_call(
        &self,
        id: &str,
        mut update: CallUpdate,
    ) -> Result<CallWithDetails, CallError> {
        if let Some(score) = &update.sentiment_score {
            let valid = score
                .trim()
                .parse::<f64>()
                .map(|value| (-1.0..=1.0).contains(&value))
                .unwrap_or(false);
            if !valid {
                return Err(CallError::Validation(
                    "sentimentScore must be a number between -1 and 1".to_string(),
                ));
            }
        }

        let existing = self.store.get_call(id).await?.ok_or(CallError::NotFound)?;
        let label = update.sentiment_label.or(existing.sentiment_label);
        let derived = label.map(CallStatus::from_label).unwrap_or_default();
        let status = match (derived, update.status) {
            (CallStatus::Crisis, requested) => {
                if requested.is_some_and(|status| status != CallStatus::Crisis) {
                    debug!("Ignoring status change on crisis call {}", id);
                }
                CallStatus::Crisis
            }
            (_, Some(CallStatus::Crisis)) => {
                return Err(CallError::Validation(
                    "status can only be crisis when sentimentLabel is crisis".to_string(),
                ));
            }
            (_, Some(requested)) => requested,
            (_, None) if existing.status == CallStatus::FollowUp => CallStatus::FollowUp,
            (derived, None) => derived,
        };
        update.status = Some(status);

        self.store
            .update_call(id, update)
            .await?
            .ok_or(CallError::NotFound)?;
        info!("Call updated: {}", id);

        self.get_call(id).await
    }

    pub async fn summarize_call(&self, id: &str) -> Result<CallSummaryResponse, CallError> {
        let call = self.store.get_call(id).await?.ok_or(CallError::NotFound)?;
        let transcript = call
            .transcript
            .filter(|t| !t.trim().is_empty())
            .ok_or(CallError::Required("Transcript"))?;

        debug!("Summarising call {} ({} chars)", id, transcript.len());
        let summary = self.summaries.summarize(&transcript).await;

        Ok(CallSummaryResponse {
            call_id: call.id,
            summary,
        })
    }

    pub async fn stats(&self) -> Result<DashboardStats, CallError> {
        let calls = self.store.list_calls_with_details().await?;
        let bots = self.store.list_bots().await?;
        Ok(dashboard_stats(&calls, &bots, Utc::now()))
    }
}
