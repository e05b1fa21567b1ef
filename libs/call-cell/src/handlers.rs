// =====================================================================================
// CALL CELL HANDLERS
// =====================================================================================

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use crate::models::{CallSummaryResponse, DashboardStats, PostCallRequest, PostCallResponse};
use crate::services::{CallService, PostCallService};
use shared_models::{AppError, CallUpdate, CallWithDetails};

pub struct CallHandlers {
    post_call_service: Arc<PostCallService>,
    call_service: Arc<CallService>,
}

impl CallHandlers {
    pub fn new(post_call_service: Arc<PostCallService>, call_service: Arc<CallService>) -> Self {
        Self {
            post_call_service,
            call_service,
        }
    }
}

// =====================================================================================
// WEBHOOK
// =====================================================================================

#[instrument(skip_all)]
pub async fn post_call(
    State(handlers): State<Arc<CallHandlers>>,
    Json(request): Json<PostCallRequest>,
) -> Result<Json<PostCallResponse>, AppError> {
    let response = handlers.post_call_service.process_call(request).await?;
    Ok(Json(response))
}

// =====================================================================================
// CALL LOGS
// =====================================================================================

#[instrument(skip(handlers))]
pub async fn list_calls(
    State(handlers): State<Arc<CallHandlers>>,
) -> Result<Json<Vec<CallWithDetails>>, AppError> {
    let calls = handlers.call_service.list_calls().await?;
    Ok(Json(calls))
}

#[instrument(skip(handlers))]
pub async fn get_call(
    State(handlers): State<Arc<CallHandlers>>,
    Path(id): Path<String>,
) -> Result<Json<CallWithDetails>, AppError> {
    let call = handlers.call_service.get_call(&id).await?;
    Ok(Json(call))
}

#[instrument(skip(handlers, update))]
pub async fn update_call(
    State(handlers): State<Arc<CallHandlers>>,
    Path(id): Path<String>,
    Json(update): Json<CallUpdate>,
) -> Result<Json<CallWithDetails>, AppError> {
    let call = handlers.call_service.update_call(&id, update).await?;
    Ok(Json(call))
}

#[instrument(skip(handlers))]
pub async fn get_call_summary(
    State(handlers): State<Arc<CallHandlers>>,
    Path(id): Path<String>,
) -> Result<Json<CallSummaryResponse>, AppError> {
    let summary = handlers.call_service.summarize_call(&id).await?;
    Ok(Json(summary))
}

#[instrument(skip(handlers))]
pub async fn get_stats(
    State(handlers): State<Arc<CallHandlers>>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = handlers.call_service.stats().await?;
    Ok(Json(stats))
}
