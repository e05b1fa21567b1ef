// =====================================================================================
// CALL CELL ROUTER
// =====================================================================================

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    get_call, get_call_summary, get_stats, list_calls, post_call, update_call, CallHandlers,
};
use crate::services::{CallService, PostCallService};

/// Mounted under `/api`.
pub fn create_call_router(
    post_call_service: Arc<PostCallService>,
    call_service: Arc<CallService>,
) -> Router {
    let handlers = Arc::new(CallHandlers::new(post_call_service, call_service));

    Router::new()
        .route("/postcall", post(post_call))
        .route("/calls", get(list_calls))
        .route("/calls/{id}", get(get_call).put(update_call))
        .route("/calls/{id}/summary", get(get_call_summary))
        .route("/stats", get(get_stats))
        .with_state(handlers)
}
