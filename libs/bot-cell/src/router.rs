// =====================================================================================
// BOT CELL ROUTER
// =====================================================================================

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers::{
    create_bot, delete_bot, get_bot, list_bots, list_remote_bots, update_bot, BotHandlers,
};
use crate::services::BotService;

/// Mounted under `/api/bots`.
pub fn create_bot_router(bot_service: Arc<BotService>) -> Router {
    let handlers = Arc::new(BotHandlers::new(bot_service));

    Router::new()
        .route("/", get(list_bots).post(create_bot))
        .route("/remote", get(list_remote_bots))
        .route("/{id}", get(get_bot).put(update_bot).delete(delete_bot))
        .with_state(handlers)
}
