// =====================================================================================
// BOT CELL HANDLERS
// =====================================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::models::{CreateBotRequest, OpenMicBot};
use crate::services::BotService;
use shared_models::{AppError, Bot, BotUpdate};

pub struct BotHandlers {
    bot_service: Arc<BotService>,
}

impl BotHandlers {
    pub fn new(bot_service: Arc<BotService>) -> Self {
        Self { bot_service }
    }
}

#[instrument(skip(handlers))]
pub async fn list_bots(
    State(handlers): State<Arc<BotHandlers>>,
) -> Result<Json<Vec<Bot>>, AppError> {
    let bots = handlers.bot_service.list_bots().await?;
    Ok(Json(bots))
}

#[instrument(skip(handlers))]
pub async fn get_bot(
    State(handlers): State<Arc<BotHandlers>>,
    Path(id): Path<String>,
) -> Result<Json<Bot>, AppError> {
    let bot = handlers.bot_service.get_bot(&id).await?;
    Ok(Json(bot))
}

#[instrument(skip(handlers, request))]
pub async fn create_bot(
    State(handlers): State<Arc<BotHandlers>>,
    Json(request): Json<CreateBotRequest>,
) -> Result<(StatusCode, Json<Bot>), AppError> {
    let bot = handlers.bot_service.create_bot(request).await?;
    Ok((StatusCode::CREATED, Json(bot)))
}

#[instrument(skip(handlers, update))]
pub async fn update_bot(
    State(handlers): State<Arc<BotHandlers>>,
    Path(id): Path<String>,
    Json(update): Json<BotUpdate>,
) -> Result<Json<Bot>, AppError> {
    let bot = handlers.bot_service.update_bot(&id, update).await?;
    Ok(Json(bot))
}

#[instrument(skip(handlers))]
pub async fn delete_bot(
    State(handlers): State<Arc<BotHandlers>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    handlers.bot_service.delete_bot(&id).await?;
    Ok(Json(json!({ "message": "Bot deleted successfully" })))
}

/// Bots as registered on the voice platform, not the local mirror.
#[instrument(skip(handlers))]
pub async fn list_remote_bots(
    State(handlers): State<Arc<BotHandlers>>,
) -> Result<Json<Vec<OpenMicBot>>, AppError> {
    let bots = handlers.bot_service.list_remote_bots().await?;
    Ok(Json(bots))
}
