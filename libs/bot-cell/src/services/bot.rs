use std::sync::Arc;

use tracing::{debug, error, info, warn};

use shared_database::RecordStore;
use shared_models::{Bot, BotUpdate, NewBot};

use crate::models::{BotError, BotFallback, CreateBotRequest, OpenMicBot, UpdateOpenMicBotPayload};
use crate::services::openmic::OpenMicClient;

pub struct BotService {
    store: Arc<dyn RecordStore>,
    openmic: Arc<OpenMicClient>,
}

impl BotService {
    pub fn new(store: Arc<dyn RecordStore>, openmic: Arc<OpenMicClient>) -> Self {
        Self { store, openmic }
    }

    pub async fn list_bots(&self) -> Result<Vec<Bot>, BotError> {
        Ok(self.store.list_bots().await?)
    }

    pub async fn get_bot(&self, id: &str) -> Result<Bot, BotError> {
        self.store.get_bot(id).await?.ok_or(BotError::NotFound)
    }

    /// Registers the bot on the voice platform, then mirrors it locally with
    /// the platform id. Nothing is stored if registration fails.
    pub async fn create_bot(&self, request: CreateBotRequest) -> Result<Bot, BotError> {
        let name = request
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| BotError::Validation("Name is required".to_string()))?;
        let personality = request.personality.unwrap_or_default();
        let greeting = request.greeting.unwrap_or_default();

        let remote = self
            .openmic
            .create_bot(&name, &personality, &greeting)
            .await?;

        let bot = self
            .store
            .create_bot(NewBot {
                name,
                external_bot_id: Some(remote.id),
                personality,
                greeting,
                crisis_keywords: request.crisis_keywords.unwrap_or_default(),
                is_active: request.is_active.unwrap_or(true),
            })
            .await?;

        info!("Bot created: {} ({:?})", bot.id, bot.external_bot_id);
        Ok(bot)
    }

    /// Partial update. Profile changes are pushed to the platform first when
    /// the bot is registered there.
    pub async fn update_bot(&self, id: &str, update: BotUpdate) -> Result<Bot, BotError> {
        let existing = self.get_bot(id).await?;

        if update.changes_profile() {
            match existing.external_bot_id.as_deref() {
                Some(external_id) if self.openmic.is_configured() => {
                    self.sync_profile(external_id, &existing, &update).await?;
                }
                Some(_) => debug!("OpenMic not configured; bot {} updated locally only", id),
                None => debug!("Bot {} has no external id; updating locally only", id),
            }
        }

        let bot = self
            .store
            .update_bot(id, update)
            .await?
            .ok_or(BotError::NotFound)?;

        info!("Bot updated: {}", bot.id);
        Ok(bot)
    }

    async fn sync_profile(
        &self,
        external_id: &str,
        existing: &Bot,
        update: &BotUpdate,
    ) -> Result<OpenMicBot, BotError> {
        let payload = UpdateOpenMicBotPayload {
            name: update.name.clone(),
            personality: update.personality.as_ref().map(|p| p.join(", ")),
            system_prompt: update.greeting.clone(),
        };
        let fallback = BotFallback {
            id: None,
            name: Some(update.name.clone().unwrap_or_else(|| existing.name.clone())),
            personality: Some(
                update
                    .personality
                    .clone()
                    .unwrap_or_else(|| existing.personality.clone()),
            ),
            greeting: Some(
                update
                    .greeting
                    .clone()
                    .unwrap_or_else(|| existing.greeting.clone()),
            ),
        };

        self.openmic.update_bot(external_id, payload, fallback).await
    }

    /// Remote deletion is best effort; the local record is always removed.
    pub async fn delete_bot(&self, id: &str) -> Result<(), BotError> {
        let bot = self.get_bot(id).await?;

        if let Some(external_id) = bot.external_bot_id.as_deref() {
            if let Err(e) = self.openmic.delete_bot(external_id).await {
                match e {
                    BotError::NotConfigured => {
                        warn!("Skipping OpenMic delete for {}: not configured", external_id)
                    }
                    other => error!("Failed to delete bot {} from OpenMic: {}", external_id, other),
                }
            }
        }

        if !self.store.delete_bot(id).await? {
            return Err(BotError::NotFound);
        }

        info!("Bot deleted: {}", id);
        Ok(())
    }

    pub async fn list_remote_bots(&self) -> Result<Vec<OpenMicBot>, BotError> {
        self.openmic.list_bots().await
    }
}
