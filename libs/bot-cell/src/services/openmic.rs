use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use shared_config::AppConfig;

use crate::models::{
    BotError, BotFallback, CreateOpenMicBotPayload, OpenMicApiResponse, OpenMicBot,
    UpdateOpenMicBotPayload,
};
use crate::services::mapping::{bot_list_entries, map_bot_response};

/// OpenMic voice platform client.
///
/// Every call is bounded by the configured timeout and performed once; the
/// caller decides whether a failure is fatal.
pub struct OpenMicClient {
    client: Client,
    base_url: String,
    api_key: String,
    configured: bool,
}

impl OpenMicClient {
    pub fn new(config: &AppConfig) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.openmic_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.openmic_api_url.trim_end_matches('/').to_string(),
            api_key: config.openmic_api_key.clone(),
            configured: config.is_openmic_configured(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    fn ensure_configured(&self) -> Result<(), BotError> {
        if !self.configured {
            warn!("OpenMic integration not configured");
            return Err(BotError::NotConfigured);
        }
        Ok(())
    }

    async fn check_status(response: Response, operation: &str) -> Result<Response, BotError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        error!("OpenMic {} failed: {} - {}", operation, status, error_text);
        Err(BotError::PlatformApi {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or(error_text),
        })
    }

    /// POST /bots
    pub async fn create_bot(
        &self,
        name: &str,
        personality: &[String],
        greeting: &str,
    ) -> Result<OpenMicBot, BotError> {
        self.ensure_configured()?;

        let payload = CreateOpenMicBotPayload {
            name: name.to_string(),
            description: format!("Mental health triage bot: {}", name),
            personality: personality.join(", "),
            system_prompt: greeting.to_string(),
            functions: vec![patient_info_function()],
        };

        let url = format!("{}/bots", self.base_url);
        debug!("Creating OpenMic bot at {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;
        let response = Self::check_status(response, "bot creation").await?;

        let raw: OpenMicApiResponse = response
            .json()
            .await
            .map_err(|e| BotError::InvalidResponse(e.to_string()))?;

        let bot = map_bot_response(
            &raw,
            &BotFallback {
                id: None,
                name: Some(name.to_string()),
                personality: Some(personality.to_vec()),
                greeting: Some(greeting.to_string()),
            },
        );

        info!("OpenMic bot created: {}", bot.id);
        Ok(bot)
    }

    /// PATCH /bots/{id}
    pub async fn update_bot(
        &self,
        external_bot_id: &str,
        payload: UpdateOpenMicBotPayload,
        fallback: BotFallback,
    ) -> Result<OpenMicBot, BotError> {
        self.ensure_configured()?;

        let url = format!("{}/bots/{}", self.base_url, external_bot_id);
        debug!("Updating OpenMic bot at {}", url);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;
        let response = Self::check_status(response, "bot update").await?;

        // Some deployments answer 204 with no body.
        let raw: OpenMicApiResponse = match response.text().await?.trim() {
            "" => OpenMicApiResponse::default(),
            text => serde_json::from_str(text)
                .map_err(|e| BotError::InvalidResponse(e.to_string()))?,
        };

        let fallback = BotFallback {
            id: Some(external_bot_id.to_string()),
            ..fallback
        };
        let bot = map_bot_response(&raw, &fallback);

        info!("OpenMic bot updated: {}", bot.id);
        Ok(bot)
    }

    /// DELETE /bots/{id}
    pub async fn delete_bot(&self, external_bot_id: &str) -> Result<(), BotError> {
        self.ensure_configured()?;

        let url = format!("{}/bots/{}", self.base_url, external_bot_id);
        debug!("Deleting OpenMic bot at {}", url);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Self::check_status(response, "bot deletion").await?;

        info!("OpenMic bot deleted: {}", external_bot_id);
        Ok(())
    }

    /// GET /bots
    pub async fn list_bots(&self) -> Result<Vec<OpenMicBot>, BotError> {
        self.ensure_configured()?;

        let url = format!("{}/bots", self.base_url);
        debug!("Listing OpenMic bots at {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = Self::check_status(response, "bot listing").await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| BotError::InvalidResponse(e.to_string()))?;
        let entries = bot_list_entries(body)
            .ok_or_else(|| BotError::InvalidResponse("expected a list of bots".to_string()))?;

        let bots = entries
            .into_iter()
            .map(|entry| {
                let raw: OpenMicApiResponse = serde_json::from_value(entry)
                    .map_err(|e| BotError::InvalidResponse(e.to_string()))?;
                Ok(map_bot_response(&raw, &BotFallback::default()))
            })
            .collect::<Result<Vec<_>, BotError>>()?;

        debug!("Fetched {} OpenMic bots", bots.len());
        Ok(bots)
    }
}

/// In-call function the platform may invoke to look a patient up.
fn patient_info_function() -> Value {
    json!({
        "name": "getPatientInfo",
        "description": "Retrieve patient information by ID for mental health triage",
        "parameters": {
            "type": "object",
            "properties": {
                "patientId": {
                    "type": "string",
                    "description": "The patient's unique identifier"
                }
            },
            "required": ["patientId"]
        }
    })
}
