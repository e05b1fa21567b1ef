use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared_database::StoreError;
use shared_models::AppError;

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBotRequest {
    pub name: Option<String>,
    pub personality: Option<Vec<String>>,
    pub greeting: Option<String>,
    pub crisis_keywords: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

// ==============================================================================
// OPENMIC MODELS
// ==============================================================================

/// A bot as the rest of the service sees it, whatever shape OpenMic used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenMicBot {
    pub id: String,
    pub name: String,
    pub personality: Vec<String>,
    pub greeting: String,
    pub functions: Vec<Value>,
}

/// Raw OpenMic payload. Different API versions name the id and greeting
/// differently and send personality either as a comma list or an array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenMicApiResponse {
    pub id: Option<Value>,
    pub bot_id: Option<Value>,
    pub uid: Option<Value>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub personality: Option<Value>,
    pub system_prompt: Option<String>,
    pub greeting: Option<String>,
    pub functions: Option<Vec<Value>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Locally known values used wherever the platform response is silent.
#[derive(Debug, Clone, Default)]
pub struct BotFallback {
    pub id: Option<String>,
    pub name: Option<String>,
    pub personality: Option<Vec<String>>,
    pub greeting: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOpenMicBotPayload {
    pub name: String,
    pub description: String,
    pub personality: String,
    pub system_prompt: String,
    pub functions: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOpenMicBotPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Bot not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("OpenMic integration error: OpenMic API key not configured. Please set OPENMIC_API_KEY environment variable.")]
    NotConfigured,

    #[error("OpenMic API error ({status}): {message}")]
    PlatformApi { status: u16, message: String },

    #[error("OpenMic request failed: {0}")]
    Http(String),

    #[error("Invalid OpenMic response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Http(err.to_string())
    }
}

impl From<BotError> for AppError {
    fn from(err: BotError) -> Self {
        match err {
            BotError::NotFound => AppError::not_found("Bot"),
            BotError::Validation(msg) => AppError::BadRequest(msg),
            BotError::NotConfigured => AppError::ServiceUnavailable(err.to_string()),
            BotError::Store(store_err) => store_err.into(),
            BotError::PlatformApi { .. } | BotError::Http(_) | BotError::InvalidResponse(_) => {
                AppError::ExternalService(err.to_string())
            }
        }
    }
}
