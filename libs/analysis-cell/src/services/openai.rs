use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::AnalysisError;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    /// Ask the model for a JSON object instead of free text.
    pub json_response: bool,
}

/// Seam between the analysis services and whichever model answers them.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the assistant message content.
    async fn complete(&self, request: ChatRequest) -> Result<String, AnalysisError>;
}

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AnalysisError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.analyzer_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        })
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn request_body(&self, request: &ChatRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ]
        });

        if request.json_response {
            body["response_format"] = json!({ "type": "json_object" });
        }

        body
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, AnalysisError> {
        if !self.is_configured() {
            return Err(AnalysisError::NotConfigured);
        }

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Sending chat completion request to {} (model {})", url, self.model);

        let response = self
            .http_client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&self.request_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: Value = response.json().await?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                AnalysisError::InvalidResponse("missing choices[0].message.content".to_string())
            })
    }
}
