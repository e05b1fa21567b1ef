use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::{NewBot, NewCall, NewPatient, RiskLevel, Severity, NewCallFlag};

pub struct TestConfig {
    pub openai_url: String,
    pub openai_api_key: String,
    pub openmic_url: String,
    pub openmic_api_key: String,
    pub analyzer_timeout_secs: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            openai_url: "http://localhost:65535/v1".to_string(),
            openai_api_key: "test-openai-key".to_string(),
            openmic_url: "http://localhost:65535/api".to_string(),
            openmic_api_key: "test-openmic-key".to_string(),
            analyzer_timeout_secs: 2,
        }
    }
}

impl TestConfig {
    /// Points both external clients at the given mock server.
    pub fn with_mock_server(uri: &str) -> Self {
        Self {
            openai_url: format!("{}/v1", uri),
            openmic_url: format!("{}/api", uri),
            ..Self::default()
        }
    }

    /// No keys at all: analyzer always falls back, bot platform is unconfigured.
    pub fn unconfigured() -> Self {
        Self {
            openai_api_key: String::new(),
            openmic_api_key: String::new(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            seed_sample_data: false,
            openai_api_key: self.openai_api_key.clone(),
            openai_base_url: self.openai_url.clone(),
            openai_model: "gpt-test".to_string(),
            analyzer_timeout_secs: self.analyzer_timeout_secs,
            openmic_api_url: self.openmic_url.clone(),
            openmic_api_key: self.openmic_api_key.clone(),
            openmic_timeout_secs: 2,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestRecords;

impl TestRecords {
    pub fn patient(id: &str, name: &str) -> NewPatient {
        NewPatient {
            id: id.to_string(),
            name: name.to_string(),
            last_appointment: Some("2025-08-12".to_string()),
            last_topic: Some("anxiety management".to_string()),
            risk_level: Some(RiskLevel::Medium),
        }
    }

    pub fn bot(name: &str, crisis_keywords: &[&str]) -> NewBot {
        NewBot {
            name: name.to_string(),
            external_bot_id: None,
            personality: vec!["empathetic".to_string()],
            greeting: "Hello, thank you for calling the wellness line.".to_string(),
            crisis_keywords: crisis_keywords.iter().map(|k| k.to_string()).collect(),
            is_active: true,
        }
    }

    pub fn call(patient_id: Option<&str>, bot_id: Option<&str>) -> NewCall {
        NewCall {
            patient_id: patient_id.map(str::to_string),
            bot_id: bot_id.map(str::to_string),
            duration: Some(120),
            transcript: Some("I had a good week overall.".to_string()),
            sentiment_score: Some("0.4".to_string()),
            ..NewCall::default()
        }
    }

    pub fn flag(flag_type: &str, severity: Severity) -> NewCallFlag {
        NewCallFlag {
            flag_type: flag_type.to_string(),
            severity,
            content: Some(format!("Keyword \"{}\" detected in transcript", flag_type)),
        }
    }
}

pub struct MockLlmResponses;

impl MockLlmResponses {
    /// Chat-completions envelope whose message content is `content` serialized.
    pub fn analysis(content: Value) -> Value {
        Self::chat_completion(&content.to_string())
    }

    pub fn chat_completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }
            ]
        })
    }

    pub fn crisis_analysis() -> Value {
        Self::analysis(json!({
            "score": -0.9,
            "label": "crisis",
            "confidence": 0.92,
            "flags": [
                { "type": "suicidal", "severity": "high", "content": "want to end it all" },
                { "type": "hopeless", "severity": "medium", "content": "I feel hopeless" }
            ]
        }))
    }
}

pub struct MockOpenMicResponses;

impl MockOpenMicResponses {
    pub fn bot_created(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "personality": "empathetic, calm",
            "system_prompt": "Hello, thank you for calling the wellness line.",
            "created_at": "2025-09-01T00:00:00Z"
        })
    }

    pub fn bot_list() -> Value {
        json!([
            { "bot_id": "bot_a", "name": "Night Line", "personality": "calm" },
            { "uid": "bot_b", "greeting": "Hi there" }
        ])
    }

    pub fn error_response(message: &str) -> Value {
        json!({ "error": { "message": message } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::with_mock_server("http://127.0.0.1:9999").to_app_config();

        assert_eq!(config.openai_base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(config.openmic_api_url, "http://127.0.0.1:9999/api");
        assert!(config.is_llm_configured());
        assert!(config.is_openmic_configured());
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn unconfigured_test_config_has_no_keys() {
        let config = TestConfig::unconfigured().to_app_config();
        assert!(!config.is_llm_configured());
        assert!(!config.is_openmic_configured());
    }

    #[test]
    fn crisis_analysis_wraps_json_in_message_content() {
        let response = MockLlmResponses::crisis_analysis();
        let content = response["choices"][0]["message"]["content"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(content).unwrap();
        assert_eq!(parsed["label"], "crisis");
    }
}
