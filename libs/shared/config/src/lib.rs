use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub seed_sample_data: bool,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub analyzer_timeout_secs: u64,
    pub openmic_api_url: String,
    pub openmic_api_key: String,
    pub openmic_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            seed_sample_data: true,
            openai_api_key: String::new(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-5".to_string(),
            analyzer_timeout_secs: 20,
            openmic_api_url: "https://chat.openmic.ai/api".to_string(),
            openmic_api_key: String::new(),
            openmic_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            port: parse_or("PORT", defaults.port),
            seed_sample_data: parse_or("SEED_SAMPLE_DATA", defaults.seed_sample_data),
            openai_api_key: env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("OPENAI_API_KEY not set, sentiment analysis will use keyword fallback");
                    String::new()
                }),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or(defaults.openai_base_url),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or(defaults.openai_model),
            analyzer_timeout_secs: parse_or("ANALYZER_TIMEOUT_SECS", defaults.analyzer_timeout_secs),
            openmic_api_url: env::var("OPENMIC_API_URL")
                .unwrap_or_else(|_| {
                    warn!("OPENMIC_API_URL not set, using default");
                    defaults.openmic_api_url
                }),
            openmic_api_key: env::var("OPENMIC_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("OPENMIC_API_KEY not set, using empty value");
                    String::new()
                }),
            openmic_timeout_secs: parse_or("OPENMIC_TIMEOUT_SECS", defaults.openmic_timeout_secs),
        };

        if !config.is_openmic_configured() {
            warn!("OpenMic integration not configured - bot registration will be unavailable");
        }

        config
    }

    pub fn is_llm_configured(&self) -> bool {
        !self.openai_api_key.is_empty() && !self.openai_base_url.is_empty()
    }

    /// `demo_key` is the placeholder shipped in sample env files.
    pub fn is_openmic_configured(&self) -> bool {
        !self.openmic_api_key.is_empty()
            && self.openmic_api_key != "demo_key"
            && !self.openmic_api_url.is_empty()
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_not_configured() {
        let config = AppConfig::default();
        assert!(!config.is_llm_configured());
        assert!(!config.is_openmic_configured());
        assert_eq!(config.openmic_timeout_secs, 10);
    }

    #[test]
    fn demo_key_does_not_count_as_configured() {
        let config = AppConfig {
            openmic_api_key: "demo_key".to_string(),
            ..AppConfig::default()
        };
        assert!(!config.is_openmic_configured());

        let config = AppConfig {
            openmic_api_key: "live-key".to_string(),
            ..AppConfig::default()
        };
        assert!(config.is_openmic_configured());
    }
}
