use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==============================================================================
// ENUMERATIONS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    /// Case-insensitive parse. "critical" and "severe" rank as high.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" | "moderate" => Some(Severity::Medium),
            "high" | "critical" | "severe" => Some(Severity::High),
            _ => None,
        }
    }
}

/// Coarse emotional tenor of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    #[default]
    Neutral,
    Distress,
    Crisis,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Distress => "distress",
            SentimentLabel::Crisis => "crisis",
        }
    }

    /// Case-insensitive parse; `None` for anything outside the four labels.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "positive" => Some(SentimentLabel::Positive),
            "neutral" => Some(SentimentLabel::Neutral),
            "distress" => Some(SentimentLabel::Distress),
            "crisis" => Some(SentimentLabel::Crisis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    #[default]
    Completed,
    Crisis,
    FollowUp,
}

impl CallStatus {
    /// Status assigned when a call is first processed. `FollowUp` is never
    /// derived, only set by staff through a call update.
    pub fn from_label(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Crisis => CallStatus::Crisis,
            _ => CallStatus::Completed,
        }
    }
}

// ==============================================================================
// PATIENTS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Clinic-assigned identifier (MRN), never generated here.
    pub id: String,
    pub name: String,
    pub last_appointment: Option<String>,
    pub last_topic: Option<String>,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub id: String,
    pub name: String,
    pub last_appointment: Option<String>,
    pub last_topic: Option<String>,
    pub risk_level: Option<RiskLevel>,
}

// ==============================================================================
// BOTS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    pub id: String,
    pub name: String,
    /// Set once the bot is registered on the voice platform.
    pub external_bot_id: Option<String>,
    pub personality: Vec<String>,
    pub greeting: String,
    pub crisis_keywords: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBot {
    pub name: String,
    pub external_bot_id: Option<String>,
    pub personality: Vec<String>,
    pub greeting: String,
    pub crisis_keywords: Vec<String>,
    pub is_active: bool,
}

impl Default for NewBot {
    fn default() -> Self {
        Self {
            name: String::new(),
            external_bot_id: None,
            personality: Vec::new(),
            greeting: String::new(),
            crisis_keywords: Vec::new(),
            is_active: true,
        }
    }
}

/// Partial update: only `Some` fields overwrite. The platform id is owned
/// by the bot service and cannot be changed through an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotUpdate {
    pub name: Option<String>,
    pub personality: Option<Vec<String>>,
    pub greeting: Option<String>,
    pub crisis_keywords: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl BotUpdate {
    pub fn apply_to(self, bot: &mut Bot) {
        if let Some(name) = self.name {
            bot.name = name;
        }
        if let Some(personality) = self.personality {
            bot.personality = personality;
        }
        if let Some(greeting) = self.greeting {
            bot.greeting = greeting;
        }
        if let Some(crisis_keywords) = self.crisis_keywords {
            bot.crisis_keywords = crisis_keywords;
        }
        if let Some(is_active) = self.is_active {
            bot.is_active = is_active;
        }
    }

    /// True when the update touches fields mirrored on the voice platform.
    pub fn changes_profile(&self) -> bool {
        self.name.is_some() || self.personality.is_some() || self.greeting.is_some()
    }
}

// ==============================================================================
// CALLS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: String,
    pub patient_id: Option<String>,
    pub bot_id: Option<String>,
    pub external_call_id: Option<String>,
    /// Seconds.
    pub duration: Option<i64>,
    pub transcript: Option<String>,
    /// Decimal string in [-1, 1], e.g. `"-0.8"`.
    pub sentiment_score: Option<String>,
    pub sentiment_label: Option<SentimentLabel>,
    pub status: CallStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCall {
    pub patient_id: Option<String>,
    pub bot_id: Option<String>,
    pub external_call_id: Option<String>,
    pub duration: Option<i64>,
    pub transcript: Option<String>,
    pub sentiment_score: Option<String>,
    pub sentiment_label: Option<SentimentLabel>,
    pub status: CallStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallUpdate {
    pub patient_id: Option<String>,
    pub bot_id: Option<String>,
    pub duration: Option<i64>,
    pub transcript: Option<String>,
    pub sentiment_score: Option<String>,
    pub sentiment_label: Option<SentimentLabel>,
    pub status: Option<CallStatus>,
}

impl CallUpdate {
    pub fn apply_to(self, call: &mut Call) {
        if let Some(patient_id) = self.patient_id {
            call.patient_id = Some(patient_id);
        }
        if let Some(bot_id) = self.bot_id {
            call.bot_id = Some(bot_id);
        }
        if let Some(duration) = self.duration {
            call.duration = Some(duration);
        }
        if let Some(transcript) = self.transcript {
            call.transcript = Some(transcript);
        }
        if let Some(sentiment_score) = self.sentiment_score {
            call.sentiment_score = Some(sentiment_score);
        }
        if let Some(sentiment_label) = self.sentiment_label {
            call.sentiment_label = Some(sentiment_label);
        }
        if let Some(status) = self.status {
            call.status = status;
        }
    }
}

/// Renders a score the way it is persisted on a call.
pub fn format_sentiment_score(score: f64) -> String {
    score.clamp(-1.0, 1.0).to_string()
}

// ==============================================================================
// FLAGS & AUDIT RECORDS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFlag {
    pub id: String,
    pub call_id: String,
    pub flag_type: String,
    pub severity: Severity,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCallFlag {
    pub flag_type: String,
    pub severity: Severity,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCall {
    pub id: String,
    pub call_id: Option<String>,
    pub endpoint: String,
    pub request_data: Option<Value>,
    pub response_data: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApiCall {
    pub call_id: Option<String>,
    pub endpoint: String,
    pub request_data: Option<Value>,
    pub response_data: Option<Value>,
}

// ==============================================================================
// COMPOSITE VIEWS
// ==============================================================================

/// A call joined with everything that references or is referenced by it.
/// Dangling patient/bot references simply leave those fields empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallWithDetails {
    #[serde(flatten)]
    pub call: Call,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patient: Option<Patient>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bot: Option<Bot>,
    pub flags: Vec<CallFlag>,
    pub api_calls: Vec<ApiCall>,
}
