use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use shared_models::{SentimentLabel, Severity};

use crate::models::{AnalysisError, AnalysisSource, CrisisFlag, SentimentAnalysis};
use crate::services::openai::{ChatRequest, LanguageModel};

const FALLBACK_CRISIS_SCORE: f64 = -0.8;
const FALLBACK_CONFIDENCE: f64 = 0.5;

pub struct SentimentAnalyzer {
    model: Arc<dyn LanguageModel>,
    timeout: Duration,
}

impl SentimentAnalyzer {
    pub fn new(model: Arc<dyn LanguageModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Never fails: any model failure degrades to [`keyword_fallback`].
    pub async fn analyze(&self, transcript: &str, crisis_keywords: &[String]) -> SentimentAnalysis {
        let request = analysis_request(transcript, crisis_keywords);

        let outcome = match timeout(self.timeout, self.model.complete(request)).await {
            Ok(Ok(content)) => parse_analysis(&content),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(AnalysisError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        };

        match outcome {
            Ok(analysis) => {
                info!(
                    "Transcript analysed: label={} score={} flags={}",
                    analysis.label.as_str(),
                    analysis.score,
                    analysis.flags.len()
                );
                analysis
            }
            Err(err) => {
                warn!("Sentiment analysis failed, using keyword fallback: {}", err);
                let analysis = keyword_fallback(transcript, crisis_keywords);
                info!(
                    "Keyword fallback: label={} flags={} (transcript {} chars)",
                    analysis.label.as_str(),
                    analysis.flags.len(),
                    transcript.len()
                );
                analysis
            }
        }
    }
}

fn analysis_request(transcript: &str, crisis_keywords: &[String]) -> ChatRequest {
    let system = format!(
        "You are a mental health sentiment analysis expert. Analyze the conversation transcript for:\n\
         1. Overall sentiment score (-1 to 1, where -1 is severely distressed, 1 is very positive)\n\
         2. Sentiment label (positive, neutral, distress, crisis)\n\
         3. Confidence level (0-1)\n\
         4. Crisis flags for any concerning language\n\n\
         Crisis keywords to watch for: {}\n\n\
         Look for indicators of:\n\
         - Self-harm intentions\n\
         - Suicidal ideation\n\
         - Hopelessness\n\
         - Immediate danger\n\
         - Substance abuse mentions\n\
         - Violent thoughts\n\n\
         Respond with JSON in this format:\n\
         {{\"score\": number, \"label\": string, \"confidence\": number, \
         \"flags\": [{{\"type\": string, \"severity\": \"low|medium|high\", \"content\": string}}]}}",
        crisis_keywords.join(", ")
    );

    ChatRequest {
        system,
        user: format!(
            "Analyze this mental health conversation transcript:\n\n{}",
            transcript
        ),
        json_response: true,
    }
}

/// Fields are kept loose so one odd value never discards the whole answer.
#[derive(Deserialize)]
struct RawAnalysis {
    score: Option<Value>,
    label: Option<Value>,
    confidence: Option<Value>,
    flags: Option<Value>,
}

#[derive(Deserialize)]
struct RawFlag {
    #[serde(rename = "type", default)]
    flag_type: Option<String>,
    #[serde(default)]
    severity: Option<Value>,
    #[serde(default)]
    content: Option<String>,
}

/// Parses the model's JSON answer, clamping numbers into range and filling
/// absent fields with neutral defaults. Only a body that is not a JSON object
/// is an error; malformed flags are dropped one by one.
pub(crate) fn parse_analysis(content: &str) -> Result<SentimentAnalysis, AnalysisError> {
    let raw: RawAnalysis = serde_json::from_str(content)?;

    let label = match raw.label.as_ref() {
        None => SentimentLabel::Neutral,
        Some(value) => value
            .as_str()
            .and_then(SentimentLabel::parse)
            .unwrap_or_else(|| {
                warn!("Unknown sentiment label {}, treating as neutral", value);
                SentimentLabel::Neutral
            }),
    };

    let flags = match raw.flags {
        Some(Value::Array(entries)) => entries.into_iter().filter_map(parse_flag).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!("Ignoring non-array flags in model answer: {}", other);
            Vec::new()
        }
    };

    Ok(SentimentAnalysis {
        score: number(raw.score.as_ref()).unwrap_or(0.0).clamp(-1.0, 1.0),
        label,
        confidence: number(raw.confidence.as_ref())
            .unwrap_or(0.0)
            .clamp(0.0, 1.0),
        flags,
        source: AnalysisSource::LanguageModel,
    })
}

fn parse_flag(entry: Value) -> Option<CrisisFlag> {
    let flag: RawFlag = match serde_json::from_value(entry) {
        Ok(flag) => flag,
        Err(err) => {
            warn!("Dropping malformed crisis flag: {}", err);
            return None;
        }
    };

    let severity = match flag.severity.as_ref() {
        Some(value) => value.as_str().and_then(Severity::parse).unwrap_or_else(|| {
            debug!("Unknown flag severity {}, using default", value);
            Severity::default()
        }),
        None => Severity::default(),
    };

    Some(CrisisFlag {
        flag_type: flag.flag_type.unwrap_or_default(),
        severity,
        content: flag.content.unwrap_or_default(),
    })
}

/// Accepts JSON numbers and numeric strings.
fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Case-insensitive substring match of every keyword. Blank keywords are
/// ignored since they would match any transcript.
pub fn keyword_fallback(transcript: &str, crisis_keywords: &[String]) -> SentimentAnalysis {
    let lower_transcript = transcript.to_lowercase();

    let flags: Vec<CrisisFlag> = crisis_keywords
        .iter()
        .filter(|keyword| !keyword.trim().is_empty())
        .filter(|keyword| lower_transcript.contains(&keyword.to_lowercase()))
        .map(|keyword| CrisisFlag {
            flag_type: keyword.clone(),
            severity: Severity::High,
            content: format!("Keyword \"{}\" detected in transcript", keyword),
        })
        .collect();

    let (score, label) = if flags.is_empty() {
        (0.0, SentimentLabel::Neutral)
    } else {
        (FALLBACK_CRISIS_SCORE, SentimentLabel::Crisis)
    };

    SentimentAnalysis {
        score,
        label,
        confidence: FALLBACK_CONFIDENCE,
        flags,
        source: AnalysisSource::KeywordFallback,
    }
}
