//! # Analysis Cell
//!
//! Sentiment and crisis analysis of call transcripts.
//!
//! ```text
//! +-----------------------------------------------------+
//! |                  Analysis Cell                      |
//! +-----------------------------------------------------+
//! |  models.rs        |  Analysis results & errors      |
//! |  services/        |                                 |
//! |    openai.rs      |  Chat-completions client        |
//! |    sentiment.rs   |  Analyzer + keyword fallback    |
//! |    summary.rs     |  Clinical call summaries        |
//! +-----------------------------------------------------+
//! ```
//!
//! The analyzer never returns an error: when the language model is missing,
//! slow, or answers with something unparseable, the transcript is scanned for
//! the configured crisis keywords instead, so a crisis is never silently
//! missed.

pub mod models;
pub mod services;

pub use models::{AnalysisError, AnalysisSource, CrisisFlag, SentimentAnalysis};
pub use services::{
    CallSummaryService, ChatRequest, LanguageModel, OpenAiClient, SentimentAnalyzer,
};
