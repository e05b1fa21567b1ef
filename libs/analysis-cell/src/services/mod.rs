pub mod openai;
pub mod sentiment;
pub mod summary;

pub use openai::{ChatRequest, LanguageModel, OpenAiClient};
pub use sentiment::SentimentAnalyzer;
pub use summary::CallSummaryService;
