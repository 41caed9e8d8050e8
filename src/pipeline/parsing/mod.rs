pub mod ollama;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod types;

pub use ollama::{MockLlmClient, OllamaClient};
pub use orchestrator::PolicyParser;
pub use types::{ExtractedPolicy, LlmClient, RuleExtractor};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("cannot reach Ollama at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("LLM service returned {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing failed: {0}")]
    JsonParsing(String),
}
