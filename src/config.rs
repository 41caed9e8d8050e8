//! Application constants and environment-driven configuration.

pub const APP_NAME: &str = "Rulemill";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upload cap enforced by the validator (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Minimum cleaned-text length considered meaningful for rule extraction.
pub const MIN_TEXT_CHARS: usize = 50;

/// Timeout for the outbound delivery to the execution backend.
pub const BACKEND_TIMEOUT_SECS: u64 = 10;

/// Timeout for LLM calls (rule extraction, ambiguity classification).
pub const LLM_TIMEOUT_SECS: u64 = 300;

/// Slack above `MAX_UPLOAD_BYTES` for multipart framing overhead.
/// The validator, not the HTTP framework, must produce the 413.
pub const BODY_LIMIT_BYTES: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn default_log_filter() -> String {
    "info,rulemill=debug".to_string()
}

/// Address the HTTP server binds to.
pub fn bind_addr() -> String {
    std::env::var("RULEMILL_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string())
}

/// Base URL of the local Ollama instance.
pub fn ollama_url() -> String {
    std::env::var("RULEMILL_OLLAMA_URL")
        .unwrap_or_else(|_| "http://localhost:11434".to_string())
}

/// Model used for rule extraction and ambiguity classification.
pub fn llm_model() -> String {
    std::env::var("RULEMILL_LLM_MODEL").unwrap_or_else(|_| "llama3.1:8b".to_string())
}

/// Ingest endpoint of the downstream execution backend.
pub fn execution_backend_url() -> String {
    std::env::var("RULEMILL_EXECUTION_BACKEND_URL").unwrap_or_else(|_| {
        "https://policy-execution-backend.onrender.com/policies/ingest".to_string()
    })
}
