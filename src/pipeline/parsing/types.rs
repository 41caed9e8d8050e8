use super::ParsingError;
use crate::models::Rule;

/// A parsed policy before it is stored: title plus normalized rules.
#[derive(Debug, Clone)]
pub struct ExtractedPolicy {
    pub policy_title: String,
    pub rules: Vec<Rule>,
}

/// LLM inference abstraction (allows mocking for tests).
pub trait LlmClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, ParsingError>;
}

/// Turns cleaned policy text into structured rules.
pub trait RuleExtractor {
    fn extract_rules(&self, text: &str) -> Result<ExtractedPolicy, ParsingError>;
}
