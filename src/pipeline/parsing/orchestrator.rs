use std::sync::Arc;

use tracing::debug;

use super::parser::parse_extraction_response;
use super::prompt::{build_extraction_prompt, EXTRACTION_SYSTEM_PROMPT};
use super::types::{ExtractedPolicy, LlmClient, RuleExtractor};
use super::ParsingError;

/// Rule extraction through an LLM: prompt, generate, parse.
pub struct PolicyParser {
    llm: Arc<dyn LlmClient + Send + Sync>,
    model: String,
}

impl PolicyParser {
    pub fn new(llm: Arc<dyn LlmClient + Send + Sync>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }
}

impl RuleExtractor for PolicyParser {
    fn extract_rules(&self, text: &str) -> Result<ExtractedPolicy, ParsingError> {
        let prompt = build_extraction_prompt(text);
        let response = self
            .llm
            .generate(&self.model, &prompt, EXTRACTION_SYSTEM_PROMPT)?;
        debug!(chars = response.len(), "rule extraction response received");
        parse_extraction_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parsing::ollama::MockLlmClient;

    #[test]
    fn extracts_rules_through_mock_llm() {
        let response = r#"```json
{"policy_title": "Leave Policy", "rules": [{"rule_id": "R1", "action": "request leave"}]}
```"#;
        let parser = PolicyParser::new(Arc::new(MockLlmClient::new(response)), "llama3.1:8b");

        let policy = parser.extract_rules("some policy text").unwrap();
        assert_eq!(policy.policy_title, "Leave Policy");
        assert_eq!(policy.rules.len(), 1);
    }

    #[test]
    fn llm_failure_propagates() {
        let parser = PolicyParser::new(
            Arc::new(MockLlmClient::failing("connection refused")),
            "llama3.1:8b",
        );
        assert!(parser.extract_rules("text").is_err());
    }
}
