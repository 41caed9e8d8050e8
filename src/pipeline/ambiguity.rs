//! Ambiguity annotation: an LLM pass that flags vague rules, merged
//! back onto the extracted rule list by id.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::parsing::parser::extract_json_block;
use super::parsing::{LlmClient, ParsingError};
use crate::models::Rule;

pub const AMBIGUITY_SYSTEM_PROMPT: &str = "\
You are a compliance reviewer. You judge whether extracted policy rules \
are precise enough to execute, and explain briefly when they are not. \
You respond only with a fenced JSON block and no other commentary.";

/// One rule's verdict from the ambiguity pass.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleAnnotation {
    pub rule_id: String,
    #[serde(default)]
    pub ambiguity_flag: bool,
    #[serde(default)]
    pub ambiguity_reason: String,
}

/// Ambiguity classification abstraction (allows mocking for tests).
pub trait AmbiguityDetector {
    fn annotate(&self, rules: &[Rule]) -> Result<Vec<RuleAnnotation>, ParsingError>;
}

/// Merges annotations onto `rules` by rule_id.
///
/// The output has exactly the input's rules, in the input's order, with
/// only the ambiguity fields touched. A rule without an annotation is
/// marked unambiguous.
pub fn apply_annotations(rules: &[Rule], annotations: &[RuleAnnotation]) -> Vec<Rule> {
    rules
        .iter()
        .map(|rule| {
            let mut annotated = rule.clone();
            match annotations.iter().find(|a| a.rule_id == rule.rule_id) {
                Some(a) => {
                    annotated.ambiguity_flag = Some(a.ambiguity_flag);
                    annotated.ambiguity_reason = Some(a.ambiguity_reason.clone());
                }
                None => {
                    annotated.ambiguity_flag = Some(false);
                    annotated.ambiguity_reason = Some(String::new());
                }
            }
            annotated
        })
        .collect()
}

/// LLM-backed detector sharing the extraction pass's client.
pub struct LlmAmbiguityDetector {
    llm: Arc<dyn LlmClient + Send + Sync>,
    model: String,
}

impl LlmAmbiguityDetector {
    pub fn new(llm: Arc<dyn LlmClient + Send + Sync>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }
}

impl AmbiguityDetector for LlmAmbiguityDetector {
    fn annotate(&self, rules: &[Rule]) -> Result<Vec<RuleAnnotation>, ParsingError> {
        if rules.is_empty() {
            return Ok(vec![]);
        }

        let prompt = build_ambiguity_prompt(rules);
        let response = self
            .llm
            .generate(&self.model, &prompt, AMBIGUITY_SYSTEM_PROMPT)?;
        debug!(chars = response.len(), "ambiguity response received");
        parse_ambiguity_response(&response)
    }
}

fn build_ambiguity_prompt(rules: &[Rule]) -> String {
    let rules_json = serde_json::to_string_pretty(rules).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"Review each extracted rule below. A rule is ambiguous when its
responsible_role, deadline, or conditions are too vague to act on
(e.g. "promptly", "relevant staff", "as needed").

Respond with exactly one fenced JSON block of this shape:

```json
{{
  "annotations": [
    {{
      "rule_id": "R1",
      "ambiguity_flag": true,
      "ambiguity_reason": "one short sentence, or empty string when not ambiguous"
    }}
  ]
}}
```

Include every rule_id exactly once.

RULES:
{rules_json}"#
    )
}

fn parse_ambiguity_response(response: &str) -> Result<Vec<RuleAnnotation>, ParsingError> {
    #[derive(Deserialize)]
    struct RawResponse {
        annotations: Option<Vec<serde_json::Value>>,
    }

    let json_str = extract_json_block(response)?;
    let raw: RawResponse = serde_json::from_str(&json_str)
        .map_err(|e| ParsingError::JsonParsing(e.to_string()))?;

    let annotations = raw
        .annotations
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<RuleAnnotation>(v) {
            Ok(a) => Some(a),
            Err(e) => {
                warn!(error = %e, "skipping malformed ambiguity annotation");
                None
            }
        })
        .collect();

    Ok(annotations)
}

/// Mock detector for testing — returns configured annotations.
pub struct MockAmbiguityDetector {
    annotations: Vec<RuleAnnotation>,
}

impl MockAmbiguityDetector {
    pub fn new(annotations: Vec<RuleAnnotation>) -> Self {
        Self { annotations }
    }

    /// Marks every rule unambiguous.
    pub fn all_clear() -> Self {
        Self::new(vec![])
    }
}

impl AmbiguityDetector for MockAmbiguityDetector {
    fn annotate(&self, _rules: &[Rule]) -> Result<Vec<RuleAnnotation>, ParsingError> {
        Ok(self.annotations.clone())
    }
}
