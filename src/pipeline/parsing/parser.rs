use serde::Deserialize;
use tracing::warn;

use super::types::ExtractedPolicy;
use super::ParsingError;
use crate::models::Rule;

const DEFAULT_TITLE: &str = "Untitled Policy";

/// Parse the LLM's response into a policy with normalized rules.
pub fn parse_extraction_response(response: &str) -> Result<ExtractedPolicy, ParsingError> {
    let json_str = extract_json_block(response)?;

    #[derive(Deserialize)]
    struct RawResponse {
        policy_title: Option<String>,
        rules: Option<Vec<serde_json::Value>>,
    }

    let raw: RawResponse = serde_json::from_str(&json_str)
        .map_err(|e| ParsingError::JsonParsing(e.to_string()))?;

    let policy_title = match raw.policy_title {
        Some(t) if !t.trim().is_empty() => t,
        _ => DEFAULT_TITLE.to_string(),
    };

    let mut rules: Vec<Rule> = Vec::new();
    for value in raw.rules.unwrap_or_default() {
        match serde_json::from_value::<Rule>(value) {
            Ok(rule) => rules.push(rule),
            // Lenient: a malformed rule is dropped, not fatal.
            Err(e) => warn!(error = %e, "skipping malformed rule from LLM response"),
        }
    }

    // Rules the model left unnumbered get sequential ids.
    for (i, rule) in rules.iter_mut().enumerate() {
        if rule.rule_id.trim().is_empty() {
            rule.rule_id = format!("R{}", i + 1);
        }
    }

    Ok(ExtractedPolicy { policy_title, rules })
}

/// Extract the JSON payload from an LLM response.
///
/// Prefers a fenced ```json block; falls back to the outermost brace
/// pair when the model skipped the fence. Shared with the ambiguity
/// pass.
pub(crate) fn extract_json_block(response: &str) -> Result<String, ParsingError> {
    if let Some(fence_start) = response.find("```json") {
        let content_start = fence_start + 7;
        let fence_end = response[content_start..]
            .find("```")
            .ok_or_else(|| ParsingError::MalformedResponse("Unclosed JSON block".into()))?;
        return Ok(response[content_start..content_start + fence_end]
            .trim()
            .to_string());
    }

    let start = response
        .find('{')
        .ok_or_else(|| ParsingError::MalformedResponse("No JSON object found".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| ParsingError::MalformedResponse("No JSON object found".into()))?;
    if end < start {
        return Err(ParsingError::MalformedResponse("No JSON object found".into()));
    }
    Ok(response[start..=end].to_string())
}
