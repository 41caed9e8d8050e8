//! Prompts for rule extraction.

pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are a compliance analyst. You read policy documents and extract every \
enforceable rule as structured data. You respond only with a fenced JSON \
block and no other commentary.";

/// Builds the rule-extraction prompt for a cleaned policy text.
pub fn build_extraction_prompt(policy_text: &str) -> String {
    format!(
        r#"Extract every enforceable rule from the policy document below.

Respond with exactly one fenced JSON block of this shape:

```json
{{
  "policy_title": "short title of the document",
  "rules": [
    {{
      "rule_id": "R1",
      "original_text": "the sentence(s) the rule comes from",
      "conditions": ["condition that must hold", "..."],
      "action": "what must be done",
      "responsible_role": "who must do it",
      "beneficiary": "who it is done for",
      "deadline": "when it must be done, verbatim from the text"
    }}
  ]
}}
```

Number rule_id values R1, R2, ... in document order. Use an empty string
for any field the document does not state. Do not invent rules that are
not in the document.

POLICY DOCUMENT:
{policy_text}"#
    )
}
