use serde::{Deserialize, Serialize};

use super::rule::Rule;

/// A processed policy: title plus rules in extraction order.
///
/// Created (or overwritten) only by a successful full pipeline run,
/// mutated field-by-field only through clarification, read-only for
/// submission. Rule order is preserved across clarification edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub policy_title: String,
    pub rules: Vec<Rule>,
}

impl Policy {
    pub fn new(policy_title: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            policy_title: policy_title.into(),
            rules,
        }
    }

    pub fn ambiguous_count(&self) -> usize {
        self.rules.iter().filter(|r| r.is_flagged_ambiguous()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_flagged_rules() {
        let flagged = Rule {
            rule_id: "R1".into(),
            original_text: None,
            conditions: vec![],
            action: "act".into(),
            responsible_role: "role".into(),
            beneficiary: "ben".into(),
            deadline: String::new(),
            ambiguity_flag: Some(true),
            ambiguity_reason: Some("vague".into()),
        };
        let clear = Rule {
            ambiguity_flag: Some(false),
            ambiguity_reason: Some(String::new()),
            ..flagged.clone()
        };

        let policy = Policy::new("Test Policy", vec![flagged, clear]);
        assert_eq!(policy.ambiguous_count(), 1);
    }
}
