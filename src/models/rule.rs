use serde::{Deserialize, Serialize};

/// A single extracted obligation: who must do what, for whom, by when,
/// under which conditions.
///
/// A rule is either *raw* (fresh from extraction — `original_text`,
/// `ambiguity_flag` and `ambiguity_reason` may be populated) or
/// *clarified* (all three are `None` and omitted from JSON). The
/// transition is one-way; see [`crate::clarify::apply_clarification`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: String,
    /// Source excerpt the rule was derived from. Cleared on clarification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    /// Ordered — conditions may be conjunctive in sequence.
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub responsible_role: String,
    #[serde(default)]
    pub beneficiary: String,
    /// Free-form; no temporal grammar is enforced.
    #[serde(default)]
    pub deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambiguity_flag: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambiguity_reason: Option<String>,
}

impl Rule {
    /// Whether this rule has left the ambiguous state.
    pub fn is_clarified(&self) -> bool {
        self.ambiguity_flag.is_none()
            && self.ambiguity_reason.is_none()
            && self.original_text.is_none()
    }

    pub fn is_flagged_ambiguous(&self) -> bool {
        self.ambiguity_flag == Some(true)
    }
}

/// Projection of a clarified rule returned by the clarify endpoint.
/// Never carries ambiguity fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarifiedRule {
    pub rule_id: String,
    pub conditions: Vec<String>,
    pub action: String,
    pub responsible_role: String,
    pub beneficiary: String,
    pub deadline: String,
}

impl From<Rule> for ClarifiedRule {
    fn from(rule: Rule) -> Self {
        Self {
            rule_id: rule.rule_id,
            conditions: rule.conditions,
            action: rule.action,
            responsible_role: rule.responsible_role,
            beneficiary: rule.beneficiary,
            deadline: rule.deadline,
        }
    }
}
