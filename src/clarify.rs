//! Clarification merge: applies a human's answers to an ambiguous rule.

use serde::Deserialize;

use crate::models::Rule;

/// Fields a reviewer may supply to resolve an ambiguous rule.
///
/// Absent fields are left untouched. A present but empty
/// `clarified_responsible_role` or `clarified_deadline` also means "no
/// change" — clients blank out form fields they did not edit.
/// `clarified_conditions` is different: when present it replaces the
/// condition list outright, including with `[]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClarificationUpdate {
    #[serde(default)]
    pub clarified_responsible_role: Option<String>,
    #[serde(default)]
    pub clarified_deadline: Option<String>,
    #[serde(default)]
    pub clarified_conditions: Option<Vec<String>>,
}

/// Merges `update` into `rule` and strips the ambiguity markers.
///
/// The ambiguity fields (`ambiguity_flag`, `ambiguity_reason`,
/// `original_text`) are cleared unconditionally, even for an empty
/// update: reviewing a rule resolves it.
pub fn apply_clarification(rule: &Rule, update: &ClarificationUpdate) -> Rule {
    let mut clarified = rule.clone();

    if let Some(role) = &update.clarified_responsible_role {
        if !role.is_empty() {
            clarified.responsible_role = role.clone();
        }
    }
    if let Some(deadline) = &update.clarified_deadline {
        if !deadline.is_empty() {
            clarified.deadline = deadline.clone();
        }
    }
    if let Some(conditions) = &update.clarified_conditions {
        clarified.conditions = conditions.clone();
    }

    clarified.ambiguity_flag = None;
    clarified.ambiguity_reason = None;
    clarified.original_text = None;
    clarified
}
