//! Outbound projection: what the execution backend receives.

pub mod backend;

pub use backend::{DeliveryOutcome, ExecutionBackend, HttpExecutionBackend, MockExecutionBackend};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::Policy;

/// One rule as the execution backend ingests it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRule {
    pub rule_id: String,
    pub action: String,
    pub responsible_role: String,
    pub deadline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPayload {
    pub policy_id: String,
    pub rules: Vec<ExecutionRule>,
}

/// Projects a stored policy onto the execution payload.
///
/// Rules missing an id, action or responsible role are not executable
/// and are skipped with a warning. Only a truly empty field counts as
/// missing; whitespace content is delivered as-is. A missing deadline
/// is allowed and sent as an empty string.
pub fn build_payload(policy_id: &str, policy: &Policy) -> ExecutionPayload {
    let rules = policy
        .rules
        .iter()
        .filter_map(|rule| {
            if rule.rule_id.is_empty()
                || rule.action.is_empty()
                || rule.responsible_role.is_empty()
            {
                warn!(
                    policy_id = %policy_id,
                    rule_id = %rule.rule_id,
                    "skipping non-executable rule in submission"
                );
                return None;
            }
            Some(ExecutionRule {
                rule_id: rule.rule_id.clone(),
                action: rule.action.clone(),
                responsible_role: rule.responsible_role.clone(),
                deadline: rule.deadline.clone(),
            })
        })
        .collect();

    ExecutionPayload {
        policy_id: policy_id.to_string(),
        rules,
    }
}
