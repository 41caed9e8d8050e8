//! In-memory policy store shared across request handlers.
//!
//! Process-lifetime only: a restart clears it. Writes take the write
//! lock for the duration of the mutation, so a clarification is one
//! atomic rule replacement.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::clarify::{apply_clarification, ClarificationUpdate};
use crate::models::{Policy, Rule};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("policy not found: {0}")]
    PolicyNotFound(String),

    #[error("rule {rule_id} not found in policy {policy_id}")]
    RuleNotFound { policy_id: String, rule_id: String },

    #[error("store lock poisoned")]
    LockPoisoned,
}

#[derive(Default)]
pub struct PolicyStore {
    policies: RwLock<HashMap<String, Policy>>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the policy under `policy_id`. Reprocessing
    /// the same id replaces the previous result wholesale.
    pub fn put(&self, policy_id: &str, policy: Policy) -> Result<(), StoreError> {
        let mut policies = self.policies.write().map_err(|_| StoreError::LockPoisoned)?;
        policies.insert(policy_id.to_string(), policy);
        Ok(())
    }

    pub fn get(&self, policy_id: &str) -> Result<Policy, StoreError> {
        let policies = self.policies.read().map_err(|_| StoreError::LockPoisoned)?;
        policies
            .get(policy_id)
            .cloned()
            .ok_or_else(|| StoreError::PolicyNotFound(policy_id.to_string()))
    }

    /// Applies a clarification to one rule and returns the updated rule.
    /// Rule order within the policy is preserved.
    pub fn clarify_rule(
        &self,
        policy_id: &str,
        rule_id: &str,
        update: &ClarificationUpdate,
    ) -> Result<Rule, StoreError> {
        let mut policies = self.policies.write().map_err(|_| StoreError::LockPoisoned)?;
        let policy = policies
            .get_mut(policy_id)
            .ok_or_else(|| StoreError::PolicyNotFound(policy_id.to_string()))?;
        let rule = policy
            .rules
            .iter_mut()
            .find(|r| r.rule_id == rule_id)
            .ok_or_else(|| StoreError::RuleNotFound {
                policy_id: policy_id.to_string(),
                rule_id: rule_id.to_string(),
            })?;

        *rule = apply_clarification(rule, update);
        Ok(rule.clone())
    }
}
