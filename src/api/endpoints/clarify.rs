//! POST /api/policy/clarify — apply a reviewer's answers to one rule.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::clarify::ClarificationUpdate;
use crate::models::ClarifiedRule;

#[derive(Debug, Deserialize)]
pub struct ClarifyRequest {
    pub policy_id: String,
    pub rule_id: String,
    #[serde(flatten)]
    pub update: ClarificationUpdate,
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Json(req): Json<ClarifyRequest>,
) -> Result<Json<ClarifiedRule>, ApiError> {
    let rule = ctx
        .store
        .clarify_rule(&req.policy_id, &req.rule_id, &req.update)?;
    info!(policy_id = %req.policy_id, rule_id = %req.rule_id, "rule clarified");

    Ok(Json(ClarifiedRule::from(rule)))
}
