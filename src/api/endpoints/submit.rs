//! POST /api/policy/submit — deliver a stored policy downstream.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::submit::{build_payload, DeliveryOutcome};

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub policy_id: String,
}

pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<Value>, ApiError> {
    let policy = ctx.store.get(&req.policy_id)?;
    let payload = build_payload(&req.policy_id, &policy);
    info!(
        policy_id = %req.policy_id,
        rules = payload.rules.len(),
        "submitting policy to execution backend"
    );

    let backend = ctx.backend.clone();
    let outcome = tokio::task::spawn_blocking(move || backend.deliver(&payload))
        .await
        .map_err(|e| ApiError::Internal(format!("delivery task failed: {e}")))?;

    match outcome {
        DeliveryOutcome::Delivered(backend_response) => Ok(Json(json!({
            "status": "success",
            "message": "Policy submitted to execution engine",
            "backend_response": backend_response,
        }))),
        DeliveryOutcome::Rejected { status, body } => {
            Err(ApiError::BackendRejected { status, body })
        }
        DeliveryOutcome::Unreachable { cause } => Err(ApiError::BackendUnreachable(cause)),
    }
}
