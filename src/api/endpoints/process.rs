//! POST /api/policy/process — multipart upload through the pipeline.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut policy_id: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("policy_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("invalid policy_id field: {e}")))?;
                policy_id = Some(value);
            }
            Some("file") => {
                let bytes = field.bytes().await.map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        ApiError::RequestTooLarge
                    } else {
                        ApiError::BadRequest(format!("invalid file field: {e}"))
                    }
                })?;
                file_bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let policy_id = match policy_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(ApiError::BadRequest("missing policy_id field".into())),
    };
    let file_bytes =
        file_bytes.ok_or_else(|| ApiError::BadRequest("missing file field".into()))?;

    info!(policy_id = %policy_id, bytes = file_bytes.len(), "processing policy upload");

    // PDF parsing and both LLM passes are synchronous.
    let processor = ctx.processor.clone();
    let id = policy_id.clone();
    let policy = tokio::task::spawn_blocking(move || processor.process(&id, &file_bytes))
        .await
        .map_err(|e| ApiError::Internal(format!("processing task failed: {e}")))??;

    ctx.store.put(&policy_id, policy.clone())?;

    Ok(Json(json!({
        "policy_id": policy_id,
        "policy_title": policy.policy_title,
        "rules": policy.rules,
    })))
}
