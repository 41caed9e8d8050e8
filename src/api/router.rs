//! HTTP router: health plus the three policy endpoints.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config::BODY_LIMIT_BYTES;

/// Build the API router.
///
/// The body limit sits above the validator's upload cap so oversized
/// files reach the validator and get the measured-size 413 rather than
/// the framework's generic one.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/api/policy/process", post(endpoints::process::upload))
        .route("/api/policy/clarify", post(endpoints::clarify::update))
        .route("/api/policy/submit", post(endpoints::submit::send))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::MAX_UPLOAD_BYTES;
    use crate::models::{Policy, Rule};
    use crate::pipeline::ambiguity::{MockAmbiguityDetector, RuleAnnotation};
    use crate::pipeline::extraction::test_pdf::make_test_pdf;
    use crate::pipeline::extraction::TextExtractor;
    use crate::pipeline::parsing::{MockLlmClient, PolicyParser};
    use crate::pipeline::PolicyProcessor;
    use crate::store::PolicyStore;
    use crate::submit::{DeliveryOutcome, MockExecutionBackend};

    const MOCK_LLM_RESPONSE: &str = r#"```json
{
  "policy_title": "Remote Work Policy",
  "rules": [
    {
      "rule_id": "R1",
      "original_text": "Employees must notify their manager before working remotely.",
      "conditions": ["working remotely"],
      "action": "notify the manager",
      "responsible_role": "employee",
      "beneficiary": "manager",
      "deadline": "before the remote day"
    },
    {
      "rule_id": "R2",
      "original_text": "Equipment requests are handled as needed.",
      "conditions": [],
      "action": "handle equipment requests",
      "responsible_role": "IT department",
      "beneficiary": "employee",
      "deadline": "as needed"
    }
  ]
}
```"#;

    fn test_ctx_with(
        llm: MockLlmClient,
        ambiguity: MockAmbiguityDetector,
        backend: Arc<MockExecutionBackend>,
    ) -> ApiContext {
        let processor = PolicyProcessor::new(
            TextExtractor::with_default_engines(),
            Arc::new(PolicyParser::new(Arc::new(llm), "test-model")),
            Arc::new(ambiguity),
        );
        ApiContext::new(Arc::new(PolicyStore::new()), Arc::new(processor), backend)
    }

    fn test_ctx() -> ApiContext {
        test_ctx_with(
            MockLlmClient::new(MOCK_LLM_RESPONSE),
            MockAmbiguityDetector::new(vec![RuleAnnotation {
                rule_id: "R2".into(),
                ambiguity_flag: true,
                ambiguity_reason: "'as needed' has no concrete trigger".into(),
            }]),
            Arc::new(MockExecutionBackend::delivered()),
        )
    }

    fn stored_rule(id: &str, role: &str) -> Rule {
        Rule {
            rule_id: id.into(),
            original_text: Some("source sentence".into()),
            conditions: vec!["a condition".into()],
            action: "do the work".into(),
            responsible_role: role.into(),
            beneficiary: "staff".into(),
            deadline: "weekly".into(),
            ambiguity_flag: Some(true),
            ambiguity_reason: Some("vague role".into()),
        }
    }

    const BOUNDARY: &str = "rulemill-test-boundary";

    fn multipart_request(policy_id: Option<&str>, file: Option<&[u8]>) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        if let Some(id) = policy_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"policy_id\"\r\n\r\n{id}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(bytes) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"policy.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/policy/process")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_response_shape() {
        let app = api_router(test_ctx());
        let req = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Server is running");
    }

    #[tokio::test]
    async fn process_full_document_returns_annotated_rules() {
        let app = api_router(test_ctx());
        let pdf = make_test_pdf(&[
            "Employees must notify their manager before working remotely.",
            "Equipment requests are handled as needed by the IT department.",
            "This page intentionally adds more policy context to the document.",
        ]);

        let response = app
            .oneshot(multipart_request(Some("remote-work-1"), Some(&pdf)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["policy_id"], "remote-work-1");
        assert_eq!(json["policy_title"], "Remote Work Policy");
        let rules = json["rules"].as_array().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0]["rule_id"], "R1");
        assert_eq!(rules[0]["ambiguity_flag"], false);
        assert_eq!(rules[1]["ambiguity_flag"], true);
        assert_eq!(
            rules[1]["ambiguity_reason"],
            "'as needed' has no concrete trigger"
        );
    }

    #[tokio::test]
    async fn process_then_clarify_then_submit_round_trip() {
        let ctx = test_ctx();
        let pdf = make_test_pdf(&[
            "Employees must notify their manager before working remotely every time.",
        ]);

        let response = api_router(ctx.clone())
            .oneshot(multipart_request(Some("p1"), Some(&pdf)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = api_router(ctx.clone())
            .oneshot(json_request(
                "/api/policy/clarify",
                serde_json::json!({
                    "policy_id": "p1",
                    "rule_id": "R2",
                    "clarified_deadline": "within 2 business days",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["rule_id"], "R2");
        assert_eq!(json["deadline"], "within 2 business days");

        let response = api_router(ctx)
            .oneshot(json_request(
                "/api/policy/submit",
                serde_json::json!({"policy_id": "p1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Policy submitted to execution engine");
    }

    #[tokio::test]
    async fn process_empty_file_returns_400() {
        let app = api_router(test_ctx());
        let response = app
            .oneshot(multipart_request(Some("p1"), Some(b"")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "EMPTY_FILE");
    }

    #[tokio::test]
    async fn process_non_pdf_returns_400() {
        let app = api_router(test_ctx());
        let response = app
            .oneshot(multipart_request(Some("p1"), Some(b"<html>nope</html>")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_A_PDF");
    }

    #[tokio::test]
    async fn process_oversized_file_returns_413() {
        let app = api_router(test_ctx());
        let mut big = b"%PDF-1.4".to_vec();
        big.resize(MAX_UPLOAD_BYTES + 1, b' ');

        let response = app
            .oneshot(multipart_request(Some("p1"), Some(&big)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "FILE_TOO_LARGE");
    }

    #[tokio::test]
    async fn process_missing_file_field_returns_400() {
        let app = api_router(test_ctx());
        let response = app
            .oneshot(multipart_request(Some("p1"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn process_missing_policy_id_returns_400() {
        let app = api_router(test_ctx());
        let response = app
            .oneshot(multipart_request(None, Some(b"%PDF-1.4 data")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn process_short_document_returns_422() {
        let app = api_router(test_ctx());
        let pdf = make_test_pdf(&["Too short."]);
        let response = app
            .oneshot(multipart_request(Some("p1"), Some(&pdf)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "INSUFFICIENT_TEXT");
    }

    #[tokio::test]
    async fn process_llm_failure_returns_500() {
        let ctx = test_ctx_with(
            MockLlmClient::failing("connection refused"),
            MockAmbiguityDetector::all_clear(),
            Arc::new(MockExecutionBackend::delivered()),
        );
        let pdf = make_test_pdf(&[
            "Employees must notify their manager before working remotely every time.",
        ]);
        let response = api_router(ctx)
            .oneshot(multipart_request(Some("p1"), Some(&pdf)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "EXTRACTION_SERVICE_FAILED");
    }

    #[tokio::test]
    async fn clarify_skips_blank_fields_and_replaces_conditions() {
        let ctx = test_ctx();
        ctx.store
            .put("p1", Policy::new("P", vec![stored_rule("R1", "someone")]))
            .unwrap();

        let response = api_router(ctx.clone())
            .oneshot(json_request(
                "/api/policy/clarify",
                serde_json::json!({
                    "policy_id": "p1",
                    "rule_id": "R1",
                    "clarified_responsible_role": "",
                    "clarified_deadline": "every Monday",
                    "clarified_conditions": [],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        // The clarified rule comes back at the top level, without
        // ambiguity fields. Blank role is a no-change, empty
        // conditions list is a replace.
        assert_eq!(json["rule_id"], "R1");
        assert_eq!(json["responsible_role"], "someone");
        assert_eq!(json["deadline"], "every Monday");
        assert_eq!(json["conditions"].as_array().unwrap().len(), 0);
        assert!(json.get("ambiguity_flag").is_none());
        assert!(json.get("status").is_none());

        let stored = ctx.store.get("p1").unwrap();
        assert!(stored.rules[0].is_clarified());
    }

    #[tokio::test]
    async fn clarify_unknown_rule_returns_404() {
        let ctx = test_ctx();
        ctx.store
            .put("p1", Policy::new("P", vec![stored_rule("R1", "someone")]))
            .unwrap();

        let response = api_router(ctx)
            .oneshot(json_request(
                "/api/policy/clarify",
                serde_json::json!({"policy_id": "p1", "rule_id": "R99"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn clarify_unknown_policy_returns_404() {
        let response = api_router(test_ctx())
            .oneshot(json_request(
                "/api/policy/clarify",
                serde_json::json!({"policy_id": "nope", "rule_id": "R1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn submit_delivers_filtered_payload() {
        let backend = Arc::new(MockExecutionBackend::delivered());
        let ctx = test_ctx_with(
            MockLlmClient::new(MOCK_LLM_RESPONSE),
            MockAmbiguityDetector::all_clear(),
            backend.clone(),
        );
        ctx.store
            .put(
                "p1",
                Policy::new(
                    "P",
                    vec![stored_rule("R1", "manager"), stored_rule("R2", "")],
                ),
            )
            .unwrap();

        let response = api_router(ctx.clone())
            .oneshot(json_request(
                "/api/policy/submit",
                serde_json::json!({"policy_id": "p1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["backend_response"]["accepted"], true);

        let deliveries = backend.deliveries.lock().unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].rules.len(), 1);
        assert_eq!(deliveries[0].rules[0].rule_id, "R1");
    }

    #[tokio::test]
    async fn submit_unknown_policy_returns_404() {
        let response = api_router(test_ctx())
            .oneshot(json_request(
                "/api/policy/submit",
                serde_json::json!({"policy_id": "missing"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn submit_backend_rejection_propagates_status() {
        let ctx = test_ctx_with(
            MockLlmClient::new(MOCK_LLM_RESPONSE),
            MockAmbiguityDetector::all_clear(),
            Arc::new(MockExecutionBackend::new(DeliveryOutcome::Rejected {
                status: 422,
                body: "rules failed validation".into(),
            })),
        );
        ctx.store
            .put("p1", Policy::new("P", vec![stored_rule("R1", "manager")]))
            .unwrap();

        let response = api_router(ctx)
            .oneshot(json_request(
                "/api/policy/submit",
                serde_json::json!({"policy_id": "p1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BACKEND_REJECTED");
    }

    #[tokio::test]
    async fn submit_backend_unreachable_returns_500() {
        let ctx = test_ctx_with(
            MockLlmClient::new(MOCK_LLM_RESPONSE),
            MockAmbiguityDetector::all_clear(),
            Arc::new(MockExecutionBackend::new(DeliveryOutcome::Unreachable {
                cause: "connection refused".into(),
            })),
        );
        ctx.store
            .put("p1", Policy::new("P", vec![stored_rule("R1", "manager")]))
            .unwrap();

        let response = api_router(ctx)
            .oneshot(json_request(
                "/api/policy/submit",
                serde_json::json!({"policy_id": "p1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BACKEND_UNREACHABLE");
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let response = api_router(test_ctx())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
