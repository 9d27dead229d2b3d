pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;

pub use rest::{
    creator_export_handler, editor_export_handler, get_questionnaire_handler,
    list_questionnaires_handler, proxy_fetch_handler, send_email_handler,
    send_notification_handler,
};

/// Builds the API router. Shared between the binary and the router-level
/// tests.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/s3", post(proxy_fetch_handler))
        .route("/api/send-email", post(send_email_handler))
        .route("/api/send-notification", post(send_notification_handler))
        .route("/api/questionnaires", get(list_questionnaires_handler))
        .route("/api/questionnaires/{filename}", get(get_questionnaire_handler))
        .route("/api/questionnaires/export", post(editor_export_handler))
        .route(
            "/api/questionnaires/new/export",
            post(creator_export_handler),
        )
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        email::HttpEmailAdapter, push::HttpPushAdapter, storage::HttpStorageAdapter,
    };
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use pretty_assertions::{assert_eq, assert_ne};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Adapters pointed at unroutable hosts: any test that accidentally
    /// reaches the network fails fast instead of hanging.
    fn test_state() -> AppState {
        let config = Arc::new(Config {
            bind_address: "127.0.0.1:0".parse().unwrap(),
            log_level: tracing::Level::INFO,
            storage_root_url: "https://storage.invalid".to_string(),
            email_api_url: "https://email.invalid/send".to_string(),
            push_gateway_url: "https://push.invalid".to_string(),
            push_gateway_token: None,
            request_timeout: Duration::from_secs(1),
        });
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap();
        AppState {
            storage: Arc::new(HttpStorageAdapter::new(
                client.clone(),
                config.storage_root_url.clone(),
            )),
            email: Arc::new(HttpEmailAdapter::new(
                client.clone(),
                config.email_api_url.clone(),
            )),
            push: Arc::new(HttpPushAdapter::new(
                client,
                config.push_gateway_url.clone(),
                None,
            )),
            config,
        }
    }

    async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
        let response = router(test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn proxy_rejects_non_https_urls_without_fetching() {
        let (status, body) = post_json("/api/s3", json!({ "url": "http://example.com" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid URL");
    }

    #[tokio::test]
    async fn proxy_rejects_a_bare_scheme() {
        let (status, body) = post_json("/api/s3", json!({ "url": "https://" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid URL");
    }

    #[tokio::test]
    async fn send_email_requires_all_fields() {
        let (status, body) = post_json(
            "/api/send-email",
            json!({ "recipients": ["a@example.com"], "subject": "Hi" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn send_notification_rejects_a_bad_service_account() {
        let (status, body) = post_json(
            "/api/send-notification",
            json!({
                "serviceAccount": "not json",
                "title": "Hello",
                "body": "World",
                "target": "ios"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to send notification");
    }

    #[tokio::test]
    async fn editor_export_returns_both_artifacts() {
        let questionnaire = json!({
            "surveyId": "s1",
            "initPage": { "title": "", "description": "", "isOptional": false },
            "questions": [],
            "exitPage": { "title": "", "description": "" }
        });
        let (status, body) = post_json(
            "/api/questionnaires/export",
            json!({
                "questionnaire": questionnaire,
                "questionnaireFiles": [
                    { "filename": "s1.json", "version": "1.0", "lastModified": "T0" },
                    { "filename": "s2.json", "version": "1.0", "lastModified": "T1" }
                ],
                "selectedFilename": "s1.json"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["filename"], "s1.json");
        assert_eq!(body["index"]["filename"], "fileList.json");
        assert!(body["indexError"].is_null());

        let index: Value =
            serde_json::from_str(body["index"]["contents"].as_str().unwrap()).unwrap();
        let entries = index["questionnaireFiles"].as_array().unwrap();
        assert_ne!(entries[0]["lastModified"], "T0");
        assert_eq!(entries[1]["lastModified"], "T1");
    }
}
