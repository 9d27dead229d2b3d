//! services/api/src/adapters/push.rs
//!
//! This module contains the adapter for the push-messaging gateway. It
//! implements the `PushService` port from the core crate: validate the
//! uploaded service-account JSON, route the message to its topic, return
//! the provider's message id.
//!
//! OAuth token minting from the service account is delegated to the
//! deployment (the gateway sits behind an optional static bearer token);
//! the account JSON is still parsed here so a bad upload fails as a parse
//! error before anything leaves the process.

use async_trait::async_trait;
use questionnaire_core::domain::PushNotification;
use questionnaire_core::ports::{PortError, PortResult, PushService};
use serde::Deserialize;
use serde_json::json;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `PushService` port against the push
/// gateway's HTTP API.
#[derive(Clone)]
pub struct HttpPushAdapter {
    client: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
}

/// The fields of a service-account JSON file this adapter needs.
#[derive(Deserialize)]
struct ServiceAccount {
    project_id: String,
}

/// The gateway's send response.
#[derive(Deserialize)]
struct SendResponse {
    /// Fully qualified message name, e.g. `projects/p/messages/123`.
    name: String,
}

impl HttpPushAdapter {
    /// Creates a new `HttpPushAdapter` posting to `endpoint`.
    pub fn new(client: reqwest::Client, endpoint: String, bearer_token: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bearer_token,
        }
    }
}

/// Validates the uploaded service-account JSON and extracts the project id.
pub fn parse_service_account(raw: &str) -> PortResult<String> {
    let account: ServiceAccount = serde_json::from_str(raw)
        .map_err(|e| PortError::Parse(format!("invalid service account JSON: {e}")))?;
    Ok(account.project_id)
}

//=========================================================================================
// `PushService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PushService for HttpPushAdapter {
    async fn send(
        &self,
        service_account_json: &str,
        notification: &PushNotification,
    ) -> PortResult<String> {
        let project_id = parse_service_account(service_account_json)?;

        let url = format!(
            "{}/v1/projects/{}/messages:send",
            self.endpoint, project_id
        );
        let body = json!({
            "message": {
                "notification": {
                    "title": notification.title,
                    "body": notification.body,
                },
                "data": notification.data,
                "topic": notification.topic.as_str(),
            }
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PortError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PortError::Fetch(format!(
                "push gateway returned {}",
                response.status()
            )));
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| PortError::Parse(e.to_string()))?;
        Ok(sent.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn service_account_parsing_extracts_the_project_id() {
        let raw = r#"{"type":"service_account","project_id":"kowroo-app","private_key_id":"abc"}"#;
        assert_eq!(parse_service_account(raw).unwrap(), "kowroo-app");
    }

    #[test]
    fn malformed_service_account_is_a_parse_error() {
        let err = parse_service_account("not json at all").unwrap_err();
        assert!(matches!(err, PortError::Parse(_)));

        // Valid JSON but missing project_id is equally unusable.
        let err = parse_service_account(r#"{"type":"service_account"}"#).unwrap_err();
        assert!(matches!(err, PortError::Parse(_)));
    }
}
