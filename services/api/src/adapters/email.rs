//! services/api/src/adapters/email.rs
//!
//! This module contains the adapter for the transactional-email service.
//! It implements the `EmailService` port from the core crate, sending one
//! HTML email per recipient. Credentials come from the operator-uploaded
//! config, not from this service's environment.

use async_trait::async_trait;
use questionnaire_core::domain::EmailConfig;
use questionnaire_core::ports::{EmailService, PortError, PortResult};
use serde::Serialize;
use tracing::info;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `EmailService` port against the
/// transactional-email HTTP API.
#[derive(Clone)]
pub struct HttpEmailAdapter {
    client: reqwest::Client,
    endpoint: String,
}

/// The send-request body the email API expects.
#[derive(Serialize)]
struct SendRequest<'a> {
    source: &'a str,
    to: &'a str,
    subject: &'a str,
    /// HTML body; the sender composes rich messages.
    html: &'a str,
}

impl HttpEmailAdapter {
    /// Creates a new `HttpEmailAdapter` posting to `endpoint`.
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    async fn send_one(
        &self,
        config: &EmailConfig,
        recipient: &str,
        subject: &str,
        message: &str,
    ) -> PortResult<()> {
        let request = SendRequest {
            source: &config.default_from_email,
            to: recipient,
            subject,
            html: message,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&config.email_host_user, Some(&config.email_host_password))
            .json(&request)
            .send()
            .await
            .map_err(|e| PortError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PortError::Fetch(format!(
                "email API returned {} for {}",
                response.status(),
                recipient
            )));
        }
        Ok(())
    }
}

//=========================================================================================
// `EmailService` Trait Implementation
//=========================================================================================

#[async_trait]
impl EmailService for HttpEmailAdapter {
    /// Sends the message to every recipient in turn. The first failure
    /// aborts the batch; recipients already sent to stay sent (no rollback,
    /// matching the provider's own semantics).
    async fn send_bulk(
        &self,
        config: &EmailConfig,
        recipients: &[String],
        subject: &str,
        message: &str,
    ) -> PortResult<()> {
        for recipient in recipients {
            self.send_one(config, recipient, subject, message).await?;
        }
        info!(count = recipients.len(), "bulk email batch sent");
        Ok(())
    }
}
