//! crates/questionnaire_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the toolbox's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing
//! the core to be independent of the concrete HTTP services behind them
//! (object storage, the email API, the push gateway).

use async_trait::async_trait;

use crate::domain::{EmailConfig, FileIndex, PushNotification, Questionnaire};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The network call failed or returned a non-success status.
    #[error("fetch failed: {0}")]
    Fetch(String),
    /// The response body was not the expected JSON shape.
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("an unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read-only access to the object-storage bucket holding the File Index and
/// the questionnaire documents.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Fetches and parses `fileList.json` from the well-known location.
    async fn fetch_file_index(&self) -> PortResult<FileIndex>;

    /// Fetches and parses one questionnaire document by filename.
    async fn fetch_questionnaire(&self, filename: &str) -> PortResult<Questionnaire>;
}

/// The transactional-email service behind the bulk sender.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends one HTML email per recipient. Any failed send fails the batch.
    async fn send_bulk(
        &self,
        config: &EmailConfig,
        recipients: &[String],
        subject: &str,
        message: &str,
    ) -> PortResult<()>;
}

/// The push-messaging service behind the app notifier.
#[async_trait]
pub trait PushService: Send + Sync {
    /// Broadcasts a notification to its topic, authenticated by the
    /// uploaded service-account JSON. Returns the provider's message id.
    async fn send(
        &self,
        service_account_json: &str,
        notification: &PushNotification,
    ) -> PortResult<String>;
}
