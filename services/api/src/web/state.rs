//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::storage::HttpStorageAdapter;
use crate::config::Config;
use questionnaire_core::ports::{EmailService, PushService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Storage is held as the concrete adapter: besides implementing the
/// `StorageService` port for the questionnaire routes, it carries the raw
/// `fetch_json` used by the verbatim proxy endpoint.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub storage: Arc<HttpStorageAdapter>,
    pub email: Arc<dyn EmailService>,
    pub push: Arc<dyn PushService>,
}
