//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.
//!
//! Every handler catches its adapter errors here, logs them, and answers
//! with an inline `{"error": ...}` body; nothing is fatal to the process
//! and nothing is retried.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use questionnaire_core::domain::{
    EmailConfig, FileIndex, FileIndexEntry, PushNotification, PushTopic, Questionnaire,
};
use questionnaire_core::export::SaveBundle;
use questionnaire_core::ports::{PortError, StorageService};
use questionnaire_core::workflow::{CreatorSession, EditorSession};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        proxy_fetch_handler,
        send_email_handler,
        send_notification_handler,
        list_questionnaires_handler,
        get_questionnaire_handler,
        editor_export_handler,
        creator_export_handler,
    ),
    components(
        schemas(
            ProxyFetchRequest,
            SendEmailRequest,
            SendNotificationRequest,
            NotificationSentResponse,
            MessageResponse,
            ErrorResponse,
            EditorExportRequest,
            CreatorExportRequest,
            ExportFilePayload,
            ExportBundleResponse,
        )
    ),
    tags(
        (name = "Questionnaire Toolbox API", description = "Proxy endpoints and questionnaire save workflows for the internal developer toolbox.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// Inline error body, the shape every failure answers with.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    error: String,
}

/// Success acknowledgement for the email endpoint.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    message: String,
}

/// Request for the raw storage proxy.
#[derive(Deserialize, ToSchema)]
pub struct ProxyFetchRequest {
    url: String,
}

/// Request for the bulk email sender. Fields are optional so a partial
/// submission gets a 400 instead of a deserialization rejection.
#[derive(Deserialize, ToSchema)]
pub struct SendEmailRequest {
    #[schema(value_type = Object)]
    config: Option<EmailConfig>,
    recipients: Option<Vec<String>>,
    subject: Option<String>,
    message: Option<String>,
}

/// Request for the push-notification sender.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    /// The service-account JSON file contents, passed through as a string.
    service_account: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    notification_data: Option<HashMap<String, String>>,
    #[serde(default)]
    target: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSentResponse {
    message_id: String,
}

/// Editor save: the session state the browser accumulated (index fetched at
/// page load, the selected entry, the edited document).
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditorExportRequest {
    #[schema(value_type = Object)]
    questionnaire: Questionnaire,
    #[schema(value_type = Vec<Object>)]
    questionnaire_files: Vec<FileIndexEntry>,
    selected_filename: String,
}

/// Creator save: just the finished draft; the index is fetched fresh here.
#[derive(Deserialize, ToSchema)]
pub struct CreatorExportRequest {
    #[schema(value_type = Object)]
    questionnaire: Questionnaire,
}

/// One downloadable artifact.
#[derive(Serialize, ToSchema)]
pub struct ExportFilePayload {
    filename: String,
    contents: String,
}

/// The two-phase save result. `document` is always present; `index` is
/// `null` exactly when `indexError` explains why.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundleResponse {
    document: ExportFilePayload,
    index: Option<ExportFilePayload>,
    index_error: Option<String>,
}

impl From<SaveBundle> for ExportBundleResponse {
    fn from(bundle: SaveBundle) -> Self {
        let document = ExportFilePayload {
            filename: bundle.document.filename,
            contents: bundle.document.contents,
        };
        match bundle.index {
            Ok(index) => Self {
                document,
                index: Some(ExportFilePayload {
                    filename: index.filename,
                    contents: index.contents,
                }),
                index_error: None,
            },
            Err(e) => Self {
                document,
                index: None,
                index_error: Some(e.to_string()),
            },
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

//=========================================================================================
// Proxy Endpoints
//=========================================================================================

/// Whether a proxy target is acceptable: HTTPS, and long enough to carry a
/// host after the scheme. Rejected URLs never reach the network.
pub fn validate_proxy_url(url: &str) -> bool {
    url.starts_with("https://") && url.len() >= 9
}

/// Forward a GET to an HTTPS URL and return its JSON body verbatim.
#[utoipa::path(
    post,
    path = "/api/s3",
    request_body = ProxyFetchRequest,
    responses(
        (status = 200, description = "The fetched JSON body, verbatim"),
        (status = 400, description = "URL is not HTTPS or too short", body = ErrorResponse),
        (status = 500, description = "Upstream fetch or parse failed", body = ErrorResponse)
    )
)]
pub async fn proxy_fetch_handler(
    State(state): State<AppState>,
    Json(request): Json<ProxyFetchRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if !validate_proxy_url(&request.url) {
        return Err(error_body(StatusCode::BAD_REQUEST, "Invalid URL"));
    }

    match state.storage.fetch_json(&request.url).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            error!("Error fetching file list: {e}");
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch file list",
            ))
        }
    }
}

/// Send one HTML email per recipient via the transactional-email service.
#[utoipa::path(
    post,
    path = "/api/send-email",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "All emails sent", body = MessageResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "The email service refused a send", body = ErrorResponse)
    )
)]
pub async fn send_email_handler(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let (config, recipients, subject, message) = match (
        request.config,
        request.recipients,
        request.subject,
        request.message,
    ) {
        (Some(config), Some(recipients), Some(subject), Some(message))
            if !subject.is_empty() && !message.is_empty() =>
        {
            (config, recipients, subject, message)
        }
        _ => return Err(error_body(StatusCode::BAD_REQUEST, "Missing required fields")),
    };

    match state
        .email
        .send_bulk(&config, &recipients, &subject, &message)
        .await
    {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Emails sent successfully".to_string(),
        })),
        Err(e) => {
            error!("Error sending emails: {e}");
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error sending emails",
            ))
        }
    }
}

/// Broadcast a push notification to one of the fixed topics.
#[utoipa::path(
    post,
    path = "/api/send-notification",
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Notification accepted", body = NotificationSentResponse),
        (status = 500, description = "Bad service account or gateway failure", body = ErrorResponse)
    )
)]
pub async fn send_notification_handler(
    State(state): State<AppState>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let notification = PushNotification {
        title: request.title,
        body: request.body,
        data: request.notification_data.unwrap_or_default(),
        topic: PushTopic::from_target(&request.target),
    };

    match state
        .push
        .send(&request.service_account, &notification)
        .await
    {
        Ok(message_id) => Ok(Json(NotificationSentResponse { message_id })),
        Err(e) => {
            error!("Error sending notification: {e}");
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send notification",
            ))
        }
    }
}

//=========================================================================================
// Questionnaire Endpoints
//=========================================================================================

/// List the questionnaire documents available for editing.
#[utoipa::path(
    get,
    path = "/api/questionnaires",
    responses(
        (status = 200, description = "The File Index"),
        (status = 500, description = "The index could not be fetched", body = ErrorResponse)
    )
)]
pub async fn list_questionnaires_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match EditorSession::open(&*state.storage).await {
        Ok(session) => Ok(Json(FileIndex {
            questionnaire_files: session.files().to_vec(),
        })),
        Err(e) => {
            error!("Error fetching file list: {e}");
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch file list",
            ))
        }
    }
}

/// Fetch one questionnaire document by filename.
#[utoipa::path(
    get,
    path = "/api/questionnaires/{filename}",
    params(("filename" = String, Path, description = "Filename from the File Index")),
    responses(
        (status = 200, description = "The questionnaire document"),
        (status = 500, description = "The document could not be fetched or parsed", body = ErrorResponse)
    )
)]
pub async fn get_questionnaire_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.fetch_questionnaire(&filename).await {
        Ok(document) => Ok(Json(document)),
        Err(e) => {
            error!("Error fetching questionnaire content: {e}");
            let message = match e {
                PortError::Parse(_) => "Failed to parse questionnaire content",
                _ => "Failed to fetch questionnaire content",
            };
            Err(error_body(StatusCode::INTERNAL_SERVER_ERROR, message))
        }
    }
}

/// Editor save: patch the selected entry's `lastModified` in the provided
/// index and return both artifacts.
#[utoipa::path(
    post,
    path = "/api/questionnaires/export",
    request_body = EditorExportRequest,
    responses(
        (status = 200, description = "Both artifacts", body = ExportBundleResponse),
        (status = 500, description = "No document to export", body = ErrorResponse)
    )
)]
pub async fn editor_export_handler(
    Json(request): Json<EditorExportRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let session = EditorSession::resume(
        FileIndex {
            questionnaire_files: request.questionnaire_files,
        },
        request.selected_filename,
        request.questionnaire,
    );

    // `save` only fails when no document was supplied, which this route's
    // body shape rules out; the arm still answers properly if that changes.
    match session.save(Utc::now()) {
        Ok(bundle) => Ok(Json(ExportBundleResponse::from(bundle))),
        Err(e) => {
            error!("Editor export failed: {e}");
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to export questionnaire",
            ))
        }
    }
}

/// Creator save: fetch the index fresh, append the new entry, and return
/// both artifacts, or the document alone with `indexError` set.
#[utoipa::path(
    post,
    path = "/api/questionnaires/new/export",
    request_body = CreatorExportRequest,
    responses(
        (status = 200, description = "The artifacts; index may be replaced by indexError", body = ExportBundleResponse)
    )
)]
pub async fn creator_export_handler(
    State(state): State<AppState>,
    Json(request): Json<CreatorExportRequest>,
) -> impl IntoResponse {
    let session = CreatorSession::with_document(request.questionnaire);
    let bundle = session.save(&*state.storage, Utc::now()).await;
    if let Err(e) = &bundle.index {
        error!("Error fetching fileList.json: {e}");
    }
    Json(ExportBundleResponse::from(bundle))
}
