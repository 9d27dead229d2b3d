//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{email::HttpEmailAdapter, push::HttpPushAdapter, storage::HttpStorageAdapter},
    config::Config,
    error::ApiError,
    web::{self, rest::ApiDoc, state::AppState},
};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let client = reqwest::Client::builder()
        .user_agent("questionnaire-toolbox/0.1")
        .timeout(config.request_timeout)
        .build()?;

    let storage = Arc::new(HttpStorageAdapter::new(
        client.clone(),
        config.storage_root_url.clone(),
    ));
    let email = Arc::new(HttpEmailAdapter::new(
        client.clone(),
        config.email_api_url.clone(),
    ));
    let push = Arc::new(HttpPushAdapter::new(
        client,
        config.push_gateway_url.clone(),
        config.push_gateway_token.clone(),
    ));

    // --- 3. Build the Shared AppState ---
    let app_state = AppState {
        config: config.clone(),
        storage,
        email,
        push,
    };

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().expect("static origin"))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    // --- 4. Create the Web Router ---
    let api_router = web::router(app_state).layer(cors);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
