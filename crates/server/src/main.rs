use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{generate_route, health_route, word_template_route},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{generate_poem, parse_generation_request, ApiContext, SkeletonGenerator};
use app_state::AppState;
use config::{load_settings, load_word_template};

const MAX_REQUEST_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let word_template = load_word_template(&settings)?;
    let state = AppState {
        api: ApiContext {
            generator: Arc::new(SkeletonGenerator),
        },
        word_template: Arc::from(word_template),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "poem server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(health_route(), get(healthz))
        .route(word_template_route(), get(word_template))
        .route(
            generate_route(),
            post(http_generate).layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn word_template(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        state.word_template.to_string(),
    )
}

async fn http_generate(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<String, (StatusCode, Json<ApiError>)> {
    let body = body.map_err(body_rejection)?;

    let request = parse_generation_request(&body).map_err(|e| {
        warn!(message = %e.message, "rejected poem specification");
        (StatusCode::BAD_REQUEST, Json(e))
    })?;

    generate_poem(&state.api, &request).map_err(|e| {
        let status = match e.code {
            ErrorCode::Validation => StatusCode::BAD_REQUEST,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(e))
    })
}

fn body_rejection(rejection: BytesRejection) -> (StatusCode, Json<ApiError>) {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ApiError::new(
                ErrorCode::PayloadTooLarge,
                format!("poem specification exceeds {MAX_REQUEST_BYTES} bytes"),
            )),
        );
    }
    warn!(reason = %rejection.body_text(), "unreadable poem specification body");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
