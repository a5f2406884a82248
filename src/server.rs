//! HTTP server.
//!
//! Exposes the question-answering pipeline as a small JSON API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/ask` | Answer a question: `{"question": "..."}` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "invalid_question", "message": "질문을 입력해 주세요." } }
//! ```
//!
//! Error codes: `invalid_question` (400), `internal` (500). Rejected
//! questions carry the guard's message; internal failures (e.g. an unreadable
//! corpus file) are logged server-side and surface only as a generic body.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::answer::{answer_question, Answer};
use crate::config::Config;
use crate::guard::{validate, GuardSet};
use crate::provider::{create_provider, GenerationProvider};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    guards: Arc<GuardSet>,
    provider: Arc<Option<Box<dyn GenerationProvider>>>,
}

/// Starts the HTTP server on the configured bind address. Guard rules and
/// the provider handle are built once here and shared across requests.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let state = AppState {
        config: Arc::new(config.clone()),
        guards: Arc::new(GuardSet::new()?),
        provider: Arc::new(create_provider(&config.provider)?),
    };

    if let Some(provider) = state.provider.as_deref() {
        tracing::info!(model = provider.model_name(), "generation provider enabled");
    } else {
        tracing::info!("generation provider disabled, serving local answers");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ask", post(handle_ask))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    println!("askgate listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 response for a question the input guard rejected.
fn invalid_question(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "invalid_question".to_string(),
        message: message.into(),
    }
}

/// Constructs a generic 500 response. The real cause is logged, not sent.
fn internal() -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: "요청을 처리하지 못했습니다.".to_string(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /ask ============

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

/// Handler for `POST /ask`. Validation runs before any scoring work; a
/// rejected question never touches the corpus.
async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<Answer>, AppError> {
    if let Some(message) = validate(
        &req.question,
        &state.guards.attack,
        state.config.limits.max_question_chars,
    ) {
        return Err(invalid_question(message));
    }

    let result = answer_question(
        &state.config,
        &state.guards,
        state.provider.as_deref(),
        &req.question,
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "ask pipeline failed");
        internal()
    })?;

    tracing::info!(
        question_chars = req.question.trim().chars().count(),
        references = result.references.len(),
        used_provider = result.used_provider,
        "question answered"
    );

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_question_maps_to_400() {
        let resp = invalid_question("질문을 입력해 주세요.").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_maps_to_500_with_generic_message() {
        let err = internal();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "internal");
        // No path, io, or provider detail leaks through this body.
        assert!(!err.message.contains('/'));
    }
}
