use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::EngineConfig;
use crate::conversion::{ConversionEngine, ConversionFailure, ConversionRequest, FailureKind, Strategy};
use crate::store::{OutputStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConversionEngine>,
    pub store: Arc<OutputStore>,
}

impl AppState {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            engine: Arc::new(ConversionEngine::from_config(config)),
            store: Arc::new(OutputStore::new(config.output_dir.clone())),
        }
    }
}

// --- Error mapping ---
enum ApiError {
    Conversion(ConversionFailure),
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Conversion(failure) => {
                let status = match failure.kind {
                    FailureKind::MissingInput => StatusCode::BAD_REQUEST,
                    FailureKind::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                    FailureKind::BackendError => StatusCode::BAD_GATEWAY,
                };
                (status, failure.kind.to_string(), failure.message)
            }
            ApiError::Store(err) => {
                let status = match err {
                    StoreError::MissingField | StoreError::InvalidFilename(_) => StatusCode::BAD_REQUEST,
                    StoreError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, "store_error".to_string(), err.to_string())
            }
        };
        if status.is_server_error() {
            error!("{}: {}", kind, message);
        }
        (status, Json(serde_json::json!({ "errorKind": kind, "error": message }))).into_response()
    }
}

impl From<ConversionFailure> for ApiError {
    fn from(err: ConversionFailure) -> Self {
        Self::Conversion(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

#[derive(Deserialize)]
struct ConvertBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    strategy: Option<Strategy>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Serialize)]
struct ConvertResponse {
    success: bool,
    code: String,
    strategy: Strategy,
}

#[derive(Deserialize)]
struct SaveBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    filename: String,
}

#[derive(Serialize)]
struct SaveResponse {
    success: bool,
    path: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/convert", post(convert))
        .route("/api/save", post(save))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState, addr: &str) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Conversion API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await.context("HTTP server terminated")?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "default_model": state.engine.default_model(),
    }))
}

async fn convert(
    State(state): State<AppState>,
    Json(body): Json<ConvertBody>,
) -> Result<Json<ConvertResponse>, ApiError> {
    // The web client defaults to the model-backed conversion.
    let mut request = ConversionRequest {
        source_text: body.code,
        strategy: body.strategy.unwrap_or(Strategy::Generative),
        model: None,
        timeout: None,
    };
    if let Some(model) = body.model.filter(|m| !m.trim().is_empty()) {
        request = request.with_model(model);
    }

    let output = state.engine.convert(&request).await?;
    Ok(Json(ConvertResponse {
        success: true,
        code: output.output_text,
        strategy: output.strategy,
    }))
}

async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveBody>,
) -> Result<Json<SaveResponse>, ApiError> {
    let path = state.store.save(&body.filename, &body.code).await?;
    Ok(Json(SaveResponse {
        success: true,
        path: path.display().to_string(),
    }))
}
