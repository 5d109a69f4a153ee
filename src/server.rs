use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Serialize;
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tower_http::services::ServeDir;

use crate::api::parse_request_body;
use crate::config::PlannerConfig;
use crate::error::ValidationError;
use crate::{analyze_on, AnalysisReport, SERVICE_NAME};

#[derive(Clone)]
pub struct AppState {
    config: Arc<PlannerConfig>,
}

impl AppState {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError(ValidationError);

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ValidationError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;
    let static_service = ServeDir::new(&state.config.server.web_root);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .fallback_service(static_service)
        .with_state(state)
}

pub async fn serve(config: PlannerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| anyhow::anyhow!("invalid bind address: {}", err))?;
    let web_root = config.server.web_root.clone();
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| anyhow::anyhow!("failed to bind server: {}", err))?;
    tracing::info!(%addr, web_root = %web_root, "{} listening", SERVICE_NAME);

    axum::serve(listener, app)
        .await
        .map_err(|err| anyhow::anyhow!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
    })
}

async fn analyze_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let request_id = generate_request_id();
    let body = body.map_err(|rejection| {
        tracing::warn!(%request_id, error = %rejection, "unreadable request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ValidationError::PayloadTooLarge
        } else {
            ValidationError::Malformed(rejection.body_text())
        }
    })?;

    let input = parse_request_body(&body)
        .and_then(|request| request.into_input())
        .map_err(|err| {
            tracing::warn!(%request_id, error = %err, "rejected analysis request");
            err
        })?;

    let report = analyze_on(&input, Local::now().date_naive(), &state.config);
    tracing::info!(
        %request_id,
        references = report.references_analyzed,
        benchmark_score = report.benchmark_score,
        slots = report.weekly_plan.len(),
        "analysis complete"
    );

    Ok(Json(report))
}

fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
