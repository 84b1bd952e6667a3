use crate::{
    collectors::Orchestrator,
    error::AppError,
    exposition,
    sink,
};
use axum::{
    extract::State,
    http::{
        header,
        StatusCode,
    },
    response::{
        IntoResponse,
        Response,
    },
    routing::get,
    Json,
    Router,
};
use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: DateTime<Utc>,
}

pub fn create_router(orchestrator: Arc<Orchestrator>) -> Router {
    let state = AppState { orchestrator };

    Router::new()
        .route("/metrics", get(metrics))
        .route("/-/ping", get(ping))
        .route("/-/health", get(health))
        .with_state(state)
}

async fn metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let (sink, mut batch) = sink::channel();
    state.orchestrator.collect(&sink).await;
    drop(sink);

    let body = exposition::encode(&batch.drain(), state.orchestrator.registry())?;
    Ok(([(header::CONTENT_TYPE, exposition::content_type())], body).into_response())
}

async fn ping() -> StatusCode {
    StatusCode::OK
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        time: Utc::now(),
    })
}
