use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use cr_core::{AnalysisRequest, AnalysisResult, Error, ProviderConfig};
use cr_llm::AnalysisService;
use serde::Serialize;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const HEALTH_PATH: &str = "/health";

#[derive(Clone)]
pub struct AppState {
    service: Arc<AnalysisService>,
    model: Arc<str>,
}

impl AppState {
    /// State backed by a real provider client built from `config`.
    pub fn from_config(config: Arc<ProviderConfig>) -> cr_core::Result<Self> {
        let model = config.model.clone();
        let service = AnalysisService::from_config(config)?;
        Ok(Self::new(service, model))
    }

    pub fn new(service: AnalysisService, model: impl Into<Arc<str>>) -> Self {
        Self {
            service: Arc::new(service),
            model: model.into(),
        }
    }
}

#[derive(Serialize)]
struct Endpoints {
    analyze: &'static str,
    health: &'static str,
}

#[derive(Serialize)]
struct ServiceInfo {
    message: &'static str,
    status: &'static str,
    model: String,
    endpoints: Endpoints,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    model: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(HEALTH_PATH, get(health))
        .route(ANALYZE_PATH, post(analyze))
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "AI Code Review & Documentation API",
        status: "online",
        model: state.model.to_string(),
        endpoints: Endpoints {
            analyze: ANALYZE_PATH,
            health: HEALTH_PATH,
        },
    })
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "healthy",
        model: state.model.to_string(),
    })
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| Error::Validation(rejection.body_text()))?;
    request.validate()?;

    let request_id = Uuid::new_v4();
    let result = state
        .service
        .analyze(&request)
        .instrument(info_span!("analyze", %request_id))
        .await?;
    Ok(Json(result))
}
