use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::ClimateServiceConfig;
use crate::models::ClimateRecord;
use crate::service::ClimateService;
use crate::{ClimateError, VERSION};

const SERVICE_ID: &str = "climate-data";
const SERVICE_NAME: &str = "Climate Data Microservice";

/// Immutable per-process state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClimateService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: ClimateService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn from_config(config: &ClimateServiceConfig) -> crate::Result<Self> {
        Ok(Self::new(ClimateService::from_config(config)?))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Handler error: validation failures map to 400, everything else to 500
pub struct ApiError(ClimateError);

impl From<ClimateError> for ApiError {
    fn from(err: ClimateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Climate request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(ErrorBody {
            detail: self.0.user_message(),
        });
        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_root))
        .route("/health", get(get_health))
        .route("/climate/{zip_code}", get(get_climate))
        .with_state(state)
}

async fn get_root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": VERSION,
        "endpoints": {
            "health": "/health",
            "climate": "/climate/{zip_code}"
        }
    }))
}

async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_ID
    }))
}

async fn get_climate(
    State(state): State<AppState>,
    Path(zip_code): Path<String>,
) -> Result<Json<ClimateRecord>, ApiError> {
    let record = state.service.climate_for_zip(&zip_code).await?;
    Ok(Json(record))
}
