use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use scorecast_models::{ErrorKind, Result, ScorePrediction, ScorecastError, StudentRecord};
use scorecast_services::PredictPipeline;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::metrics::ApiMetrics;
use crate::pages;

#[derive(Clone)]
pub struct AppState {
    pub predictor: Option<Arc<PredictPipeline>>,
    pub metrics: Arc<ApiMetrics>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(predictor: Option<PredictPipeline>, metrics: ApiMetrics) -> Self {
        Self {
            predictor: predictor.map(Arc::new),
            metrics: Arc::new(metrics),
            started_at: Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: i64,
    pub model_loaded: bool,
    pub model_name: Option<String>,
}

/// Raw form fields; every field is optional so missing values get a proper
/// 400 page instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictForm {
    pub gender: Option<String>,
    pub ethnicity: Option<String>,
    pub parental_level_of_education: Option<String>,
    pub lunch: Option<String>,
    pub test_preparation_course: Option<String>,
    pub reading_score: Option<String>,
    pub writing_score: Option<String>,
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScorecastError::data(format!("{field} is required")))
}

fn score(field: &str, value: Option<String>) -> Result<f64> {
    let raw = required(field, value)?;
    raw.parse::<f64>()
        .map_err(|_| ScorecastError::data(format!("{field} must be a number, got {raw:?}")))
}

impl PredictForm {
    pub fn into_record(self) -> Result<StudentRecord> {
        let record = StudentRecord {
            gender: required("gender", self.gender)?,
            race_ethnicity: required("ethnicity", self.ethnicity)?,
            parental_level_of_education: required(
                "parental_level_of_education",
                self.parental_level_of_education,
            )?,
            lunch: required("lunch", self.lunch)?,
            test_preparation_course: required("test_preparation_course", self.test_preparation_course)?,
            reading_score: score("reading_score", self.reading_score)?,
            writing_score: score("writing_score", self.writing_score)?,
        };
        record.validate()?;
        Ok(record)
    }
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health and status
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))

        // HTML pages
        .route("/", get(index))
        .route("/predictdata", get(prediction_form).post(predict_datapoint))

        // JSON API
        .route("/api/v1/predict", post(api_predict))
}

/// Routes bound to `state` with request tracing.
pub fn app(state: AppState) -> Router {
    create_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = Utc::now();
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (now - state.started_at).num_seconds(),
        model_loaded: state.predictor.is_some(),
        model_name: state.predictor.as_ref().map(|p| p.model_name().to_string()),
    })
}

async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(text) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], text).into_response(),
        Err(e) => {
            error!("❌ Failed to render metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn index() -> Html<String> {
    Html(pages::index())
}

async fn prediction_form() -> Html<String> {
    Html(pages::prediction_form(None))
}

fn html_error(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    (status, Html(pages::error_page(title, message))).into_response()
}

async fn predict_datapoint(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Response {
    let record = match form.into_record() {
        Ok(record) => record,
        Err(e) => {
            state.metrics.record("rejected");
            return html_error(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };
    debug!("Input record: {:?}", record);

    let Some(predictor) = state.predictor.as_ref() else {
        state.metrics.record("unavailable");
        return html_error(StatusCode::SERVICE_UNAVAILABLE, &ApiError::ModelUnavailable.message());
    };

    match predictor.predict_one(&record) {
        Ok(score) => {
            debug!("Prediction result: {}", score);
            state.metrics.record("ok");
            Html(pages::prediction_form(Some(score))).into_response()
        }
        Err(e) if matches!(e.kind(), ErrorKind::Data) => {
            state.metrics.record("rejected");
            html_error(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            state.metrics.record("failed");
            let err = ApiError::from(e);
            html_error(err.status(), &err.message())
        }
    }
}

async fn api_predict(
    State(state): State<AppState>,
    Json(record): Json<StudentRecord>,
) -> std::result::Result<Json<ApiResponse<ScorePrediction>>, ApiError> {
    let Some(predictor) = state.predictor.as_ref() else {
        state.metrics.record("unavailable");
        return Err(ApiError::ModelUnavailable);
    };

    let score = predictor.predict_one(&record).map_err(|e| {
        let err = ApiError::from(e);
        state
            .metrics
            .record(if err.status() == StatusCode::BAD_REQUEST { "rejected" } else { "failed" });
        err
    })?;
    state.metrics.record("ok");

    Ok(Json(ApiResponse {
        success: true,
        data: Some(ScorePrediction::new(predictor.model_name(), score)),
        message: None,
    }))
}
