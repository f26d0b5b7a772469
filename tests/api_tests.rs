mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::synthetic_students;
use scorecast_api::{app, ApiMetrics, AppState};
use scorecast_ml::{Estimator, LinearRegressor, ModelArtifact, Preprocessor, Regressor};
use scorecast_models::StudentRecord;
use scorecast_services::{students, targets, PredictPipeline};

const FORM: &str = "gender=female&ethnicity=group+B&parental_level_of_education=bachelor%27s+degree\
&lunch=standard&test_preparation_course=none&reading_score=72&writing_score=74";

fn trained_pipeline() -> PredictPipeline {
    let records = synthetic_students(80, 21);
    let preprocessor = Preprocessor::fit(&students(&records)).unwrap();
    let x = preprocessor.transform(&students(&records)).unwrap();
    let mut estimator = Estimator::from(LinearRegressor::new());
    estimator.fit(&x, &targets(&records)).unwrap();
    PredictPipeline::new(preprocessor, ModelArtifact::new("Linear Regression", estimator, 0.95)).unwrap()
}

fn create_test_app(with_model: bool) -> Router {
    let predictor = with_model.then(trained_pipeline);
    app(AppState::new(predictor, ApiMetrics::new().unwrap()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predictdata")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json(value: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(create_test_app(true), get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["model_loaded"], true);
    assert_eq!(health["model_name"], "Linear Regression");
    assert!(health["timestamp"].is_string());

    let (_, body) = send(create_test_app(false), get("/health")).await;
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["model_loaded"], false);
    assert!(health["model_name"].is_null());
}

#[tokio::test]
async fn test_index_links_to_form() {
    let (status, body) = send(create_test_app(false), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/predictdata\""));
}

#[tokio::test]
async fn test_get_predictdata_renders_empty_form() {
    let (status, body) = send(create_test_app(true), get("/predictdata")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form action=\"/predictdata\" method=\"post\">"));
    assert!(!body.contains("The prediction is"));
}

#[tokio::test]
async fn test_post_predictdata_shows_prediction() {
    let (status, body) = send(create_test_app(true), post_form(FORM)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The prediction is"), "{body}");
    // the form is rendered again for the next request
    assert!(body.contains("name=\"reading_score\""));
}

#[tokio::test]
async fn test_post_predictdata_matches_pipeline() {
    let pipeline = trained_pipeline();
    let expected = pipeline
        .predict_one(&StudentRecord {
            gender: "female".to_string(),
            race_ethnicity: "group B".to_string(),
            parental_level_of_education: "bachelor's degree".to_string(),
            lunch: "standard".to_string(),
            test_preparation_course: "none".to_string(),
            reading_score: 72.0,
            writing_score: 74.0,
        })
        .unwrap();

    let (_, body) = send(create_test_app(true), post_form(FORM)).await;
    assert!(body.contains(&format!("The prediction is {expected:.2}")), "{body}");
}

#[tokio::test]
async fn test_post_predictdata_rejects_bad_input() {
    let bad_score = FORM.replace("reading_score=72", "reading_score=lots");
    let (status, body) = send(create_test_app(true), post_form(&bad_score)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("reading_score must be a number"));

    let missing = FORM.replace("&lunch=standard", "");
    let (status, body) = send(create_test_app(true), post_form(&missing)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("lunch is required"));
}

#[tokio::test]
async fn test_post_predictdata_without_model_is_unavailable() {
    let (status, body) = send(create_test_app(false), post_form(FORM)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body.contains("The prediction is"));
}

#[tokio::test]
async fn test_json_prediction_endpoint() {
    let payload = json!({
        "gender": "male",
        "race_ethnicity": "group C",
        "parental_level_of_education": "some college",
        "lunch": "free/reduced",
        "test_preparation_course": "completed",
        "reading_score": 64.0,
        "writing_score": 61.0
    });

    let (status, body) = send(create_test_app(true), post_json(&payload)).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(response["data"]["model_name"], "Linear Regression");
    assert!(response["data"]["score"].as_f64().unwrap().is_finite());
    assert!(response["data"]["id"].is_string());

    let (status, body) = send(create_test_app(false), post_json(&payload)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], false);
}

#[tokio::test]
async fn test_metrics_count_prediction_outcomes() {
    let app = create_test_app(true);

    let (status, _) = send(app.clone(), post_form(FORM)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(app.clone(), post_form("gender=female")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("scorecast_predictions_total{outcome=\"ok\"} 1"), "{body}");
    assert!(body.contains("scorecast_predictions_total{outcome=\"rejected\"} 1"), "{body}");
}
