use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scorecast_models::{ErrorKind, ScorecastError};
use tracing::error;

use crate::routes::ApiResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    ModelUnavailable,
    Internal,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::ModelUnavailable => "No trained model is loaded; run `scorecast train` first".to_string(),
            Self::Internal => "The server encountered an error while processing your request".to_string(),
        }
    }
}

impl From<ScorecastError> for ApiError {
    fn from(err: ScorecastError) -> Self {
        match err.kind() {
            ErrorKind::Data | ErrorKind::Configuration => Self::BadRequest(err.to_string()),
            ErrorKind::Io | ErrorKind::Model => {
                error!("❌ Prediction failed: {}", err);
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(self.message()),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn io_failures_hide_their_details() {
        let err = ApiError::from(ScorecastError::Io {
            path: PathBuf::from("/srv/artifacts/model.bin"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });

        assert!(matches!(err, ApiError::Internal));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("model.bin"));
    }

    #[test]
    fn data_errors_keep_their_reason() {
        let err = ApiError::from(ScorecastError::data("reading_score must be within 0..=100"));

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("reading_score"));
    }
}
