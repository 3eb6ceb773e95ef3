use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use classifier::ClassifyError;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Request-level failures of the predict endpoint.
///
/// Validation failures reject the request before any processing; every
/// later failure is reported with one uniform 500 shape, with the stage
/// tag kept for the server-side log line only.
#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    Processing(ClassifyError),
}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        ApiError::Processing(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidInput(detail) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { detail })).into_response()
            }
            ApiError::Processing(err) => {
                tracing::error!(stage = err.stage(), error = %err, "Error processing image");
                let detail = format!("Error processing image: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { detail })).into_response()
            }
        }
    }
}
