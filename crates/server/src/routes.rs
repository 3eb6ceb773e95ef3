use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
};
use serde::Serialize;
use std::collections::BTreeMap;
use tower_http::cors::CorsLayer;

pub const SERVICE_NAME: &str = "Cattle Breed Classification API";

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
    status: &'static str,
    model: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
}

#[derive(Serialize)]
pub struct ClassesResponse {
    classes: BTreeMap<String, String>,
    total_classes: usize,
}

#[derive(Serialize)]
pub struct PredictResponse {
    predicted_breed: String,
    confidence: f32,
    class_index: usize,
    model_version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/classes", get(classes))
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_NAME,
        status: "online",
        model: state.model_version.clone(),
    })
}

async fn health() -> Json<HealthResponse> {
    // Startup is fatal without the model, so a serving process always
    // reports it loaded
    Json(HealthResponse {
        status: "healthy",
        model_loaded: true,
    })
}

async fn classes(State(state): State<AppState>) -> Json<ClassesResponse> {
    Json(ClassesResponse {
        classes: state.labels.entries().clone(),
        total_classes: state.labels.len(),
    })
}

async fn predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            // Content-type gate runs before the payload is even buffered
            if !field.content_type().unwrap_or("").starts_with("image/") {
                return Err(ApiError::InvalidInput("File must be an image".to_string()));
            }

            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidInput(format!("Failed to read upload: {}", e)))?;
            upload = Some(data);
            break;
        }
    }

    let data = upload.ok_or_else(|| ApiError::InvalidInput("No file uploaded".to_string()))?;

    let mut classifier = state.classifier.lock().await;
    let prediction = classifier.predict(&data)?;

    Ok(Json(PredictResponse {
        predicted_breed: prediction.breed,
        confidence: prediction.confidence,
        class_index: prediction.class_index,
        model_version: state.model_version.clone(),
    }))
}
