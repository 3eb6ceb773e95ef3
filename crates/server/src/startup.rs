use crate::config::Settings;
use crate::routes;
use crate::state::AppState;
use classifier::backend::ort::OrtBackend;
use classifier::{BreedClassifier, ClassifierBackend, LabelMap};
use std::path::Path;
use std::sync::Arc;

/// Load the model artifact and label map into the shared state.
///
/// Both loads must succeed before the listener binds; there is no partial
/// readiness.
pub fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let backend = OrtBackend::load_model(&settings.model_path)?;

    let labels = Arc::new(LabelMap::from_path(&settings.labels_path)?);
    tracing::info!(
        classes = labels.len(),
        "Label map loaded from {}",
        settings.labels_path
    );

    // The artifact filename is the only model versioning there is
    let model_version = Path::new(&settings.model_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| settings.model_path.clone());

    let classifier = BreedClassifier::new(Box::new(backend), labels, model_version);

    Ok(AppState::new(classifier))
}

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let state = build_state(&settings)?;
    let app = routes::router(state);

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
