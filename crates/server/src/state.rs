use classifier::{BreedClassifier, LabelMap};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state, built once at startup.
///
/// The label map and model version are read-only and shared freely; the
/// classifier sits behind a mutex because the session API takes `&mut`
/// for a forward pass.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Mutex<BreedClassifier>>,
    pub labels: Arc<LabelMap>,
    pub model_version: String,
}

impl AppState {
    pub fn new(classifier: BreedClassifier) -> Self {
        let labels = classifier.labels().clone();
        let model_version = classifier.model_version().to_string();

        Self {
            classifier: Arc::new(Mutex::new(classifier)),
            labels,
            model_version,
        }
    }
}
