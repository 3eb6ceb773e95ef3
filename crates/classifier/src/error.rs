use thiserror::Error;

/// Failures on the predict path, tagged by stage.
///
/// All variants are reported to the caller with the same HTTP status, but
/// the tag is kept so server-side logs can tell a corrupt upload from a
/// runtime failure or a label map gap.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to prepare model input: {0}")]
    Preprocess(String),

    #[error("inference failed: {0}")]
    Inference(anyhow::Error),

    #[error("no label for class index {class_index}")]
    LabelLookup { class_index: usize },
}

impl ClassifyError {
    /// Stable stage tag for structured logging.
    pub fn stage(&self) -> &'static str {
        match self {
            ClassifyError::Decode(_) => "decode",
            ClassifyError::Preprocess(_) => "preprocess",
            ClassifyError::Inference(_) => "inference",
            ClassifyError::LabelLookup { .. } => "label_lookup",
        }
    }
}
