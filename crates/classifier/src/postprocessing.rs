use crate::error::ClassifyError;
use ndarray::ArrayViewD;

/// Winning class of one probability vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    /// Percentage in `[0, 100]`, rounded to 2 decimal places.
    pub confidence: f32,
}

/// Pick the top class from a `[batch, num_classes]` probability matrix.
///
/// Only the first row is inspected (the service batches one image at a
/// time). Ties break toward the lowest index.
pub fn top_class(probabilities: &ArrayViewD<f32>) -> Result<Prediction, ClassifyError> {
    if probabilities.ndim() != 2 || probabilities.shape()[0] < 1 || probabilities.shape()[1] < 1 {
        return Err(ClassifyError::Inference(anyhow::anyhow!(
            "unexpected model output shape {:?}, want [batch, num_classes]",
            probabilities.shape()
        )));
    }

    let num_classes = probabilities.shape()[1];

    let mut best_index = 0usize;
    let mut best_prob = f32::NEG_INFINITY;
    for c in 0..num_classes {
        let p = probabilities[[0, c]];
        if p > best_prob {
            best_prob = p;
            best_index = c;
        }
    }

    Ok(Prediction {
        class_index: best_index,
        confidence: round_percent(best_prob),
    })
}

/// Scale a probability to a percentage with 2 decimal places.
fn round_percent(probability: f32) -> f32 {
    (probability * 100.0 * 100.0).round() / 100.0
}
