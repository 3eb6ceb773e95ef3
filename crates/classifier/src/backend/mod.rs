use ndarray::{Array, ArrayD, IxDyn};

#[cfg(feature = "ort-backend")]
pub mod ort;

pub trait ClassifierBackend {
    fn load_model(path: &str) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Run a forward pass over a `[batch, height, width, channels]` input,
    /// producing a `[batch, num_classes]` probability matrix (softmax is
    /// part of the exported graph).
    fn infer(&mut self, images: &Array<f32, IxDyn>) -> anyhow::Result<ArrayD<f32>>;
}
