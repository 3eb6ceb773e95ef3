use super::ClassifierBackend;
use ndarray::{Array, ArrayD, IxDyn};
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};

pub struct OrtBackend {
    session: Session,
    input_name: String,
    output_name: String,
}

impl ClassifierBackend for OrtBackend {
    fn load_model(path: &str) -> anyhow::Result<Self> {
        // Initialize ORT environment (idempotent)
        let _ = ort::init().commit();

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(path)?;

        // Keras exports don't have stable tensor names, resolve them from
        // the session metadata instead of hardcoding.
        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or_else(|| anyhow::anyhow!("model has no input tensor"))?;
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| anyhow::anyhow!("model has no output tensor"))?;

        tracing::info!(
            input = %input_name,
            output = %output_name,
            "Model loaded from {}",
            path
        );

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    fn infer(&mut self, images: &Array<f32, IxDyn>) -> anyhow::Result<ArrayD<f32>> {
        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => TensorRef::from_array_view(images.view())?
        ])?;

        let probabilities = outputs[self.output_name.as_str()].try_extract_array()?;

        Ok(probabilities.into_owned())
    }
}
