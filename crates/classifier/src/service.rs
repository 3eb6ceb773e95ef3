use crate::backend::ClassifierBackend;
use crate::error::ClassifyError;
use crate::labels::LabelMap;
use crate::postprocessing;
use crate::preprocessing::Preprocessor;
use std::sync::Arc;

/// A successful classification, ready to serialize into the response body.
#[derive(Debug, Clone, PartialEq)]
pub struct BreedPrediction {
    pub breed: String,
    pub confidence: f32,
    pub class_index: usize,
}

/// The full inference pipeline: preprocessing, backend forward pass and
/// label lookup, assembled once at startup and shared for the life of the
/// process.
pub struct BreedClassifier {
    backend: Box<dyn ClassifierBackend + Send>,
    preprocessor: Preprocessor,
    labels: Arc<LabelMap>,
    model_version: String,
}

impl BreedClassifier {
    pub fn new(
        backend: Box<dyn ClassifierBackend + Send>,
        labels: Arc<LabelMap>,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            preprocessor: Preprocessor::default(),
            labels,
            model_version: model_version.into(),
        }
    }

    /// Classify one uploaded image.
    pub fn predict(&mut self, image_bytes: &[u8]) -> Result<BreedPrediction, ClassifyError> {
        let batch = self.preprocessor.preprocess(image_bytes)?;

        let probabilities = self
            .backend
            .infer(&batch)
            .map_err(ClassifyError::Inference)?;

        let prediction = postprocessing::top_class(&probabilities.view())?;

        let breed = self
            .labels
            .get(prediction.class_index)
            .ok_or(ClassifyError::LabelLookup {
                class_index: prediction.class_index,
            })?;

        tracing::debug!(
            breed,
            class_index = prediction.class_index,
            confidence = prediction.confidence,
            "Image classified"
        );

        Ok(BreedPrediction {
            breed: breed.to_string(),
            confidence: prediction.confidence,
            class_index: prediction.class_index,
        })
    }

    pub fn labels(&self) -> &Arc<LabelMap> {
        &self.labels
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, ArrayD, IxDyn};
    use std::collections::BTreeMap;

    /// Backend emitting a canned probability vector, recording the input
    /// shape it was handed.
    struct StubBackend {
        probabilities: Vec<f32>,
        seen_shape: Option<Vec<usize>>,
    }

    impl StubBackend {
        fn new(probabilities: Vec<f32>) -> Self {
            Self {
                probabilities,
                seen_shape: None,
            }
        }
    }

    impl ClassifierBackend for StubBackend {
        fn load_model(_path: &str) -> anyhow::Result<Self> {
            Ok(Self::new(vec![1.0]))
        }

        fn infer(&mut self, images: &Array<f32, IxDyn>) -> anyhow::Result<ArrayD<f32>> {
            self.seen_shape = Some(images.shape().to_vec());
            Ok(Array::from_shape_vec(
                IxDyn(&[1, self.probabilities.len()]),
                self.probabilities.clone(),
            )?)
        }
    }

    fn holstein_jersey_labels() -> Arc<LabelMap> {
        let entries: BTreeMap<String, String> = [("0", "Holstein"), ("1", "Jersey")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(LabelMap::from_entries(entries).unwrap())
    }

    fn test_image() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(300, 200, image::Rgb([90, 60, 30]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn predicts_breed_from_argmax() {
        let backend = StubBackend::new(vec![0.9, 0.1]);
        let mut classifier =
            BreedClassifier::new(Box::new(backend), holstein_jersey_labels(), "final_model.onnx");

        let prediction = classifier.predict(&test_image()).unwrap();

        assert_eq!(prediction.breed, "Holstein");
        assert_eq!(prediction.class_index, 0);
        assert_eq!(prediction.confidence, 90.0);
    }

    #[test]
    fn tie_resolves_to_lowest_index() {
        let backend = StubBackend::new(vec![0.5, 0.5]);
        let mut classifier =
            BreedClassifier::new(Box::new(backend), holstein_jersey_labels(), "final_model.onnx");

        let prediction = classifier.predict(&test_image()).unwrap();

        assert_eq!(prediction.breed, "Holstein");
        assert_eq!(prediction.class_index, 0);
    }

    #[test]
    fn backend_receives_one_160_160_3_batch() {
        let mut backend = StubBackend::new(vec![0.2, 0.8]);
        let batch = Preprocessor::default().preprocess(&test_image()).unwrap();

        backend.infer(&batch).unwrap();

        assert_eq!(backend.seen_shape.as_deref(), Some(&[1, 160, 160, 3][..]));
    }

    #[test]
    fn identical_bytes_predict_identically() {
        let bytes = test_image();
        let mut classifier = BreedClassifier::new(
            Box::new(StubBackend::new(vec![0.3, 0.7])),
            holstein_jersey_labels(),
            "final_model.onnx",
        );

        let first = classifier.predict(&bytes).unwrap();
        let second = classifier.predict(&bytes).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.breed, "Jersey");
    }

    #[test]
    fn missing_label_is_a_lookup_error() {
        // Model emits 3 classes but the map only covers 2
        let backend = StubBackend::new(vec![0.1, 0.2, 0.7]);
        let mut classifier =
            BreedClassifier::new(Box::new(backend), holstein_jersey_labels(), "final_model.onnx");

        let err = classifier.predict(&test_image()).unwrap_err();

        assert!(matches!(err, ClassifyError::LabelLookup { class_index: 2 }));
        assert_eq!(err.stage(), "label_lookup");
    }

    #[test]
    fn corrupt_upload_is_a_decode_error() {
        let mut classifier = BreedClassifier::new(
            Box::new(StubBackend::new(vec![1.0])),
            holstein_jersey_labels(),
            "final_model.onnx",
        );

        let err = classifier.predict(b"not an image").unwrap_err();

        assert!(matches!(err, ClassifyError::Decode(_)));
    }
}
