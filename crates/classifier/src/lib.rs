pub mod backend;
pub mod error;
pub mod labels;
pub mod postprocessing;
pub mod preprocessing;
pub mod service;
pub mod topology;

pub use backend::ClassifierBackend;
pub use error::ClassifyError;
pub use labels::LabelMap;
pub use postprocessing::Prediction;
pub use preprocessing::Preprocessor;
pub use service::{BreedClassifier, BreedPrediction};
