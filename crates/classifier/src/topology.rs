//! Training-time network description.
//!
//! The serving path never builds a graph; it consumes an exported
//! artifact. This module pins down the shape contract that artifact was
//! trained against (160x160x3 in, N-way softmax out) so the preprocessing
//! code and the tests share one source of truth.

/// Model input resolution (width, height).
pub const IMG_SIZE: (u32, u32) = (160, 160);

/// Model input channels (RGB).
pub const CHANNELS: usize = 3;

/// Class count of the shipped artifact.
pub const DEFAULT_NUM_CLASSES: usize = 41;

/// Dropout rate applied between pooling and the dense head, training only.
pub const DROPOUT_RATE: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    Softmax,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// MobileNetV2-style feature extractor: original classification head
    /// excluded, weights left untrained for fresh training runs.
    Backbone { include_top: bool, pretrained: bool },
    GlobalAveragePooling,
    Dropout { rate: f32 },
    Dense { units: usize, activation: Activation },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkTopology {
    /// (width, height, channels)
    pub input_shape: (u32, u32, usize),
    pub layers: Vec<Layer>,
    pub num_classes: usize,
}

impl NetworkTopology {
    /// Width of the final dense layer, i.e. the length of the probability
    /// vector the serving path receives.
    pub fn output_width(&self) -> usize {
        self.num_classes
    }
}

/// Describe the classification network for a given class count.
pub fn build_topology(num_classes: usize) -> anyhow::Result<NetworkTopology> {
    if num_classes == 0 {
        anyhow::bail!("num_classes must be a positive integer");
    }

    Ok(NetworkTopology {
        input_shape: (IMG_SIZE.0, IMG_SIZE.1, CHANNELS),
        layers: vec![
            Layer::Backbone {
                include_top: false,
                pretrained: false,
            },
            Layer::GlobalAveragePooling,
            Layer::Dropout { rate: DROPOUT_RATE },
            Layer::Dense {
                units: num_classes,
                activation: Activation::Softmax,
            },
        ],
        num_classes,
    })
}
