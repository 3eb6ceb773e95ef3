use crate::error::ClassifyError;
use crate::topology::{CHANNELS, IMG_SIZE};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use ndarray::{Array, IxDyn};

/// Turns an uploaded image (any format the decoder knows, any resolution,
/// any color mode) into the fixed model input batch.
///
/// The pipeline is unconditional: decode, flatten to RGB, resize straight
/// to the target size with no aspect-ratio preservation or padding, scale
/// to `[0, 1]`, wrap in a batch of one.
pub struct Preprocessor {
    pub input_size: (u32, u32),
    resizer: Resizer,
}

impl Preprocessor {
    pub fn new(input_size: (u32, u32)) -> Self {
        Self {
            input_size,
            resizer: Resizer::new(),
        }
    }

    /// Decode raw upload bytes into a `[1, H, W, 3]` float batch.
    pub fn preprocess(&mut self, bytes: &[u8]) -> Result<Array<f32, IxDyn>, ClassifyError> {
        let decoded = image::load_from_memory(bytes)?;

        // Palette, grayscale and alpha inputs all flatten to 3-channel RGB
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut pixels = rgb.into_raw();

        tracing::trace!(width, height, "Decoded upload");

        let resized = self.resize(&mut pixels, width, height)?;

        Self::normalize(&resized, self.input_size)
    }

    fn resize(
        &mut self,
        pixels: &mut [u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ClassifyError> {
        let src = Image::from_slice_u8(width, height, pixels, PixelType::U8x3)
            .map_err(|e| ClassifyError::Preprocess(e.to_string()))?;

        let mut dst = Image::new(self.input_size.0, self.input_size.1, PixelType::U8x3);

        self.resizer
            .resize(
                &src,
                &mut dst,
                &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
            )
            .map_err(|e| ClassifyError::Preprocess(e.to_string()))?;

        Ok(dst.into_vec())
    }

    fn normalize(pixels: &[u8], size: (u32, u32)) -> Result<Array<f32, IxDyn>, ClassifyError> {
        let scaled: Vec<f32> = pixels.iter().map(|&v| v as f32 / 255.0).collect();

        // Interleaved RGB row-major is already NHWC order
        Array::from_shape_vec(
            IxDyn(&[1, size.1 as usize, size.0 as usize, CHANNELS]),
            scaled,
        )
        .map_err(|e| ClassifyError::Preprocess(e.to_string()))
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(IMG_SIZE)
    }
}
