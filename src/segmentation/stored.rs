use super::types::{check_input, Segmenter};
use crate::error::{Result, StickerError};
use crate::refine::{LabelMatrix, Matrix};
use image::{imageops, GrayImage};
use std::path::Path;

/// Replays a mask stored as a grayscale image instead of running a model
///
/// Pixels brighter than `threshold` count as the person. The stored mask is
/// resized with nearest-neighbour sampling to whatever side is requested.
pub struct StoredMaskSegmenter {
    mask: GrayImage,
    threshold: u8,
    input_size: u32,
}

impl StoredMaskSegmenter {
    pub fn new(mask: GrayImage, threshold: u8, input_size: u32) -> Self {
        Self {
            mask,
            threshold,
            input_size,
        }
    }

    /// Load the mask from an image file
    pub fn open<P: AsRef<Path>>(path: P, input_size: u32) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading stored mask from {}", path.display());
        let mask = image::open(path)
            .map_err(|e| StickerError::SegmenterUnavailable(format!("{}: {}", path.display(), e)))?
            .to_luma8();
        Ok(Self::new(mask, 127, input_size))
    }
}

impl Segmenter for StoredMaskSegmenter {
    fn segment(&mut self, image: &image::RgbaImage) -> Result<LabelMatrix> {
        let _span = tracing::debug_span!("stored_mask_segment").entered();

        let side = check_input(image, self.input_size)?;
        let resized = imageops::resize(&self.mask, side, side, imageops::FilterType::Nearest);

        let mask = Matrix::from_fn(side as usize, side as usize, |at| {
            u32::from(resized.get_pixel(at.col as u32, at.row as u32)[0] > self.threshold)
        });

        if mask.as_slice().iter().all(|&v| v == 0) {
            return Err(StickerError::NoSubjectDetected);
        }
        Ok(mask)
    }

    fn input_size(&self) -> u32 {
        self.input_size
    }
}
