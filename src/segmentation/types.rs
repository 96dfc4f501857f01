use image::RgbaImage;

use crate::error::{Result, StickerError};
use crate::refine::LabelMatrix;

/// Trait for person segmentation backends
/// Allows swapping between inference engines or replaying a stored mask
pub trait Segmenter {
    /// Segment a square image
    ///
    /// # Arguments
    /// * `image` - Square RGBA image with side at most [`Segmenter::input_size`]
    ///
    /// # Returns
    /// * Matrix of the image's side with `1` where a person was found and `0`
    ///   elsewhere, or [`StickerError::NoSubjectDetected`]
    fn segment(&mut self, image: &RgbaImage) -> Result<LabelMatrix>;

    /// Largest side the backend accepts
    fn input_size(&self) -> u32;
}

impl<S: Segmenter + ?Sized> Segmenter for Box<S> {
    fn segment(&mut self, image: &RgbaImage) -> Result<LabelMatrix> {
        (**self).segment(image)
    }

    fn input_size(&self) -> u32 {
        (**self).input_size()
    }
}

/// Reject images the segmenter contract does not cover
pub fn check_input(image: &RgbaImage, input_size: u32) -> Result<u32> {
    let (width, height) = image.dimensions();
    if width != height || width > input_size || width == 0 {
        return Err(StickerError::InvalidSegmenterInput {
            width,
            height,
            max: input_size,
        });
    }
    Ok(width)
}
