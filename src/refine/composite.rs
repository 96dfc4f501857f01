use image::{Rgba, RgbaImage};

use super::types::{Coord, MaskMatrix, MaskState};
use crate::error::{Result, StickerError};

/// Colours written for the non-interior mask states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeStyle {
    pub background: Rgba<u8>,
    pub border: Rgba<u8>,
}

impl Default for CompositeStyle {
    fn default() -> Self {
        Self {
            background: Rgba([0, 0, 0, 0]),
            border: Rgba([255, 255, 255, 255]),
        }
    }
}

/// Cut the subject out of `image` using a tri-state mask
///
/// Background cells become `style.background`, border cells
/// `style.border`, interior cells keep the photo's pixel. The mask must have
/// exactly the image's dimensions.
pub fn apply_mask(image: &RgbaImage, mask: &MaskMatrix, style: &CompositeStyle) -> Result<RgbaImage> {
    let _span = tracing::debug_span!("apply_mask").entered();

    let (width, height) = image.dimensions();
    let expected = (height as usize, width as usize);
    if mask.shape() != expected {
        return Err(StickerError::DimensionMismatch {
            expected,
            actual: mask.shape(),
        });
    }

    let mut sticker = image.clone();
    for (x, y, pixel) in sticker.enumerate_pixels_mut() {
        match mask[Coord::new(y as usize, x as usize)] {
            MaskState::Background => *pixel = style.background,
            MaskState::Border => *pixel = style.border,
            MaskState::Interior => {}
        }
    }

    Ok(sticker)
}
