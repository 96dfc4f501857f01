mod file;

pub use file::FileSource;

use crate::error::Result;
use image::{imageops, RgbaImage};

/// Trait for photo sources
pub trait ImageSource {
    /// Acquire one photo, already rotated to its display orientation
    fn acquire(&mut self) -> Result<RgbaImage>;
}

/// Centre-crop `image` to a square and resize it to `side`
pub fn square_to_side(image: &RgbaImage, side: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let crop = width.min(height);
    let square = imageops::crop_imm(image, (width - crop) / 2, (height - crop) / 2, crop, crop).to_image();

    if crop == side {
        square
    } else {
        imageops::resize(&square, side, side, imageops::FilterType::Lanczos3)
    }
}
