mod png;

pub use png::PngSink;

use anyhow::Result;
use image::RgbaImage;

/// Trait for sticker destinations
pub trait StickerSink {
    /// Persist a finished sticker
    fn write_sticker(&mut self, sticker: &RgbaImage) -> Result<()>;
}
