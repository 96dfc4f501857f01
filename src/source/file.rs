use super::ImageSource;
use crate::error::{Result, StickerError};
use image::{DynamicImage, ImageDecoder, ImageReader, RgbaImage};
use std::path::{Path, PathBuf};

/// Reads a photo from disk and applies its EXIF orientation
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn unreadable(&self, e: impl std::fmt::Display) -> StickerError {
        StickerError::InputUnreadable(format!("{}: {}", self.path.display(), e))
    }
}

impl ImageSource for FileSource {
    fn acquire(&mut self) -> Result<RgbaImage> {
        let _span = tracing::debug_span!("acquire").entered();

        tracing::info!("Loading photo from {}", self.path.display());

        let mut decoder = ImageReader::open(&self.path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| self.unreadable(e))?
            .into_decoder()
            .map_err(|e| self.unreadable(e))?;

        let orientation = decoder.orientation().map_err(|e| self.unreadable(e))?;
        let mut image = DynamicImage::from_decoder(decoder).map_err(|e| self.unreadable(e))?;
        image.apply_orientation(orientation);

        tracing::debug!(
            "Loaded {}x{} photo, orientation {:?}",
            image.width(),
            image.height(),
            orientation
        );

        Ok(image.to_rgba8())
    }
}
