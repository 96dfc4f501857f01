use super::StickerSink;
use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes stickers as RGBA PNG files
pub struct PngSink {
    path: PathBuf,
}

impl PngSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl StickerSink for PngSink {
    fn write_sticker(&mut self, sticker: &RgbaImage) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }

        // PNG keeps the alpha channel the transparent background depends on
        sticker
            .save_with_format(&self.path, ImageFormat::Png)
            .with_context(|| format!("Failed to write sticker to {}", self.path.display()))?;

        tracing::info!(
            "Sticker written to {} ({}x{})",
            self.path.display(),
            sticker.width(),
            sticker.height()
        );
        Ok(())
    }
}
