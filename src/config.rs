use crate::error::{Result, StickerError};
use crate::refine::{CompositeStyle, SeedWindow};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Side of the square sticker in pixels
    pub sticker_side: u32,
    /// Minimum share of the frame, in percent, the subject must cover
    pub tolerance_percent: u32,
    /// Outline thickness in pixels at sticker resolution
    pub outline_radius: u32,
    /// Colours for background and outline
    pub style: CompositeStyle,
    /// Where to look for a point inside the subject before filling holes
    pub seed_window: SeedWindow,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sticker_side: 512,
            tolerance_percent: 3,
            outline_radius: 2,
            style: CompositeStyle::default(),
            seed_window: SeedWindow::WHOLE,
        }
    }
}

impl PipelineConfig {
    /// Number of times the sticker side is halved to fit `input_size`
    pub fn halvings(&self, input_size: u32) -> u32 {
        let mut side = self.sticker_side;
        let mut count = 0;
        while side > input_size && side > 0 {
            side /= 2;
            count += 1;
        }
        count
    }

    /// Check the configuration against a segmenter's input size
    ///
    /// Returns the number of halvings. The sticker side must survive halving
    /// and doubling back unchanged, otherwise the upscaled mask would not
    /// match the colour image.
    pub fn validate(&self, input_size: u32) -> Result<u32> {
        if self.sticker_side == 0 {
            return Err(StickerError::InvalidConfig("sticker side must be positive".into()));
        }
        if input_size == 0 {
            return Err(StickerError::InvalidConfig("segmenter input size must be positive".into()));
        }
        if self.tolerance_percent > 100 {
            return Err(StickerError::ToleranceOutOfRange(self.tolerance_percent));
        }
        if self.outline_radius > self.sticker_side {
            return Err(StickerError::InvalidConfig(format!(
                "outline radius {} exceeds sticker side {}",
                self.outline_radius, self.sticker_side
            )));
        }

        let halvings = self.halvings(input_size);
        let restored = (self.sticker_side >> halvings) << halvings;
        if restored != self.sticker_side {
            return Err(StickerError::InvalidConfig(format!(
                "sticker side {} halved {} times to fit {} cannot be restored exactly (got {})",
                self.sticker_side, halvings, input_size, restored
            )));
        }
        Ok(halvings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fits_deeplab_with_one_halving() {
        let config = PipelineConfig::default();
        assert_eq!(config.validate(257).expect("Default config is valid"), 1);
    }

    #[test]
    fn test_small_sticker_needs_no_halving() {
        let config = PipelineConfig {
            sticker_side: 200,
            ..Default::default()
        };
        assert_eq!(config.validate(257).expect("Should validate"), 0);
    }

    #[test]
    fn test_odd_side_that_cannot_be_restored_is_rejected() {
        let config = PipelineConfig {
            sticker_side: 513,
            ..Default::default()
        };
        assert!(matches!(config.validate(257), Err(StickerError::InvalidConfig(_))));
    }

    #[test]
    fn test_multiple_halvings() {
        let config = PipelineConfig {
            sticker_side: 1200,
            ..Default::default()
        };
        // 1200 -> 600 -> 300 -> 150
        assert_eq!(config.validate(257).expect("Should validate"), 3);
    }

    #[test]
    fn test_outline_wider_than_sticker_is_rejected() {
        let config = PipelineConfig {
            outline_radius: 2_200_000_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(257), Err(StickerError::InvalidConfig(_))));

        let config = PipelineConfig {
            outline_radius: 512,
            ..Default::default()
        };
        assert!(config.validate(257).is_ok());
    }

    #[test]
    fn test_bad_tolerance_is_rejected() {
        let config = PipelineConfig {
            tolerance_percent: 150,
            ..Default::default()
        };
        assert!(matches!(config.validate(257), Err(StickerError::ToleranceOutOfRange(150))));
    }
}
