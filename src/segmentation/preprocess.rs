use image::RgbaImage;
use ndarray::Array4;

use crate::error::{Result, StickerError};
use crate::refine::{LabelMatrix, Matrix};

/// Converts images to model input tensors and class scores back to masks
pub struct Preprocessor {
    input_size: u32,
    mean: f32,
    std: f32,
}

impl Preprocessor {
    pub fn new(input_size: u32, mean: f32, std: f32) -> Self {
        Self {
            input_size,
            mean,
            std,
        }
    }

    /// Preprocess an RGBA image into a normalized NHWC tensor
    ///
    /// Steps:
    /// 1. Place the image in the top-left corner of an `input_size` square
    /// 2. Normalize each channel as `(v - mean) / std`
    /// 3. Leave the padding at the normalized value of black
    ///
    /// Returns: Array4<f32> with shape [1, input_size, input_size, 3]
    pub fn preprocess(&self, image: &RgbaImage) -> Array4<f32> {
        let _span = tracing::debug_span!("preprocess").entered();

        let size = self.input_size as usize;
        let black = (0.0 - self.mean) / self.std;
        let mut tensor = Array4::<f32>::from_elem((1, size, size, 3), black);

        for (x, y, pixel) in image.enumerate_pixels() {
            if x >= self.input_size || y >= self.input_size {
                continue;
            }
            for c in 0..3 {
                tensor[[0, y as usize, x as usize, c]] = (pixel[c] as f32 - self.mean) / self.std;
            }
        }

        tensor
    }

    /// Turn per-pixel class scores into a binary mask for `class`
    ///
    /// # Arguments
    /// * `shape` - Output shape reported by the model
    /// * `scores` - Flattened [1, input_size, input_size, num_classes] scores
    /// * `num_classes` - Number of classes per pixel
    /// * `class` - Class index that counts as foreground
    /// * `side` - Side of the original image; the padded area is dropped
    ///
    /// Returns: `None` when no pixel of the kept area picked `class`
    pub fn postprocess_scores(
        &self,
        shape: &[i64],
        scores: &[f32],
        num_classes: usize,
        class: usize,
        side: u32,
    ) -> Result<Option<LabelMatrix>> {
        let _span = tracing::debug_span!("postprocess").entered();

        let size = self.input_size as usize;
        let expected = [1, size as i64, size as i64, num_classes as i64];
        if shape != expected.as_slice() {
            return Err(StickerError::SegmenterUnavailable(format!(
                "expected NHWC output shape {:?}, model produced {:?}",
                expected, shape
            )));
        }
        if scores.len() != size * size * num_classes {
            return Err(StickerError::SegmenterUnavailable(format!(
                "expected {} output scores, model produced {}",
                size * size * num_classes,
                scores.len()
            )));
        }

        let side = side as usize;
        let mut found = false;
        let mask = Matrix::from_fn(side, side, |at| {
            let offset = (at.row * size + at.col) * num_classes;
            let pixel_scores = &scores[offset..offset + num_classes];
            let is_class = argmax(pixel_scores) == class;
            found |= is_class;
            u32::from(is_class)
        });

        Ok(found.then_some(mask))
    }
}

/// Index of the highest score, first one on ties
fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine::Coord;
    use image::Rgba;

    #[test]
    fn test_preprocess_normalizes_and_pads() {
        let pre = Preprocessor::new(4, 128.0, 128.0);
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 128, 0, 255]));
        let tensor = pre.preprocess(&image);
        assert_eq!(tensor.shape(), &[1, 4, 4, 3]);
        assert!((tensor[[0, 1, 1, 0]] - 127.0 / 128.0).abs() < 1e-6);
        assert_eq!(tensor[[0, 1, 1, 1]], 0.0);
        assert_eq!(tensor[[0, 1, 1, 2]], -1.0);
        assert_eq!(tensor[[0, 3, 3, 0]], -1.0);
    }

    #[test]
    fn test_postprocess_picks_class_and_crops() {
        let pre = Preprocessor::new(3, 128.0, 128.0);
        let classes = 3;
        let mut scores = vec![0.0f32; 3 * 3 * classes];
        // Pixel (0, 1) votes for class 2, pixel (2, 2) is padding
        let cell = |row: usize, col: usize| (row * 3 + col) * classes;
        scores[cell(0, 1) + 2] = 5.0;
        scores[cell(2, 2) + 2] = 5.0;

        let mask = pre
            .postprocess_scores(&[1, 3, 3, 3], &scores, classes, 2, 2)
            .expect("Shapes match")
            .expect("Class present");
        assert_eq!(mask.shape(), (2, 2));
        assert_eq!(mask[Coord::new(0, 1)], 1);
        assert_eq!(mask.as_slice().iter().sum::<u32>(), 1);
    }

    #[test]
    fn test_postprocess_reports_missing_class() {
        let pre = Preprocessor::new(2, 128.0, 128.0);
        let scores = vec![1.0f32; 2 * 2 * 4];
        let shape = [1, 2, 2, 4];
        assert!(pre.postprocess_scores(&shape, &scores, 4, 3, 2).expect("Shapes match").is_none());
        assert!(pre.postprocess_scores(&shape, &scores[1..], 4, 3, 2).is_err());
    }

    #[test]
    fn test_postprocess_rejects_channels_first_scores() {
        let pre = Preprocessor::new(2, 128.0, 128.0);
        let classes = 3;
        // Channels-first [1, 3, 2, 2]: class 2 wins only at pixel (0, 0)
        let mut scores = vec![0.0f32; classes * 2 * 2];
        scores[2 * 4] = 5.0;

        let result = pre.postprocess_scores(&[1, 3, 2, 2], &scores, classes, 2, 2);
        assert!(matches!(result, Err(StickerError::SegmenterUnavailable(_))));

        let result = pre.postprocess_scores(&[1, 2, 2, 3, 1], &scores, classes, 2, 2);
        assert!(matches!(result, Err(StickerError::SegmenterUnavailable(_))));
    }
}
