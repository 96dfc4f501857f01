//! Sticker pipeline: acquire, segment, isolate, fill holes, upscale and
//! outline, composite.

mod progress;

pub use progress::{Checkpoint, ProgressSink};

use std::time::{Duration, Instant};

use image::{imageops, RgbaImage};

use crate::config::PipelineConfig;
use crate::error::{Result, StickerError};
use crate::refine::{
    apply_mask, find_border, find_interior_seed, flood_fill, grow_border, refine_border, scale2x_n,
    ComponentLabeler, LabelMatrix, MaskMatrix, MaskState, Matrix,
};
use crate::segmentation::Segmenter;
use crate::source::{square_to_side, ImageSource};

/// Wall-clock measurements of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timings {
    pub total: Duration,
    pub inference: Duration,
}

/// A finished sticker and how long it took
#[derive(Debug, Clone)]
pub struct StickerOutput {
    pub sticker: RgbaImage,
    pub timings: Timings,
}

/// Runs photos through segmentation and mask refinement
pub struct StickerPipeline<S> {
    segmenter: S,
    config: PipelineConfig,
    halvings: u32,
}

impl<S: Segmenter> StickerPipeline<S> {
    pub fn new(segmenter: S, config: PipelineConfig) -> Result<Self> {
        let halvings = config.validate(segmenter.input_size())?;
        tracing::debug!(
            "Sticker side {} needs {} halvings for segmenter input {}",
            config.sticker_side,
            halvings,
            segmenter.input_size()
        );
        Ok(Self {
            segmenter,
            config,
            halvings,
        })
    }

    /// Acquire a photo from `source` and turn it into a sticker
    pub fn run_source<I, P>(&mut self, source: &mut I, progress: &P) -> Result<StickerOutput>
    where
        I: ImageSource + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let started = Instant::now();
        let photo = source.acquire()?;
        self.process(&photo, started, progress)
    }

    /// Turn an upright photo into a sticker
    pub fn run<P: ProgressSink + ?Sized>(&mut self, photo: &RgbaImage, progress: &P) -> Result<StickerOutput> {
        self.process(photo, Instant::now(), progress)
    }

    fn process<P: ProgressSink + ?Sized>(
        &mut self,
        photo: &RgbaImage,
        started: Instant,
        progress: &P,
    ) -> Result<StickerOutput> {
        let _span = tracing::info_span!("sticker", side = self.config.sticker_side).entered();

        if photo.width() == 0 || photo.height() == 0 {
            return Err(StickerError::InputUnreadable("photo has no pixels".into()));
        }

        // Acquire: colour copy at sticker resolution
        let colour = square_to_side(photo, self.config.sticker_side);
        progress.report(Checkpoint::Segmenting);

        let (raw, inference) = self.segment(&colour)?;
        progress.report(Checkpoint::Isolating);

        let silhouette = self.isolate(&raw)?;
        progress.report(Checkpoint::FillingHoles);

        let filled = self.fill_holes(&raw, &silhouette)?;
        progress.report(Checkpoint::Outlining);

        let mask = self.outline(filled);
        let sticker = {
            let _span = tracing::debug_span!("composite").entered();
            apply_mask(&colour, &mask, &self.config.style)?
        };
        progress.report(Checkpoint::Done);

        let timings = Timings {
            total: started.elapsed(),
            inference,
        };
        tracing::info!(
            "Sticker ready: total={:.1}ms, inference={:.1}ms",
            timings.total.as_secs_f64() * 1000.0,
            timings.inference.as_secs_f64() * 1000.0
        );

        Ok(StickerOutput { sticker, timings })
    }

    /// Halve the colour copy until it fits the segmenter, then segment it
    fn segment(&mut self, colour: &RgbaImage) -> Result<(LabelMatrix, Duration)> {
        let _span = tracing::debug_span!("segment").entered();

        let mut working = colour.clone();
        for _ in 0..self.halvings {
            let side = working.width() / 2;
            working = imageops::resize(&working, side, side, imageops::FilterType::Triangle);
        }

        let start = Instant::now();
        let raw = self.segmenter.segment(&working)?;
        let inference = start.elapsed();

        let side = working.width() as usize;
        if raw.shape() != (side, side) {
            return Err(StickerError::DimensionMismatch {
                expected: (side, side),
                actual: raw.shape(),
            });
        }

        tracing::debug!(
            "Segmented {}x{} input in {:.1}ms",
            side,
            side,
            inference.as_secs_f64() * 1000.0
        );
        Ok((raw, inference))
    }

    /// Keep the largest blob of the raw mask
    fn isolate(&self, raw: &LabelMatrix) -> Result<MaskMatrix> {
        let _span = tracing::debug_span!("isolate").entered();

        let labeler = ComponentLabeler::new(raw);
        tracing::debug!("Found {} components", labeler.component_count());
        labeler.filter_to_largest(MaskState::Interior, MaskState::Background, self.config.tolerance_percent)
    }

    /// Rebuild the silhouette from its outer border so interior holes vanish
    fn fill_holes(&self, raw: &LabelMatrix, silhouette: &MaskMatrix) -> Result<MaskMatrix> {
        let _span = tracing::debug_span!("fill_holes").entered();

        let border = refine_border(&find_border(raw, &0))?;

        let (rows, cols) = raw.shape();
        let mut mask = Matrix::filled(rows, cols, MaskState::Background);
        for &p in &border {
            mask.set(p, MaskState::Border);
        }

        let seed = find_interior_seed(silhouette, &MaskState::Interior, &border, self.config.seed_window)
            .ok_or(StickerError::MalformedMask)?;
        tracing::debug!("Filling from seed ({}, {})", seed.row, seed.col);

        let mask = flood_fill(mask, seed, MaskState::Interior, MaskState::Border)?;
        Ok(mask.map(|&s| match s {
            MaskState::Background => MaskState::Background,
            MaskState::Interior | MaskState::Border => MaskState::Interior,
        }))
    }

    /// Restore full resolution and draw the outline
    fn outline(&self, filled: MaskMatrix) -> MaskMatrix {
        let _span = tracing::debug_span!("outline").entered();

        let full = scale2x_n(filled, self.halvings);
        let border = find_border(&full, &MaskState::Background);
        tracing::debug!("Growing {} border pixels by {}", border.len(), self.config.outline_radius);
        grow_border(full, &border, self.config.outline_radius, MaskState::Border)
    }
}
