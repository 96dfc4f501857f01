//! # sticker-fx
//!
//! Turns a photo of a person into a cutout sticker: the person's silhouette
//! on a transparent background with a solid outline.
//!
//! A segmentation model produces a coarse person mask which is then refined
//! on integer matrices: the largest blob is kept, its outer border traced and
//! flood-filled to close holes, the result upscaled with scale2x back to the
//! photo's resolution, outlined, and finally applied to the photo.
//!
//! ```rust,no_run
//! use sticker_fx::{PipelineConfig, StickerPipeline};
//! use sticker_fx::segmentation::DeepLabSegmenter;
//! use sticker_fx::source::FileSource;
//!
//! let model = DeepLabSegmenter::new("deeplabv3_257.onnx", false)?;
//! let mut pipeline = StickerPipeline::new(model, PipelineConfig::default())?;
//! let output = pipeline.run_source(&mut FileSource::new("me.jpg"), &())?;
//! output.sticker.save("me.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod refine;
pub mod segmentation;
pub mod source;

pub use config::PipelineConfig;
pub use error::{Result, StickerError};
pub use pipeline::{Checkpoint, ProgressSink, StickerOutput, StickerPipeline, Timings};
