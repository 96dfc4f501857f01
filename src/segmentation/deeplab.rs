use super::preprocess::Preprocessor;
use super::types::{check_input, Segmenter};
use crate::error::{Result, StickerError};
use crate::refine::LabelMatrix;
use image::RgbaImage;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;

/// DeepLab v3 (PASCAL VOC) semantic segmentation model
///
/// The network scores 21 classes per pixel on a fixed 257x257 input; only
/// the person class is kept.
pub struct DeepLabSegmenter {
    session: Session,
    preprocessor: Preprocessor,
}

impl DeepLabSegmenter {
    pub const INPUT_SIZE: u32 = 257;
    const NUM_CLASSES: usize = 21;
    const PERSON_CLASS: usize = 15;
    const IMAGE_MEAN: f32 = 128.0;
    const IMAGE_STD: f32 = 128.0;

    /// Create a new DeepLab segmenter from an ONNX file
    ///
    /// # Arguments
    /// * `model_path` - Path to the ONNX model file
    /// * `use_gpu` - Register the CUDA execution provider (needs the `gpu` feature)
    pub fn new<P: AsRef<Path>>(model_path: P, use_gpu: bool) -> Result<Self> {
        let path = model_path.as_ref();

        tracing::info!("Loading DeepLab model from {}", path.display());

        let unavailable = |e: &dyn std::fmt::Display| {
            StickerError::SegmenterUnavailable(format!("{}: {}", path.display(), e))
        };

        let builder = Session::builder()
            .map_err(|e| unavailable(&e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| unavailable(&e))?
            .with_intra_threads(4)
            .map_err(|e| unavailable(&e))?;
        let session = with_acceleration(builder, use_gpu)?
            .commit_from_file(path)
            .map_err(|e| unavailable(&e))?;

        tracing::info!("DeepLab model loaded successfully");

        Ok(Self {
            session,
            preprocessor: Preprocessor::new(Self::INPUT_SIZE, Self::IMAGE_MEAN, Self::IMAGE_STD),
        })
    }
}

#[cfg(feature = "gpu")]
fn with_acceleration(builder: SessionBuilder, use_gpu: bool) -> Result<SessionBuilder> {
    use ort::execution_providers::CUDAExecutionProvider;

    if !use_gpu {
        return Ok(builder);
    }
    tracing::info!("Registering CUDA execution provider");
    builder
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .map_err(|e| StickerError::SegmenterUnavailable(e.to_string()))
}

#[cfg(not(feature = "gpu"))]
fn with_acceleration(builder: SessionBuilder, use_gpu: bool) -> Result<SessionBuilder> {
    if use_gpu {
        tracing::warn!("Built without the `gpu` feature, running inference on CPU");
    }
    Ok(builder)
}

impl Segmenter for DeepLabSegmenter {
    fn segment(&mut self, image: &RgbaImage) -> Result<LabelMatrix> {
        let _span = tracing::debug_span!("deeplab_segment").entered();

        let side = check_input(image, Self::INPUT_SIZE)?;

        // Preprocess image to NHWC tensor
        let size = Self::INPUT_SIZE as usize;
        let input = self.preprocessor.preprocess(image);
        let input = Tensor::from_array(([1usize, size, size, 3], input.into_raw_vec()))?;

        // Run inference
        let _infer_span = tracing::debug_span!("inference").entered();
        let outputs = self.session.run(ort::inputs![input])?;
        drop(_infer_span);

        // Scores must have shape [1, 257, 257, 21]
        let (shape, scores) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: Vec<i64> = shape.iter().copied().collect();
        tracing::debug!("Model output shape: {:?}", dims);

        self.preprocessor
            .postprocess_scores(&dims, scores, Self::NUM_CLASSES, Self::PERSON_CLASS, side)?
            .ok_or(StickerError::NoSubjectDetected)
    }

    fn input_size(&self) -> u32 {
        Self::INPUT_SIZE
    }
}
