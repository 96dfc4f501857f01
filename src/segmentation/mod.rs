mod deeplab;
mod preprocess;
mod stored;
pub mod types;

pub use deeplab::DeepLabSegmenter;
pub use preprocess::Preprocessor;
pub use stored::StoredMaskSegmenter;
pub use types::{check_input, Segmenter};

use crate::error::Result;

/// Create the default segmentation model (DeepLab v3)
pub fn create_default_model(model_path: &str, use_gpu: bool) -> Result<Box<dyn Segmenter + Send>> {
    let model = DeepLabSegmenter::new(model_path, use_gpu)?;
    Ok(Box::new(model))
}
