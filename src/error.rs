use thiserror::Error;

/// Everything that can stop a sticker run.
///
/// Variants fall into four groups: bad input, expected semantic outcomes
/// (see [`StickerError::is_semantic`]), programmer errors at an API boundary,
/// and resource failures of the inference backend.
#[derive(Error, Debug)]
pub enum StickerError {
    #[error("Input unreadable: {0}")]
    InputUnreadable(String),

    #[error("Segmenter input must be square and at most {max}x{max}, got {width}x{height}")]
    InvalidSegmenterInput { width: u32, height: u32, max: u32 },

    #[error("No subject detected")]
    NoSubjectDetected,

    #[error("Subject too small or fragmented: largest region covers {size} of {area} pixels, {tolerance}% required")]
    SubjectTooSmall {
        size: usize,
        area: usize,
        tolerance: u32,
    },

    #[error("Malformed mask: no interior point found inside the subject border")]
    MalformedMask,

    #[error("Empty border: the mask has no foreground boundary")]
    EmptyBorder,

    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Tolerance must be within 0..=100 percent, got {0}")]
    ToleranceOutOfRange(u32),

    #[error("Seed ({row}, {col}) lies outside a {rows}x{cols} matrix")]
    SeedOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Segmenter unavailable: {0}")]
    SegmenterUnavailable(String),

    #[error("ONNX inference failed: {0}")]
    Inference(#[from] ort::Error),
}

impl StickerError {
    /// Expected, user-facing outcomes rather than defects.
    pub fn is_semantic(&self) -> bool {
        matches!(
            self,
            StickerError::NoSubjectDetected
                | StickerError::SubjectTooSmall { .. }
                | StickerError::MalformedMask
                | StickerError::EmptyBorder
        )
    }
}

pub type Result<T> = std::result::Result<T, StickerError>;
