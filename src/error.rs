use thiserror::Error;

/// Errors reported before or around the color pipeline.
///
/// The pipeline itself is total once its inputs pass [`ShrinkOptions::validate`]
/// and the image is non-empty; everything here is raised at that boundary or
/// by the byte-level codec helpers.
///
/// [`ShrinkOptions::validate`]: crate::ShrinkOptions::validate
#[derive(Debug, Error)]
pub enum ShrinkError {
    #[error("num_colors must be at least 2, got {0}")]
    InvalidNumColors(usize),

    #[error("sample_fraction must be in (0, 1], got {0}")]
    InvalidSampleFraction(f32),

    #[error("{name} must be in [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("pixel buffer holds {len} pixels, expected {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize },

    #[error("no pixels were sampled")]
    NoSamples,

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
}
