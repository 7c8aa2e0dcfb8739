use crate::error::ShrinkError;

/// Tuning parameters for [`shrink`](crate::shrink).
#[derive(Clone, Debug, PartialEq)]
pub struct ShrinkOptions {
    /// Fraction of pixels sampled for background detection and clustering.
    pub sample_fraction: f32,
    /// Minimum HSV value difference from the background for a pixel to count as ink.
    pub brightness_threshold: f32,
    /// Minimum HSV saturation difference from the background for a pixel to count as ink.
    pub saturation_threshold: f32,
    /// Total palette size, background included.
    pub num_colors: usize,
    /// Upper bound on k-means rounds.
    pub kmeans_max_iter: usize,
    /// Stretch palette saturation to the full `[0, 1]` range.
    pub saturate: bool,
    /// Render the background as pure white.
    pub white_background: bool,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self {
            sample_fraction: 0.05,
            brightness_threshold: 0.25,
            saturation_threshold: 0.20,
            num_colors: 8,
            kmeans_max_iter: 40,
            saturate: true,
            white_background: true,
        }
    }
}

impl ShrinkOptions {
    pub fn validate(&self) -> Result<(), ShrinkError> {
        if self.num_colors < 2 {
            return Err(ShrinkError::InvalidNumColors(self.num_colors));
        }
        // NaN fails both comparisons
        if !(self.sample_fraction > 0.0 && self.sample_fraction <= 1.0) {
            return Err(ShrinkError::InvalidSampleFraction(self.sample_fraction));
        }
        for (name, value) in [
            ("brightness_threshold", self.brightness_threshold),
            ("saturation_threshold", self.saturation_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ShrinkError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}
