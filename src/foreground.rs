use crate::color::{Rgbf, rgb_to_hsv};

/// HSV distances from the background beyond which a pixel counts as ink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub brightness: f32,
    pub saturation: f32,
}

/// Classifies colors as foreground or background relative to a reference color.
#[derive(Clone, Copy, Debug)]
pub struct ForegroundClassifier {
    saturation: f32,
    value: f32,
    thresholds: Thresholds,
}

impl ForegroundClassifier {
    pub fn new(reference: Rgbf, thresholds: Thresholds) -> Self {
        let hsv = rgb_to_hsv(reference);
        Self {
            saturation: hsv.saturation,
            value: hsv.value,
            thresholds,
        }
    }

    /// A color is foreground when either its brightness or its saturation
    /// departs from the reference by at least the matching threshold.
    pub fn is_foreground(&self, c: Rgbf) -> bool {
        let hsv = rgb_to_hsv(c);
        let v_diff = (self.value - hsv.value).abs();
        let s_diff = (self.saturation - hsv.saturation).abs();
        v_diff >= self.thresholds.brightness || s_diff >= self.thresholds.saturation
    }
}

/// Foreground mask for `colors`, parallel to the input slice.
pub fn classify(reference: Rgbf, colors: &[Rgbf], thresholds: Thresholds) -> Vec<bool> {
    let classifier = ForegroundClassifier::new(reference, thresholds);
    colors.iter().map(|&c| classifier.is_foreground(c)).collect()
}
