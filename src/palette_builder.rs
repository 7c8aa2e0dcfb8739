use crate::background::{BACKGROUND_BITS, find_background_color};
use crate::color::{Hsv, Rgbf, hsv_to_rgb, rgb_to_hsv};
use crate::error::ShrinkError;
use crate::foreground::{ForegroundClassifier, Thresholds};
use crate::kmeans::kmeans;
use crate::options::ShrinkOptions;

/// Ordered palette colors. Entry 0 is always the background.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgbf>,
}

impl Palette {
    pub fn new(background: Rgbf, foreground: impl IntoIterator<Item = Rgbf>) -> Self {
        let mut colors = vec![background];
        colors.extend(foreground);
        Self { colors }
    }

    pub fn colors(&self) -> &[Rgbf] {
        &self.colors
    }

    pub fn background(&self) -> Rgbf {
        self.colors[0]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Stretch saturation so the palette spans the full `[0, 1]` range,
    /// keeping hue and value. Returns `None` when every entry has the same
    /// saturation, since there is no range to stretch.
    pub fn saturated(&self) -> Option<Palette> {
        let hsv: Vec<Hsv> = self.colors.iter().map(|&c| rgb_to_hsv(c)).collect();
        let (min_sat, max_sat) = hsv.iter().fold((1.0f32, 0.0f32), |(lo, hi), c| {
            (lo.min(c.saturation), hi.max(c.saturation))
        });
        let range = max_sat - min_sat;
        if range <= f32::EPSILON {
            return None;
        }

        let colors = hsv
            .into_iter()
            .map(|c| {
                hsv_to_rgb(Hsv {
                    saturation: (c.saturation - min_sat) / range,
                    ..c
                })
            })
            .collect();
        Some(Palette { colors })
    }
}

/// Detect the background of `samples` and cluster the remaining ink colors.
///
/// The returned palette has exactly `options.num_colors` entries: the
/// detected background followed by `num_colors - 1` rounded k-means centers
/// in seeding order.
pub fn build_palette(samples: &[Rgbf], options: &ShrinkOptions) -> Result<Palette, ShrinkError> {
    let background = find_background_color(samples, BACKGROUND_BITS).ok_or(ShrinkError::NoSamples)?;

    let classifier = ForegroundClassifier::new(background, thresholds(options));
    let foreground: Vec<Rgbf> = samples
        .iter()
        .copied()
        .filter(|&c| classifier.is_foreground(c))
        .collect();

    tracing::debug!(
        background = %background.to_hex(),
        samples = samples.len(),
        foreground = foreground.len(),
        "Detected page background"
    );

    let clustering = kmeans(&foreground, options.num_colors - 1, options.kmeans_max_iter);
    tracing::debug!(
        iterations = clustering.iterations,
        converged = clustering.converged,
        "Clustered foreground colors"
    );

    Ok(Palette::new(
        background,
        clustering.centers.into_iter().map(Rgbf::rounded),
    ))
}

pub(crate) fn thresholds(options: &ShrinkOptions) -> Thresholds {
    Thresholds {
        brightness: options.brightness_threshold,
        saturation: options.saturation_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(num_colors: usize) -> ShrinkOptions {
        ShrinkOptions {
            num_colors,
            ..Default::default()
        }
    }

    fn page() -> Vec<Rgbf> {
        let mut samples = vec![Rgbf::new(238.0, 236.0, 230.0); 300];
        // One ink per hue-wheel seed: red, cyan and white for four colors.
        samples.extend(vec![Rgbf::new(150.0, 20.0, 20.0); 60]);
        samples.extend(vec![Rgbf::new(20.0, 140.0, 150.0); 30]);
        samples.extend(vec![Rgbf::new(250.0, 250.0, 120.0); 10]);
        samples
    }

    #[test]
    fn palette_has_requested_size_with_background_first() {
        for n in [2, 3, 5, 8, 16] {
            let palette = build_palette(&page(), &options(n)).unwrap();
            assert_eq!(palette.len(), n);
            assert_eq!(palette.background(), Rgbf::new(238.0, 238.0, 230.0));
        }
    }

    #[test]
    fn centers_are_rounded_ink_colors() {
        let palette = build_palette(&page(), &options(4)).unwrap();
        for ink in [
            Rgbf::new(150.0, 20.0, 20.0),
            Rgbf::new(20.0, 140.0, 150.0),
            Rgbf::new(250.0, 250.0, 120.0),
        ] {
            assert!(palette.colors()[1..].contains(&ink), "{ink:?} missing from {palette:?}");
        }
    }

    #[test]
    fn blank_page_gives_degenerate_clusters() {
        let samples = vec![Rgbf::new(250.0, 250.0, 250.0); 50];
        let palette = build_palette(&samples, &options(4)).unwrap();
        assert_eq!(palette.len(), 4);
        assert_eq!(&palette.colors()[1..], &[Rgbf::BLACK; 3]);
    }

    #[test]
    fn no_samples_is_an_error() {
        assert!(matches!(
            build_palette(&[], &options(4)),
            Err(ShrinkError::NoSamples)
        ));
    }

    #[test]
    fn saturation_stretch_spans_unit_range() {
        let palette = Palette::new(
            Rgbf::new(240.0, 235.0, 220.0),
            [
                Rgbf::new(30.0, 30.0, 40.0),
                Rgbf::new(60.0, 70.0, 150.0),
                Rgbf::new(160.0, 60.0, 60.0),
            ],
        );
        let stretched = palette.saturated().unwrap();
        let sats: Vec<f32> = stretched
            .colors()
            .iter()
            .map(|&c| rgb_to_hsv(c).saturation)
            .collect();
        let min = sats.iter().copied().fold(f32::INFINITY, f32::min);
        let max = sats.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(min.abs() < 1e-4, "min saturation {min}");
        assert!((max - 1.0).abs() < 1e-4, "max saturation {max}");

        for (before, after) in palette.colors().iter().zip(stretched.colors()) {
            let (b, a) = (rgb_to_hsv(*before), rgb_to_hsv(*after));
            assert!((b.value - a.value).abs() < 1e-4);
        }
    }

    #[test]
    fn saturation_stretch_skips_flat_palette() {
        let grays = Palette::new(
            Rgbf::new(240.0, 240.0, 240.0),
            [Rgbf::new(20.0, 20.0, 20.0), Rgbf::new(90.0, 90.0, 90.0)],
        );
        assert_eq!(grays.saturated(), None);
    }
}
