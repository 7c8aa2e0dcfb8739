use rand::Rng;

use crate::buffer::PixelBuffer;
use crate::color::Rgbf;
use crate::error::ShrinkError;
use crate::options::ShrinkOptions;
use crate::palette_builder::{Palette, build_palette, thresholds};
use crate::remap::render;
use crate::sample::sample_pixels;

/// Palette chosen for an image, ready for remapping.
#[derive(Clone, Debug)]
pub struct PalettePlan {
    /// Palette used for remapping, after optional saturation stretching.
    pub palette: Palette,
    /// Background detected in the samples; the classification reference.
    pub background: Rgbf,
    /// Color painted for background pixels.
    pub rendered_background: Rgbf,
}

impl PalettePlan {
    /// The colors that can appear in the output image, background first.
    pub fn rendered_colors(&self) -> Vec<Rgbf> {
        let mut colors = self.palette.colors().to_vec();
        colors[0] = self.rendered_background;
        colors
    }
}

/// Result of a full [`shrink_with_rng`] run.
#[derive(Clone, Debug)]
pub struct Shrunk {
    /// Remapped image, same dimensions as the input.
    pub image: PixelBuffer,
    pub plan: PalettePlan,
}

impl Shrunk {
    pub fn rendered_palette(&self) -> Vec<Rgbf> {
        self.plan.rendered_colors()
    }
}

/// Reduce `input` to a small palette using the thread-local random source
/// for sampling. `None` selects [`ShrinkOptions::default`].
pub fn shrink(input: &PixelBuffer, options: Option<&ShrinkOptions>) -> Result<PixelBuffer, ShrinkError> {
    let defaults = ShrinkOptions::default();
    let options = options.unwrap_or(&defaults);
    Ok(shrink_with_rng(input, options, &mut rand::rng())?.image)
}

/// Reduce `input` to a small palette, drawing samples from `rng`.
pub fn shrink_with_rng<R: Rng + ?Sized>(
    input: &PixelBuffer,
    options: &ShrinkOptions,
    rng: &mut R,
) -> Result<Shrunk, ShrinkError> {
    let plan = plan_palette(input, options, rng)?;
    let image = render(
        input,
        &plan.palette,
        plan.background,
        plan.rendered_background,
        thresholds(options),
    );

    tracing::debug!(
        width = input.width(),
        height = input.height(),
        colors = plan.palette.len(),
        "Remapped image"
    );

    Ok(Shrunk { image, plan })
}

/// Sample `input`, build its palette and apply the post-processing switches
/// of `options`, without touching the full image.
pub fn plan_palette<R: Rng + ?Sized>(
    input: &PixelBuffer,
    options: &ShrinkOptions,
    rng: &mut R,
) -> Result<PalettePlan, ShrinkError> {
    options.validate()?;
    if input.is_empty() {
        return Err(ShrinkError::EmptyImage);
    }

    let samples = sample_pixels(input.pixels(), options.sample_fraction, rng);
    let palette = build_palette(&samples, options)?;
    let background = palette.background();

    let palette = if options.saturate {
        palette.saturated().unwrap_or_else(|| {
            tracing::debug!("Palette saturation is flat, skipping stretch");
            palette
        })
    } else {
        palette
    };

    let rendered_background = if options.white_background {
        Rgbf::WHITE
    } else {
        background
    };

    Ok(PalettePlan {
        palette,
        background,
        rendered_background,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_invalid_options_before_sampling() {
        let image = PixelBuffer::filled(2, 2, Rgbf::WHITE);
        let options = ShrinkOptions {
            num_colors: 0,
            ..Default::default()
        };
        let err = shrink(&image, Some(&options)).unwrap_err();
        assert!(matches!(err, ShrinkError::InvalidNumColors(0)));
    }

    #[test]
    fn rejects_empty_image() {
        let image = PixelBuffer::filled(0, 5, Rgbf::WHITE);
        assert!(matches!(shrink(&image, None), Err(ShrinkError::EmptyImage)));
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let paper = Rgbf::new(222.0, 210.0, 190.0);
        let image = PixelBuffer::filled(10, 10, paper);
        let mut rng = StdRng::seed_from_u64(9);
        let shrunk = shrink_with_rng(&image, &ShrinkOptions::default(), &mut rng).unwrap();
        assert!(shrunk.image.pixels().iter().all(|&c| c == Rgbf::WHITE));
        assert_eq!(shrunk.rendered_palette()[0], Rgbf::WHITE);
        assert_eq!(shrunk.plan.palette.len(), 8);
    }
}
