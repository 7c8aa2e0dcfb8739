//! Shrink scanned or photographed notes to a small palette.
//!
//! The page background is found as the most common quantized color among a
//! random sample of pixels, ink is separated from it by HSV thresholds, and
//! the ink colors are clustered with hue-seeded k-means. Every pixel is then
//! replaced by the nearest palette color, with background optionally forced
//! to white.

use image::ImageFormat;
use js_sys::{Array, Object, Reflect, Uint8Array};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

pub mod background;
pub mod buffer;
pub mod color;
pub mod error;
pub mod foreground;
pub mod kmeans;
pub mod options;
pub mod palette_builder;
pub mod pipeline;
pub mod remap;
pub mod sample;

pub use buffer::PixelBuffer;
pub use color::{Hsv, Rgbf, hsv_to_rgb, rgb_to_hsv};
pub use error::ShrinkError;
pub use options::ShrinkOptions;
pub use palette_builder::Palette;
pub use pipeline::{PalettePlan, Shrunk, plan_palette, shrink, shrink_with_rng};

/// Shrink an encoded image and return `{ image, palette }`, where `image` is
/// PNG bytes and `palette` the hex colors that can appear in it, background
/// first. Unset options fall back to their defaults; a `seed` makes the
/// result reproducible.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn noteshrink(
    input: Vec<u8>,
    num_colors: Option<u32>,
    sample_fraction: Option<f32>,
    brightness_threshold: Option<f32>,
    saturation_threshold: Option<f32>,
    saturate: Option<bool>,
    white_background: Option<bool>,
    kmeans_max_iter: Option<u32>,
    seed: Option<u64>,
) -> Result<Object, JsValue> {
    let options = options_or_default(
        num_colors,
        sample_fraction,
        brightness_threshold,
        saturation_threshold,
        saturate,
        white_background,
        kmeans_max_iter,
    );

    let (png, palette_hex) =
        shrink_bytes(&input, &options, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let img_js = Uint8Array::from(png.as_slice());
    let palette_js = Array::new();
    for hex in palette_hex {
        palette_js.push(&JsValue::from_str(&hex));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &img_js)?;
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;

    Ok(result)
}

fn options_or_default(
    num_colors: Option<u32>,
    sample_fraction: Option<f32>,
    brightness_threshold: Option<f32>,
    saturation_threshold: Option<f32>,
    saturate: Option<bool>,
    white_background: Option<bool>,
    kmeans_max_iter: Option<u32>,
) -> ShrinkOptions {
    let defaults = ShrinkOptions::default();
    ShrinkOptions {
        num_colors: num_colors.map_or(defaults.num_colors, |n| n as usize),
        sample_fraction: sample_fraction.unwrap_or(defaults.sample_fraction),
        brightness_threshold: brightness_threshold.unwrap_or(defaults.brightness_threshold),
        saturation_threshold: saturation_threshold.unwrap_or(defaults.saturation_threshold),
        saturate: saturate.unwrap_or(defaults.saturate),
        white_background: white_background.unwrap_or(defaults.white_background),
        kmeans_max_iter: kmeans_max_iter.map_or(defaults.kmeans_max_iter, |n| n as usize),
    }
}

fn sampling_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Decode `input`, shrink it and encode the result as PNG.
///
/// Returns the PNG bytes and the rendered palette as uppercase hex strings.
/// A `seed` makes pixel sampling, and therefore the output, reproducible.
pub fn shrink_bytes(
    input: &[u8],
    options: &ShrinkOptions,
    seed: Option<u64>,
) -> Result<(Vec<u8>, Vec<String>), ShrinkError> {
    let img = image::load_from_memory(input)?;
    let shrunk = shrink_with_rng(&PixelBuffer::from(&img), options, &mut sampling_rng(seed))?;

    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        shrunk
            .image
            .to_rgb_image()?
            .write_to(&mut cursor, ImageFormat::Png)?;
    }

    let palette_hex = shrunk.rendered_palette().iter().map(|c| c.to_hex()).collect();
    Ok((buf, palette_hex))
}

/// Decode `input` and return only the palette `shrink_bytes` would render with.
pub fn extract_palette_bytes(
    input: &[u8],
    options: &ShrinkOptions,
    seed: Option<u64>,
) -> Result<Vec<String>, ShrinkError> {
    let img = image::load_from_memory(input)?;
    let plan = plan_palette(&PixelBuffer::from(&img), options, &mut sampling_rng(seed))?;
    Ok(plan.rendered_colors().iter().map(|c| c.to_hex()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_binding_options_use_defaults() {
        let options = options_or_default(None, None, None, None, None, None, None);
        assert_eq!(options, ShrinkOptions::default());
    }

    #[test]
    fn binding_options_override_every_field() {
        let options = options_or_default(
            Some(4),
            Some(0.5),
            Some(0.3),
            Some(0.1),
            Some(false),
            Some(false),
            Some(7),
        );
        assert_eq!(
            options,
            ShrinkOptions {
                sample_fraction: 0.5,
                brightness_threshold: 0.3,
                saturation_threshold: 0.1,
                num_colors: 4,
                kmeans_max_iter: 7,
                saturate: false,
                white_background: false,
            }
        );
    }
}
