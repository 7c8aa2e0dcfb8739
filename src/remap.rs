use crate::buffer::PixelBuffer;
use crate::color::{Rgbf, closest};
use crate::foreground::{ForegroundClassifier, Thresholds};
use crate::palette_builder::Palette;

/// Replace every pixel of `image` with a palette color.
///
/// Pixels classified as background against `original_background`, and
/// foreground pixels whose nearest palette entry is the background slot,
/// are painted `rendered_background`. Every other pixel takes its nearest
/// palette color.
pub fn render(
    image: &PixelBuffer,
    palette: &Palette,
    original_background: Rgbf,
    rendered_background: Rgbf,
    thresholds: Thresholds,
) -> PixelBuffer {
    let classifier = ForegroundClassifier::new(original_background, thresholds);
    let colors = palette.colors();

    let pixels = image
        .pixels()
        .iter()
        .map(|&p| {
            if !classifier.is_foreground(p) {
                return rendered_background;
            }
            match closest(p, colors) {
                0 => rendered_background,
                idx => colors[idx],
            }
        })
        .collect();

    PixelBuffer::from_raw_parts(image.width(), image.height(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: Thresholds = Thresholds {
        brightness: 0.25,
        saturation: 0.20,
    };

    fn buffer(pixels: &[Rgbf]) -> PixelBuffer {
        PixelBuffer::new(pixels.len() as u32, 1, pixels.to_vec()).unwrap()
    }

    #[test]
    fn background_pixels_take_rendered_color() {
        let bg = Rgbf::new(230.0, 230.0, 220.0);
        let palette = Palette::new(bg, [Rgbf::new(10.0, 10.0, 10.0)]);
        let image = buffer(&[Rgbf::new(228.0, 229.0, 221.0), Rgbf::new(15.0, 12.0, 9.0)]);

        let out = render(&image, &palette, bg, Rgbf::WHITE, THRESHOLDS);
        assert_eq!(out.pixels(), &[Rgbf::WHITE, Rgbf::new(10.0, 10.0, 10.0)]);
    }

    #[test]
    fn foreground_matching_background_slot_uses_rendered_color() {
        // Saturated palette entry 0 differs from the detected background.
        let bg = Rgbf::new(200.0, 200.0, 200.0);
        let palette = Palette::new(Rgbf::new(200.0, 150.0, 150.0), [Rgbf::new(0.0, 0.0, 255.0)]);
        let pinkish = Rgbf::new(200.0, 140.0, 140.0);

        let out = render(&buffer(&[pinkish]), &palette, bg, bg, THRESHOLDS);
        assert_eq!(out.pixels(), &[bg]);
    }

    #[test]
    fn output_keeps_dimensions() {
        let bg = Rgbf::new(240.0, 240.0, 240.0);
        let image = PixelBuffer::filled(7, 3, Rgbf::new(5.0, 5.0, 5.0));
        let palette = Palette::new(bg, [Rgbf::new(0.0, 0.0, 0.0), Rgbf::new(255.0, 0.0, 0.0)]);
        let out = render(&image, &palette, bg, bg, THRESHOLDS);
        assert_eq!((out.width(), out.height()), (7, 3));
        assert!(out.pixels().iter().all(|&c| c == Rgbf::BLACK));
    }
}
