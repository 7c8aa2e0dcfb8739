use rand::Rng;
use rand::seq::SliceRandom;

use crate::color::Rgbf;

/// Number of samples drawn for `num_pixels` pixels: `floor(num_pixels * fraction)`,
/// but never fewer than one for a non-empty image.
pub fn sample_count(num_pixels: usize, fraction: f32) -> usize {
    if num_pixels == 0 {
        return 0;
    }
    let n = (num_pixels as f32 * fraction) as usize;
    n.clamp(1, num_pixels)
}

/// Draw a uniform random subset of `pixels` without replacement.
///
/// Shuffles a permutation of pixel indices and keeps its prefix, so no pixel
/// is sampled twice. The source slice is left untouched.
pub fn sample_pixels<R: Rng + ?Sized>(pixels: &[Rgbf], fraction: f32, rng: &mut R) -> Vec<Rgbf> {
    let count = sample_count(pixels.len(), fraction);
    let mut indices: Vec<usize> = (0..pixels.len()).collect();
    indices.shuffle(rng);
    indices[..count].iter().map(|&i| pixels[i]).collect()
}
