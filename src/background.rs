use std::collections::HashMap;

use crate::color::Rgbf;

/// Channel precision used when looking for the page background.
pub const BACKGROUND_BITS: u8 = 6;

/// Reduce each channel of `c` to its top `bits` bits and re-center it in
/// its bin. `bits` is clamped to `1..=8`.
pub fn quantize(c: Rgbf, bits: u8) -> [u8; 3] {
    let shift = 8 - bits.clamp(1, 8);
    let half_bin = (1u8 << shift) >> 1;
    let q = |v: f32| {
        let v = v.clamp(0.0, 255.0) as u8;
        ((v >> shift) << shift) + half_bin
    };
    [q(c.red), q(c.green), q(c.blue)]
}

#[inline(always)]
fn pack([r, g, b]: [u8; 3]) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline(always)]
fn unpack(key: u32) -> Rgbf {
    Rgbf::from([(key >> 16) as u8, (key >> 8) as u8, key as u8])
}

/// Most frequent quantized color among `samples`.
///
/// Ties are resolved in favor of the color that appears first in `samples`.
/// Returns `None` for an empty slice.
pub fn find_background_color(samples: &[Rgbf], bits: u8) -> Option<Rgbf> {
    // key -> (count, first position)
    let mut counts: HashMap<u32, (usize, usize)> = HashMap::new();
    for (pos, &c) in samples.iter().enumerate() {
        counts.entry(pack(quantize(c, bits))).or_insert((0, pos)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (ca, pa)), (_, (cb, pb))| ca.cmp(cb).then(pb.cmp(pa)))
        .map(|(key, _)| unpack(key))
}
