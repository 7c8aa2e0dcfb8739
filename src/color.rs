use palette::Srgb;

/// An RGB color with floating point channels in `0.0..=255.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgbf {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Rgbf {
    pub const BLACK: Rgbf = Rgbf::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgbf = Rgbf::new(255.0, 255.0, 255.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub fn channels(self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }

    /// Round each channel half-up to the nearest integer.
    pub fn rounded(self) -> Self {
        let round = |v: f32| (v + 0.5).floor();
        Self::new(round(self.red), round(self.green), round(self.blue))
    }

    /// Clamp to the displayable range and round to 8-bit channels.
    pub fn to_u8(self) -> [u8; 3] {
        let quantize = |v: f32| v.clamp(0.0, 255.0).round() as u8;
        [quantize(self.red), quantize(self.green), quantize(self.blue)]
    }

    pub fn to_hex(self) -> String {
        let c: Srgb<u8> = self.into();
        format!("{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
    }
}

impl From<[u8; 3]> for Rgbf {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgbf::new(r as f32, g as f32, b as f32)
    }
}

impl From<Srgb<u8>> for Rgbf {
    fn from(c: Srgb<u8>) -> Self {
        Rgbf::from([c.red, c.green, c.blue])
    }
}

impl From<Rgbf> for Srgb<u8> {
    fn from(c: Rgbf) -> Self {
        let [r, g, b] = c.to_u8();
        Srgb::new(r, g, b)
    }
}

impl std::ops::Add for Rgbf {
    type Output = Rgbf;

    fn add(self, rhs: Rgbf) -> Rgbf {
        Rgbf::new(self.red + rhs.red, self.green + rhs.green, self.blue + rhs.blue)
    }
}

impl std::ops::Mul<f32> for Rgbf {
    type Output = Rgbf;

    fn mul(self, scalar: f32) -> Rgbf {
        Rgbf::new(self.red * scalar, self.green * scalar, self.blue * scalar)
    }
}

/// Hue, saturation and value, each in `0.0..=1.0`. Hue is circular and
/// expressed as a fraction of a turn rather than degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

/// Convert an RGB color to HSV. Returned hue lies in `[0, 1)`.
pub fn rgb_to_hsv(c: Rgbf) -> Hsv {
    let r = c.red / 255.0;
    let g = c.green / 255.0;
    let b = c.blue / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut hue = 0.0;
    if delta > 0.0 {
        hue = if max == r {
            let h = (g - b) / delta;
            if h < 0.0 { h + 6.0 } else { h }
        } else if max == g {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };
    }
    hue /= 6.0;
    // (g - b) / delta + 6.0 can round up to exactly 6.0 in f32
    if hue >= 1.0 {
        hue -= 1.0;
    }

    let saturation = if max > 0.0 { delta / max } else { delta };

    Hsv {
        hue,
        saturation,
        value: max,
    }
}

/// Convert HSV back to RGB using the six-sector formula with
/// `sector = floor(hue * 6)`.
///
/// A hue of exactly `1.0` falls in sector 6, which has no entry in the
/// table and yields the achromatic color `(v, v, v)`. Palette seeding relies
/// on this to place its last seed at white.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgbf {
    let Hsv {
        hue,
        saturation: s,
        value: v,
    } = hsv;
    let (mut r, mut g, mut b) = (v, v, v);

    if s > 0.0 {
        let h = hue * 6.0;
        let sector = h.floor();
        let f = h - sector;
        match sector as i32 {
            0 => {
                g *= 1.0 - s * (1.0 - f);
                b *= 1.0 - s;
            }
            1 => {
                r *= 1.0 - s * f;
                b *= 1.0 - s;
            }
            2 => {
                r *= 1.0 - s;
                b *= 1.0 - s * (1.0 - f);
            }
            3 => {
                r *= 1.0 - s;
                g *= 1.0 - s * f;
            }
            4 => {
                r *= 1.0 - s * (1.0 - f);
                g *= 1.0 - s;
            }
            5 => {
                g *= 1.0 - s;
                b *= 1.0 - s * f;
            }
            _ => {}
        }
    }

    Rgbf::new(r * 255.0, g * 255.0, b * 255.0)
}

#[inline(always)]
pub fn squared_distance(a: Rgbf, b: Rgbf) -> f32 {
    let dr = a.red - b.red;
    let dg = a.green - b.green;
    let db = a.blue - b.blue;
    dr * dr + dg * dg + db * db
}

/// Index of the color in `candidates` closest to `p` by squared RGB
/// distance. Ties go to the lowest index; an empty slice yields 0.
pub fn closest(p: Rgbf, candidates: &[Rgbf]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f32::INFINITY;
    for (idx, &c) in candidates.iter().enumerate() {
        let dist = squared_distance(p, c);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}
