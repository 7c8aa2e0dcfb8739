use image::{DynamicImage, GenericImageView, RgbImage};

use crate::color::Rgbf;
use crate::error::ShrinkError;

/// A row-major buffer of opaque RGB pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgbf>,
}

impl PixelBuffer {
    /// Wrap `pixels`, checking that their count matches `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgbf>) -> Result<Self, ShrinkError> {
        if pixels.len() != width as usize * height as usize {
            return Err(ShrinkError::BufferSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_raw_parts(width: u32, height: u32, pixels: Vec<Rgbf>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A buffer of `width * height` pixels of a single color.
    pub fn filled(width: u32, height: u32, color: Rgbf) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgbf] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgbf> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied()
    }

    /// Encode into an 8-bit RGB image, clamping and rounding every channel.
    pub fn to_rgb_image(&self) -> Result<RgbImage, ShrinkError> {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|c| c.to_u8()).collect();
        RgbImage::from_raw(self.width, self.height, raw).ok_or(ShrinkError::BufferSize {
            width: self.width,
            height: self.height,
            len: self.pixels.len(),
        })
    }
}

impl From<&RgbImage> for PixelBuffer {
    fn from(img: &RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| Rgbf::from(p.0)).collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Alpha is dropped: every pixel is treated as opaque.
impl From<&DynamicImage> for PixelBuffer {
    fn from(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        let raw = img.to_rgb8().into_raw();
        let pixels = raw
            .chunks_exact(3)
            .map(|chunk| Rgbf::from([chunk[0], chunk[1], chunk[2]]))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}
