use crate::error::NtscError;
use crate::types::{RgbPixel, YuvSample};

/// Bytes per pixel in a packed rgb framebuffer.
const BYTES_PER_PIXEL: usize = 3;

/// The fixed size of a simulated screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
}

impl Geometry {
    /// The Apple II double hi-res screen, with every scanline doubled.
    pub const DOUBLE_HI_RES: Geometry = Geometry { width: 560, height: 384 };

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of pixels on the screen.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Check a framebuffer has exactly this geometry.
    pub fn validate(&self, framebuffer: &Framebuffer) -> Result<(), NtscError> {
        let actual = framebuffer.geometry();
        if actual != *self {
            return Err(NtscError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (actual.width, actual.height),
            });
        }
        Ok(())
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::DOUBLE_HI_RES
    }
}

/// An owned, packed 8-bit rgb framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    geometry: Geometry,
    pixel_buffer: Vec<u8>,
}

impl Framebuffer {
    /// Create a framebuffer initialized to black.
    pub fn new(geometry: Geometry) -> Self {
        Self::filled(geometry, (0, 0, 0))
    }

    /// Create a framebuffer with every pixel set to the same color.
    pub fn filled(geometry: Geometry, (r, g, b): RgbPixel) -> Self {
        let pixel_buffer = [r, g, b].repeat(geometry.pixel_count());
        Self { geometry, pixel_buffer }
    }

    /// Wrap a packed rgb buffer, e.g. one obtained from `image::RgbImage::into_raw`.
    pub fn from_raw(width: usize, height: usize, pixel_buffer: Vec<u8>) -> Result<Self, NtscError> {
        let geometry = Geometry::new(width, height);
        let expected = geometry.pixel_count() * BYTES_PER_PIXEL;
        if pixel_buffer.len() != expected {
            return Err(NtscError::BufferSize { expected, actual: pixel_buffer.len() });
        }
        Ok(Self { geometry, pixel_buffer })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width
    }

    pub fn height(&self) -> usize {
        self.geometry.height
    }

    /// Read the pixel at (x, y). Panics when out of bounds, like slice indexing.
    pub fn get(&self, x: usize, y: usize) -> RgbPixel {
        let idx = self.index(x, y);
        let pixel = &self.pixel_buffer[idx..idx + BYTES_PER_PIXEL];
        (pixel[0], pixel[1], pixel[2])
    }

    pub fn set(&mut self, x: usize, y: usize, (r, g, b): RgbPixel) {
        let idx = self.index(x, y);
        self.pixel_buffer[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&[r, g, b]);
    }

    /// Iterate scanlines as packed rgb slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixel_buffer.chunks_exact(self.row_len())
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.pixel_buffer
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixel_buffer
    }

    /// Length of one packed scanline in bytes. Never 0 so it's safe to chunk by.
    pub(crate) fn row_len(&self) -> usize {
        self.geometry.width.max(1) * BYTES_PER_PIXEL
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixel_buffer
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.geometry.width && y < self.geometry.height,
            "pixel ({}, {}) out of bounds",
            x,
            y
        );
        (y * self.geometry.width + x) * BYTES_PER_PIXEL
    }
}

/// The intermediate image of luma and modulated chroma samples.
#[derive(Debug, Clone, PartialEq)]
pub struct YuvImage {
    geometry: Geometry,
    samples: Vec<YuvSample>,
}

impl YuvImage {
    /// Create an image with every sample zeroed.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            samples: vec![(0.0, 0.0, 0.0); geometry.pixel_count()],
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width
    }

    pub fn height(&self) -> usize {
        self.geometry.height
    }

    pub fn get(&self, x: usize, y: usize) -> YuvSample {
        self.row(y)[x]
    }

    pub fn set(&mut self, x: usize, y: usize, sample: YuvSample) {
        let width = self.geometry.width;
        assert!(x < width, "column {} out of bounds", x);
        self.samples[y * width + x] = sample;
    }

    /// A single scanline.
    pub fn row(&self, y: usize) -> &[YuvSample] {
        let width = self.geometry.width;
        &self.samples[y * width..(y + 1) * width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[YuvSample]> {
        self.samples.chunks_exact(self.row_len())
    }

    pub(crate) fn row_len(&self) -> usize {
        self.geometry.width.max(1)
    }

    pub(crate) fn samples(&self) -> &[YuvSample] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [YuvSample] {
        &mut self.samples
    }
}
