use crate::{color::Rgb, renderer::Surface};

/// Offscreen RGB8 image produced by the renderer.
///
/// Pixels are arranged in row-major order with the origin at the top-left,
/// three bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
    pub default_foreground: Rgb,
}

impl Raster {
    /// Creates a black raster whose default foreground is black.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width.saturating_mul(height).saturating_mul(3);
        Self {
            width,
            height,
            pixels: vec![0; len],
            default_foreground: Rgb::BLACK,
        }
    }

    pub fn with_default_foreground(mut self, color: Rgb) -> Self {
        self.default_foreground = color;
        self
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        let idx = self.index(x, y)?;
        Some(Rgb::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
        ))
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * 3)
    }

    /// Converts into an `image` buffer for encoding.
    #[cfg(feature = "image")]
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(
            u32::try_from(self.width).ok()?,
            u32::try_from(self.height).ok()?,
            self.pixels.clone(),
        )
    }
}

impl Surface for Raster {
    fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    fn default_foreground(&self) -> Rgb {
        self.default_foreground
    }

    fn fill(&mut self, color: Rgb) {
        for pixel in self.pixels.chunks_exact_mut(3) {
            pixel.copy_from_slice(&color.channels());
        }
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgb, coverage: u8) {
        if coverage == 0 {
            return;
        }
        let Some(idx) = self.index(x, y) else {
            return;
        };

        let alpha = coverage as u16;
        for (dst, src) in self.pixels[idx..idx + 3].iter_mut().zip(color.channels()) {
            let mixed = (src as u16 * alpha + *dst as u16 * (255 - alpha) + 127) / 255;
            *dst = mixed as u8;
        }
    }
}
