// src/core/surface.rs
//
// Read-only pixel access for anything that can be sampled as a map.

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgba};

use super::traffic::color_code;

/// An image-like surface that yields `0xAARRGGBB` colour codes.
///
/// Callers of [`color_at`](ColorSurface::color_at) must stay inside
/// [`dimensions`](ColorSurface::dimensions); the detector checks bounds
/// before sampling.
pub trait ColorSurface {
    /// Width and height in pixels
    fn dimensions(&self) -> (u32, u32);

    fn color_at(&self, x: u32, y: u32) -> u32;

    fn contains(&self, x: u32, y: u32) -> bool {
        let (width, height) = self.dimensions();
        x < width && y < height
    }
}

impl<P, C> ColorSurface for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: std::ops::Deref<Target = [u8]>,
{
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn color_at(&self, x: u32, y: u32) -> u32 {
        color_code(self.get_pixel(x, y).to_rgba())
    }
}

impl ColorSurface for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn color_at(&self, x: u32, y: u32) -> u32 {
        color_code(self.get_pixel(x, y))
    }
}

impl<S: ColorSurface + ?Sized> ColorSurface for &S {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn color_at(&self, x: u32, y: u32) -> u32 {
        (**self).color_at(x, y)
    }
}

/// A single-colour surface, handy for probing one legend colour.
#[derive(Debug, Clone, Copy)]
pub struct SolidSurface {
    pub width: u32,
    pub height: u32,
    pub color: u32,
}

impl ColorSurface for SolidSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn color_at(&self, _x: u32, _y: u32) -> u32 {
        self.color
    }
}

/// Wrap raw RGBA bytes as a surface without copying.
pub fn rgba_view(width: u32, height: u32, bytes: &[u8]) -> Option<ImageBuffer<Rgba<u8>, &[u8]>> {
    ImageBuffer::from_raw(width, height, bytes)
}
