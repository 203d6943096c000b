//! The working raster and upsampling it onto display bounds.

/*
Upsampling
==========

The field is computed at `bounds / dot_scale` resolution. Hosts stretch it
back to the display size in one of two ways:

NEAREST (retro mode)
    Every display pixel takes the color of the field pixel it falls in.
    Dots stay crisp squares, the chunky look.

SMOOTH
    Bilinear interpolation between the four nearest field pixel centers,
    per channel (alpha included). Dots melt into a soft shimmer.

Display pixel (x, y) samples the field at its center:

    fx = (x + 0.5) * src_w / dst_w - 0.5

and nearest picks floor((x + 0.5) * src_w / dst_w), clamped to the edge.
*/

use crate::color::Argb;

/// How a raster is stretched onto larger bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sampling {
    #[default]
    Nearest,
    Smooth,
}

impl Sampling {
    /// Retro mode means nearest-neighbor.
    pub fn from_retro_mode(retro_mode: bool) -> Self {
        if retro_mode {
            Sampling::Nearest
        } else {
            Sampling::Smooth
        }
    }
}

/// A row-major ARGB pixel buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Raster {
    /// A transparent black raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the raster.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Argb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Argb(self.pixels[y * self.width + x]))
    }

    /// Overwrite all pixels. `pixels` must match the raster size.
    pub(crate) fn copy_from(&mut self, pixels: &[u32]) {
        self.pixels.copy_from_slice(pixels);
    }

    /// Stretch this raster to `dst_width` x `dst_height` into `out`.
    ///
    /// `out` is resized as needed; an empty source yields an empty output.
    pub fn upsample_into(
        &self,
        dst_width: usize,
        dst_height: usize,
        sampling: Sampling,
        out: &mut Vec<u32>,
    ) {
        out.clear();
        if self.is_empty() || dst_width == 0 || dst_height == 0 {
            return;
        }
        out.reserve(dst_width * dst_height);

        let scale_x = self.width as f32 / dst_width as f32;
        let scale_y = self.height as f32 / dst_height as f32;

        match sampling {
            Sampling::Nearest => {
                for y in 0..dst_height {
                    let sy = nearest(y, scale_y, self.height);
                    let row = &self.pixels[sy * self.width..(sy + 1) * self.width];
                    out.extend((0..dst_width).map(|x| row[nearest(x, scale_x, self.width)]));
                }
            }
            Sampling::Smooth => {
                for y in 0..dst_height {
                    let (y0, y1, ty) = bilinear_axis(y, scale_y, self.height);
                    for x in 0..dst_width {
                        let (x0, x1, tx) = bilinear_axis(x, scale_x, self.width);
                        let top = lerp_argb(
                            self.pixels[y0 * self.width + x0],
                            self.pixels[y0 * self.width + x1],
                            tx,
                        );
                        let bottom = lerp_argb(
                            self.pixels[y1 * self.width + x0],
                            self.pixels[y1 * self.width + x1],
                            tx,
                        );
                        out.push(lerp_argb(top, bottom, ty));
                    }
                }
            }
        }
    }

    /// Allocating convenience over [`Raster::upsample_into`].
    pub fn upsample(&self, dst_width: usize, dst_height: usize, sampling: Sampling) -> Vec<u32> {
        let mut out = Vec::new();
        self.upsample_into(dst_width, dst_height, sampling, &mut out);
        out
    }
}

#[inline]
fn nearest(dst: usize, scale: f32, len: usize) -> usize {
    (((dst as f32 + 0.5) * scale) as usize).min(len - 1)
}

#[inline]
fn bilinear_axis(dst: usize, scale: f32, len: usize) -> (usize, usize, f32) {
    let pos = ((dst as f32 + 0.5) * scale - 0.5).max(0.0);
    let i0 = (pos as usize).min(len - 1);
    let i1 = (i0 + 1).min(len - 1);
    (i0, i1, pos - i0 as f32)
}

#[inline]
fn lerp_argb(a: u32, b: u32, t: f32) -> u32 {
    if a == b || t <= 0.0 {
        return a;
    }
    let mut out = 0u32;
    for shift in [24u32, 16, 8, 0] {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        let c = (ca + (cb - ca) * t.min(1.0)).round().clamp(0.0, 255.0) as u32;
        out |= c << shift;
    }
    out
}
