// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A `Sampler` answers "what hub-format (ARGB8888) color sits at source coordinate (x, y)?" for
//! the rotated and scaled+rotated primitives, which need the same inverse-mapping and bilinear
//! machinery whether the source is a texture or a single solid color.

use crate::convert::convert_pixels;
use crate::pixel_format::PixelFormat;
use crate::texture::Texture;

pub trait Sampler {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// The hub-format color at integer coordinate `(x, y)`, or `None` if outside the source
    /// extent.
    fn sample_nearest(&self, x: i32, y: i32) -> Option<[u8; 4]>;

    /// The hub-format color at fractional coordinate `(x, y)`, bilinearly interpolated from the
    /// four nearest integer source pixels. `None` if `(x, y)` is outside the source extent
    /// (high indices are clamped to `width - 1`/`height - 1` per the design, not rejected).
    fn sample_bilinear(&self, x: f32, y: f32) -> Option<[u8; 4]>;
}

/// Samples a [`Texture`], converting each fetched pixel to the hub format on demand.
pub struct TextureSampler<'t, 'a> {
    pub texture: &'t Texture<'a>,
}

impl<'t, 'a> TextureSampler<'t, 'a> {
    fn pixel_hub(&self, x: u32, y: u32) -> [u8; 4] {
        let bpp = self.texture.format().bytes_per_pixel();
        let row = self.texture.row(y);
        let start = x as usize * bpp;
        let mut hub = [0u8; 4];
        convert_pixels(self.texture.format(), PixelFormat::Argb8888, &row[start..start + bpp], &mut hub, 1);
        hub
    }
}

impl Sampler for TextureSampler<'_, '_> {
    fn width(&self) -> u32 {
        self.texture.width()
    }

    fn height(&self) -> u32 {
        self.texture.height()
    }

    fn sample_nearest(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return None;
        }
        Some(self.pixel_hub(x as u32, y as u32))
    }

    fn sample_bilinear(&self, x: f32, y: f32) -> Option<[u8; 4]> {
        if x < 0.0 || y < 0.0 || x >= self.width() as f32 || y >= self.height() as f32 {
            return None;
        }
        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width() - 1);
        let y1 = (y0 + 1).min(self.height() - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let p00 = self.pixel_hub(x0, y0);
        let p10 = self.pixel_hub(x1, y0);
        let p01 = self.pixel_hub(x0, y1);
        let p11 = self.pixel_hub(x1, y1);

        Some(bilinear_mix(p00, p10, p01, p11, fx, fy))
    }
}

/// Samples a single solid color across a `width x height` extent, as used by the rotated
/// rectangle primitive.
pub struct SolidColorSampler {
    pub width: u32,
    pub height: u32,
    pub hub: [u8; 4],
}

impl Sampler for SolidColorSampler {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn sample_nearest(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(self.hub)
    }

    fn sample_bilinear(&self, x: f32, y: f32) -> Option<[u8; 4]> {
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some(self.hub)
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

fn bilinear_mix(p00: [u8; 4], p10: [u8; 4], p01: [u8; 4], p11: [u8; 4], fx: f32, fy: f32) -> [u8; 4] {
    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = lerp_u8(p00[c], p10[c], fx);
        let bottom = lerp_u8(p01[c], p11[c], fx);
        out[c] = lerp_u8(top, bottom, fy);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_color_sampler_is_opaque_everywhere_inside_extent() {
        let sampler = SolidColorSampler { width: 4, height: 4, hub: [255, 10, 20, 30] };
        assert_eq!(sampler.sample_nearest(0, 0), Some([255, 10, 20, 30]));
        assert_eq!(sampler.sample_nearest(3, 3), Some([255, 10, 20, 30]));
        assert_eq!(sampler.sample_nearest(4, 0), None);
        assert_eq!(sampler.sample_nearest(-1, 0), None);
    }

    #[test]
    fn bilinear_mix_of_identical_corners_is_that_color() {
        let c = [255, 10, 20, 30];
        assert_eq!(bilinear_mix(c, c, c, c, 0.5, 0.5), c);
    }

    #[test]
    fn bilinear_mix_averages_opposite_corners_at_midpoint() {
        let black = [255, 0, 0, 0];
        let white = [255, 255, 255, 255];
        let mixed = bilinear_mix(black, white, black, white, 0.5, 0.0);
        assert_eq!(mixed[1], 128);
    }
}
