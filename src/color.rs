// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A format-tagged color value, always stored internally as ARGB8888 and converted on demand.

use crate::convert::convert_pixels;
use crate::pixel_format::PixelFormat;

/// A 4-byte color value tagged with a format.
///
/// Internally a `Color` always stores its four bytes in ARGB8888 order (the hub format); the
/// `format` tag just remembers what the caller originally meant so that [`Color::bytes_in`] and
/// [`Color::convert_to`] know how to reinterpret them when asked for a different encoding than
/// the one it was constructed from. This mirrors the original `Color` class, which stores up to
/// 4 raw bytes plus a format tag and re-derives every other encoding from them on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    format: PixelFormat,
    argb: [u8; 4],
}

impl Color {
    /// Builds an opaque color from 8-bit R, G, B components. Alpha is implicitly 255.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color {
            format: PixelFormat::Argb8888,
            argb: [255, r, g, b],
        }
    }

    /// Builds a color from 8-bit R, G, B, A components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color {
            format: PixelFormat::Argb8888,
            argb: [a, r, g, b],
        }
    }

    /// Builds a grayscale color, replicating `value` across every channel.
    pub const fn grayscale(value: u8) -> Color {
        Color {
            format: PixelFormat::Grayscale8,
            argb: [if value == 0 { 0 } else { 255 }, value, value, value],
        }
    }

    /// The format this color was originally constructed with.
    pub const fn format(self) -> PixelFormat {
        self.format
    }

    pub const fn alpha(self) -> u8 {
        self.argb[0]
    }

    pub const fn red(self) -> u8 {
        self.argb[1]
    }

    pub const fn green(self) -> u8 {
        self.argb[2]
    }

    pub const fn blue(self) -> u8 {
        self.argb[3]
    }

    /// Converts this color to `target` format, writing `target.bytes_per_pixel()` bytes into
    /// `out`. Delegates to the same row-kernel dispatch the [`crate::convert`] module uses for
    /// bulk pixel runs, run here over a single pixel.
    pub fn convert_to(self, target: PixelFormat, out: &mut [u8]) {
        convert_pixels(PixelFormat::Argb8888, target, &self.argb, out, 1);
    }

    /// Convenience wrapper around [`Color::convert_to`] that allocates the output buffer.
    pub fn bytes_in(self, target: PixelFormat) -> Vec<u8> {
        let mut out = vec![0u8; target.bytes_per_pixel()];
        self.convert_to(target, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_constructor_forces_opaque() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.alpha(), 255);
        assert_eq!((c.red(), c.green(), c.blue()), (0x12, 0x34, 0x56));
    }

    #[test]
    fn grayscale_zero_is_transparent() {
        let black = Color::grayscale(0);
        assert_eq!(black.alpha(), 0);
        let white = Color::grayscale(255);
        assert_eq!(white.alpha(), 255);
    }

    #[test]
    fn converts_to_rgb24() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        let bytes = c.bytes_in(PixelFormat::Rgb24);
        assert_eq!(bytes, vec![0x12, 0x34, 0x56]);
    }
}
