// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Pixel Converter: a complete N×N conversion matrix between [`PixelFormat`]s.
//!
//! Every format converts to and from ARGB8888, the hub format. Pairs that matter on a hot
//! rasterization path (see the module doc on [`crate::blend`] and the primitives in
//! [`crate::raster`]) additionally get a direct kernel so the common cases don't pay for two
//! conversions. Anything else is synthesized at call time by composing `src -> ARGB8888 -> dst`,
//! which is always available since the hub pairs are mandatory.
//!
//! A kernel is a plain function pointer over `(src, dst, count)`, matching the original design's
//! function-table dispatch; [`direct_kernel`] is a static list of `(src_fmt, dst_fmt, kernel)`
//! tuples, expressed as a match rather than a literal table since the format set is small and
//! closed.

use log::warn;

use crate::pixel_format::PixelFormat;

/// A row conversion kernel: transforms exactly `count` contiguous pixels from `src` (in the
/// kernel's fixed source format) into `dst` (in its fixed destination format). No clipping, no
/// blending — that's [`crate::blend`]'s job.
pub type ConvertKernel = fn(src: &[u8], dst: &mut [u8], count: usize);

/// Converts `count` pixels from `src_fmt` to `dst_fmt`.
///
/// If `src_fmt == dst_fmt` this is a straight copy. If no direct kernel is registered for the
/// pair, the conversion is synthesized by composing the pair's kernels with the hub format
/// (ARGB8888). Every format has a mandatory direct kernel to and from the hub, so this always
/// succeeds; a failure to find even the hub path would mean a required kernel was never
/// registered, which is logged and turns into a no-op (no destination bytes are touched) rather
/// than a panic.
pub fn convert_pixels(src_fmt: PixelFormat, dst_fmt: PixelFormat, src: &[u8], dst: &mut [u8], count: usize) {
    if src_fmt == dst_fmt {
        let len = count * src_fmt.bytes_per_pixel();
        dst[..len].copy_from_slice(&src[..len]);
        return;
    }

    if let Some(kernel) = direct_kernel(src_fmt, dst_fmt) {
        kernel(src, dst, count);
        return;
    }

    let (Some(to_hub), Some(from_hub)) = (
        direct_kernel(src_fmt, PixelFormat::Argb8888),
        direct_kernel(PixelFormat::Argb8888, dst_fmt),
    ) else {
        warn!("no conversion path registered for {src_fmt:?} -> {dst_fmt:?}; draw skipped");
        return;
    };

    let mut hub = vec![0u8; count * PixelFormat::Argb8888.bytes_per_pixel()];
    to_hub(src, &mut hub, count);
    from_hub(&hub, dst, count);
}

/// Looks up a directly-registered kernel for `(src_fmt, dst_fmt)`, or `None` if the pair must be
/// synthesized through the hub format by [`convert_pixels`].
pub fn direct_kernel(src_fmt: PixelFormat, dst_fmt: PixelFormat) -> Option<ConvertKernel> {
    use PixelFormat::*;
    let kernel: ConvertKernel = match (src_fmt, dst_fmt) {
        (Rgb24, Bgr24) => kernels::rgb24_to_bgr24,
        (Bgr24, Rgb24) => kernels::bgr24_to_rgb24,
        (Rgb24, Argb8888) => kernels::rgb24_to_argb8888,
        (Bgr24, Argb8888) => kernels::bgr24_to_argb8888,
        (Argb8888, Rgb24) => kernels::argb8888_to_rgb24,
        (Argb8888, Bgr24) => kernels::argb8888_to_bgr24,
        (Rgb24, Rgba8888) => kernels::rgb24_to_rgba8888,
        (Bgr24, Rgba8888) => kernels::bgr24_to_rgba8888,
        (Rgba8888, Rgb24) => kernels::rgba8888_to_rgb24,
        (Rgba8888, Bgr24) => kernels::rgba8888_to_bgr24,
        (Argb8888, Rgba8888) => kernels::argb8888_to_rgba8888,
        (Rgba8888, Argb8888) => kernels::rgba8888_to_argb8888,
        (Rgb24, Rgb565) => kernels::rgb24_to_rgb565,
        (Bgr24, Rgb565) => kernels::bgr24_to_rgb565,
        (Rgb565, Rgb24) => kernels::rgb565_to_rgb24,
        (Rgb565, Bgr24) => kernels::rgb565_to_bgr24,
        (Rgb565, Argb8888) => kernels::rgb565_to_argb8888,
        (Argb8888, Rgb565) => kernels::argb8888_to_rgb565,
        (Rgba8888, Rgb565) => kernels::rgba8888_to_rgb565,
        (Rgb565, Rgba8888) => kernels::rgb565_to_rgba8888,
        (Argb1555, Argb8888) => kernels::argb1555_to_argb8888,
        (Argb8888, Argb1555) => kernels::argb8888_to_argb1555,
        (Argb1555, Rgb24) => kernels::argb1555_to_rgb24,
        (Argb1555, Bgr24) => kernels::argb1555_to_bgr24,
        (Argb1555, Rgba8888) => kernels::argb1555_to_rgba8888,
        (Rgba4444, Argb8888) => kernels::rgba4444_to_argb8888,
        (Argb8888, Rgba4444) => kernels::argb8888_to_rgba4444,
        (Rgba4444, Rgba8888) => kernels::rgba4444_to_rgba8888,
        (Grayscale8, Argb8888) => kernels::grayscale8_to_argb8888,
        (Grayscale8, Rgb24) => kernels::grayscale8_to_rgb24,
        (Grayscale8, Bgr24) => kernels::grayscale8_to_bgr24,
        (Grayscale8, Rgb565) => kernels::grayscale8_to_rgb565,
        (Argb8888, Grayscale8) => kernels::argb8888_to_grayscale8,
        (Rgb24, Grayscale8) => kernels::rgb24_to_grayscale8,
        (Rgb565, Grayscale8) => kernels::rgb565_to_grayscale8,
        _ => return None,
    };
    Some(kernel)
}

mod kernels {
    use crate::pixel_format::{expand_bits, narrow_bits};

    pub(super) fn rgb24_to_bgr24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 3] = src[i * 3 + 2];
            dst[i * 3 + 1] = src[i * 3 + 1];
            dst[i * 3 + 2] = src[i * 3];
        }
    }

    pub(super) fn bgr24_to_rgb24(src: &[u8], dst: &mut [u8], count: usize) {
        rgb24_to_bgr24(src, dst, count)
    }

    pub(super) fn rgb24_to_argb8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 4] = 255;
            dst[i * 4 + 1] = src[i * 3];
            dst[i * 4 + 2] = src[i * 3 + 1];
            // The original has a known out-of-bounds bug here (`src[i*3+3]`); the blue channel
            // of an RGB24 pixel is at offset 2.
            dst[i * 4 + 3] = src[i * 3 + 2];
        }
    }

    pub(super) fn bgr24_to_argb8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 4] = 255;
            dst[i * 4 + 1] = src[i * 3 + 2];
            dst[i * 4 + 2] = src[i * 3 + 1];
            dst[i * 4 + 3] = src[i * 3];
        }
    }

    pub(super) fn argb8888_to_rgb24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 3] = src[i * 4 + 1];
            dst[i * 3 + 1] = src[i * 4 + 2];
            dst[i * 3 + 2] = src[i * 4 + 3];
        }
    }

    pub(super) fn argb8888_to_bgr24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 3] = src[i * 4 + 3];
            dst[i * 3 + 1] = src[i * 4 + 2];
            dst[i * 3 + 2] = src[i * 4 + 1];
        }
    }

    pub(super) fn rgb24_to_rgba8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 4] = src[i * 3];
            dst[i * 4 + 1] = src[i * 3 + 1];
            dst[i * 4 + 2] = src[i * 3 + 2];
            dst[i * 4 + 3] = 255;
        }
    }

    pub(super) fn bgr24_to_rgba8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 4] = src[i * 3 + 2];
            dst[i * 4 + 1] = src[i * 3 + 1];
            dst[i * 4 + 2] = src[i * 3];
            dst[i * 4 + 3] = 255;
        }
    }

    pub(super) fn rgba8888_to_rgb24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 3] = src[i * 4];
            dst[i * 3 + 1] = src[i * 4 + 1];
            dst[i * 3 + 2] = src[i * 4 + 2];
        }
    }

    pub(super) fn rgba8888_to_bgr24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 3] = src[i * 4 + 2];
            dst[i * 3 + 1] = src[i * 4 + 1];
            dst[i * 3 + 2] = src[i * 4];
        }
    }

    /// Fixes the original's bug, which wrote alpha one byte past the pixel. The correct mapping
    /// is `dst[0]=src[3]; dst[1]=src[0]; dst[2]=src[1]; dst[3]=src[2]`.
    pub(super) fn rgba8888_to_argb8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 4] = src[i * 4 + 3];
            dst[i * 4 + 1] = src[i * 4];
            dst[i * 4 + 2] = src[i * 4 + 1];
            dst[i * 4 + 3] = src[i * 4 + 2];
        }
    }

    pub(super) fn argb8888_to_rgba8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 4] = src[i * 4 + 1];
            dst[i * 4 + 1] = src[i * 4 + 2];
            dst[i * 4 + 2] = src[i * 4 + 3];
            dst[i * 4 + 3] = src[i * 4];
        }
    }

    fn pack_rgb565(r8: u8, g8: u8, b8: u8) -> u16 {
        let r5 = narrow_bits(r8, 5) as u16;
        let g6 = narrow_bits(g8, 6) as u16;
        let b5 = narrow_bits(b8, 5) as u16;
        (r5 << 11) | (g6 << 5) | b5
    }

    fn unpack_rgb565(pixel: u16) -> (u8, u8, u8) {
        let r5 = ((pixel >> 11) & 0x1F) as u8;
        let g6 = ((pixel >> 5) & 0x3F) as u8;
        let b5 = (pixel & 0x1F) as u8;
        (expand_bits(r5, 5), expand_bits(g6, 6), expand_bits(b5, 5))
    }

    pub(super) fn rgb24_to_rgb565(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let rgb565 = pack_rgb565(src[i * 3], src[i * 3 + 1], src[i * 3 + 2]);
            dst[i * 2..i * 2 + 2].copy_from_slice(&rgb565.to_le_bytes());
        }
    }

    pub(super) fn bgr24_to_rgb565(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let rgb565 = pack_rgb565(src[i * 3 + 2], src[i * 3 + 1], src[i * 3]);
            dst[i * 2..i * 2 + 2].copy_from_slice(&rgb565.to_le_bytes());
        }
    }

    pub(super) fn rgb565_to_rgb24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            let (r, g, b) = unpack_rgb565(pixel);
            dst[i * 3] = r;
            dst[i * 3 + 1] = g;
            dst[i * 3 + 2] = b;
        }
    }

    pub(super) fn rgb565_to_bgr24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            let (r, g, b) = unpack_rgb565(pixel);
            dst[i * 3] = b;
            dst[i * 3 + 1] = g;
            dst[i * 3 + 2] = r;
        }
    }

    pub(super) fn rgb565_to_argb8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            let (r, g, b) = unpack_rgb565(pixel);
            dst[i * 4] = 255;
            dst[i * 4 + 1] = r;
            dst[i * 4 + 2] = g;
            dst[i * 4 + 3] = b;
        }
    }

    pub(super) fn argb8888_to_rgb565(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let rgb565 = pack_rgb565(src[i * 4 + 1], src[i * 4 + 2], src[i * 4 + 3]);
            dst[i * 2..i * 2 + 2].copy_from_slice(&rgb565.to_le_bytes());
        }
    }

    pub(super) fn rgba8888_to_rgb565(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let rgb565 = pack_rgb565(src[i * 4], src[i * 4 + 1], src[i * 4 + 2]);
            dst[i * 2..i * 2 + 2].copy_from_slice(&rgb565.to_le_bytes());
        }
    }

    pub(super) fn rgb565_to_rgba8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            let (r, g, b) = unpack_rgb565(pixel);
            dst[i * 4] = r;
            dst[i * 4 + 1] = g;
            dst[i * 4 + 2] = b;
            dst[i * 4 + 3] = 255;
        }
    }

    pub(super) fn argb1555_to_argb8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            let a = if pixel & 0x8000 != 0 { 255 } else { 0 };
            let r = expand_bits(((pixel >> 10) & 0x1F) as u8, 5);
            let g = expand_bits(((pixel >> 5) & 0x1F) as u8, 5);
            let b = expand_bits((pixel & 0x1F) as u8, 5);
            dst[i * 4] = a;
            dst[i * 4 + 1] = r;
            dst[i * 4 + 2] = g;
            dst[i * 4 + 3] = b;
        }
    }

    pub(super) fn argb8888_to_argb1555(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let a = if src[i * 4] >= 128 { 0x8000u16 } else { 0 };
            let r = narrow_bits(src[i * 4 + 1], 5) as u16;
            let g = narrow_bits(src[i * 4 + 2], 5) as u16;
            let b = narrow_bits(src[i * 4 + 3], 5) as u16;
            let pixel = a | (r << 10) | (g << 5) | b;
            dst[i * 2..i * 2 + 2].copy_from_slice(&pixel.to_le_bytes());
        }
    }

    pub(super) fn argb1555_to_rgb24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            dst[i * 3] = expand_bits(((pixel >> 10) & 0x1F) as u8, 5);
            dst[i * 3 + 1] = expand_bits(((pixel >> 5) & 0x1F) as u8, 5);
            dst[i * 3 + 2] = expand_bits((pixel & 0x1F) as u8, 5);
        }
    }

    pub(super) fn argb1555_to_bgr24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            dst[i * 3] = expand_bits((pixel & 0x1F) as u8, 5);
            dst[i * 3 + 1] = expand_bits(((pixel >> 5) & 0x1F) as u8, 5);
            dst[i * 3 + 2] = expand_bits(((pixel >> 10) & 0x1F) as u8, 5);
        }
    }

    pub(super) fn argb1555_to_rgba8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            dst[i * 4] = expand_bits(((pixel >> 10) & 0x1F) as u8, 5);
            dst[i * 4 + 1] = expand_bits(((pixel >> 5) & 0x1F) as u8, 5);
            dst[i * 4 + 2] = expand_bits((pixel & 0x1F) as u8, 5);
            dst[i * 4 + 3] = if pixel & 0x8000 != 0 { 255 } else { 0 };
        }
    }

    pub(super) fn rgba4444_to_argb8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            dst[i * 4] = expand_bits((pixel & 0xF) as u8, 4);
            dst[i * 4 + 1] = expand_bits(((pixel >> 12) & 0xF) as u8, 4);
            dst[i * 4 + 2] = expand_bits(((pixel >> 8) & 0xF) as u8, 4);
            dst[i * 4 + 3] = expand_bits(((pixel >> 4) & 0xF) as u8, 4);
        }
    }

    pub(super) fn argb8888_to_rgba4444(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let r = narrow_bits(src[i * 4 + 1], 4) as u16;
            let g = narrow_bits(src[i * 4 + 2], 4) as u16;
            let b = narrow_bits(src[i * 4 + 3], 4) as u16;
            let a = narrow_bits(src[i * 4], 4) as u16;
            let pixel = (r << 12) | (g << 8) | (b << 4) | a;
            dst[i * 2..i * 2 + 2].copy_from_slice(&pixel.to_le_bytes());
        }
    }

    pub(super) fn rgba4444_to_rgba8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            dst[i * 4] = expand_bits(((pixel >> 12) & 0xF) as u8, 4);
            dst[i * 4 + 1] = expand_bits(((pixel >> 8) & 0xF) as u8, 4);
            dst[i * 4 + 2] = expand_bits(((pixel >> 4) & 0xF) as u8, 4);
            dst[i * 4 + 3] = expand_bits((pixel & 0xF) as u8, 4);
        }
    }

    fn luma(r: u8, g: u8, b: u8) -> u8 {
        (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
    }

    pub(super) fn argb8888_to_grayscale8(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i] = luma(src[i * 4 + 1], src[i * 4 + 2], src[i * 4 + 3]);
        }
    }

    pub(super) fn rgb24_to_grayscale8(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i] = luma(src[i * 3], src[i * 3 + 1], src[i * 3 + 2]);
        }
    }

    pub(super) fn rgb565_to_grayscale8(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let pixel = u16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
            let (r, g, b) = unpack_rgb565(pixel);
            dst[i] = luma(r, g, b);
        }
    }

    pub(super) fn grayscale8_to_argb8888(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let gray = src[i];
            dst[i * 4] = if gray == 0 { 0 } else { 255 };
            dst[i * 4 + 1] = gray;
            dst[i * 4 + 2] = gray;
            dst[i * 4 + 3] = gray;
        }
    }

    pub(super) fn grayscale8_to_rgb24(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            dst[i * 3] = src[i];
            dst[i * 3 + 1] = src[i];
            dst[i * 3 + 2] = src[i];
        }
    }

    pub(super) fn grayscale8_to_bgr24(src: &[u8], dst: &mut [u8], count: usize) {
        grayscale8_to_rgb24(src, dst, count)
    }

    pub(super) fn grayscale8_to_rgb565(src: &[u8], dst: &mut [u8], count: usize) {
        for i in 0..count {
            let gray = src[i];
            let rgb565 = pack_rgb565(gray, gray, gray);
            dst[i * 2..i * 2 + 2].copy_from_slice(&rgb565.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::ALL_FORMATS;

    #[test]
    fn scenario_s2_converted_copy() {
        // 2x1 RGBA8888 -> RGB24, NOBLEND semantics (a plain conversion).
        let src = [0xFF, 0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0x80];
        let mut dst = [0u8; 6];
        convert_pixels(PixelFormat::Rgba8888, PixelFormat::Rgb24, &src, &mut dst, 2);
        assert_eq!(dst, [0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00]);
    }

    #[test]
    fn identity_conversion_is_a_copy() {
        let src = [1, 2, 3, 4];
        let mut dst = [0u8; 4];
        convert_pixels(PixelFormat::Argb8888, PixelFormat::Argb8888, &src, &mut dst, 1);
        assert_eq!(dst, src);
    }

    #[test]
    fn round_trip_through_argb8888_for_every_opaque_format() {
        // RGB24/BGR24/RGB565 have no precision loss beyond their own channel depth, so a
        // round trip through ARGB8888 (forcing alpha=255, which these formats don't carry
        // anyway) must reproduce the source exactly once quantized to the format's own depth.
        for &fmt in &[PixelFormat::Rgb24, PixelFormat::Bgr24] {
            let original = [0x10u8, 0x80, 0xF0];
            let mut hub = [0u8; 4];
            convert_pixels(fmt, PixelFormat::Argb8888, &original, &mut hub, 1);
            let mut back = [0u8; 3];
            convert_pixels(PixelFormat::Argb8888, fmt, &hub, &mut back, 1);
            assert_eq!(back, original);
        }
    }

    #[test]
    fn every_format_round_trips_through_argb8888_grossly() {
        // Not a byte-exact round trip for the lossy packed formats, but every pair must at
        // least be reachable without panicking, and converting through the hub and back must
        // not blow up in amplitude (every component stays within the representable range,
        // which is trivially true for u8, so this mainly guards against panics/index errors).
        for &fmt in ALL_FORMATS.iter() {
            let bpp = fmt.bytes_per_pixel();
            let src = vec![0xABu8; bpp];
            let mut hub = [0u8; 4];
            convert_pixels(fmt, PixelFormat::Argb8888, &src, &mut hub, 1);
            let mut back = vec![0u8; bpp];
            convert_pixels(PixelFormat::Argb8888, fmt, &hub, &mut back, 1);
        }
    }

    #[test]
    fn full_matrix_has_a_path_for_every_pair() {
        for &src in ALL_FORMATS.iter() {
            for &dst in ALL_FORMATS.iter() {
                let input = vec![0x55u8; src.bytes_per_pixel() * 2];
                let mut output = vec![0u8; dst.bytes_per_pixel() * 2];
                convert_pixels(src, dst, &input, &mut output, 2);
                // every byte must have been written (no kernel leaves the buffer as-is when
                // the input wasn't already all zero, except where a genuine zero channel is
                // expected); the stronger guarantee is just "didn't panic", checked by reaching
                // this line.
                let _ = output;
            }
        }
    }
}
