// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Row Blend Engine: per-pixel alpha compositing of a source row into a destination row,
//! with an optional solid-color tint and configurable blend factors/operation.
//!
//! Rather than the original's one specialized kernel per destination format (RGB24, RGB565, ...),
//! blending here is expressed once in terms of the ARGB8888 hub format: the source row is
//! converted to the hub, blended against the destination's own hub-converted pixels, and the
//! result is converted back. [`crate::convert`] already has to support every format pair through
//! the hub, so this reuses that instead of duplicating the per-format math eight times over. The
//! cost is an extra conversion per destination pixel; the primitives in [`crate::raster`] only
//! pay it on the pixels that actually need blending (solid fills and opaque fast paths skip it).
//!
//! One pair keeps its own path rather than going through the hub: RGB565 destination with a
//! GRAYSCALE8 source (see [`blend_row`]). Every other GRAYSCALE8 pair derives a binary alpha (Y
//! == 0 is transparent, anything else opaque) when converting to the hub, but this pair needs Y
//! itself as a continuous alpha/tint factor, matching the original's dedicated
//! `BlendGrayscale8ToRGB565` kernel.

use crate::color::Color;
use crate::convert::convert_pixels;
use crate::pixel_format::PixelFormat;

/// How much of the source and destination color contribute to the blended result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SourceAlpha,
    InverseSourceAlpha,
    DestAlpha,
    InverseDestAlpha,
    SourceColor,
    DestColor,
    InverseSourceColor,
    InverseDestColor,
}

/// How the weighted source and destination channels are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOperation {
    Add,
    Subtract,
    ReverseSubtract,
    BitwiseAnd,
}

/// The overall blending behavior for a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Overwrite the destination outright; source alpha is ignored except for transparent-pixel
    /// skipping (a grayscale value of 0, or an alpha-bearing format's alpha of 0, leaves the
    /// destination pixel untouched).
    #[default]
    NoBlend,
    /// Like [`BlendMode::NoBlend`], but the coloring tint (if enabled) is the only source of
    /// alpha: the source's own alpha is forced fully opaque before tinting.
    ColoringOnly,
    /// Blend using [`BlendContext::src_factor`], [`BlendContext::dst_factor`], and
    /// [`BlendContext::operation`].
    Simple,
    /// Per-channel multiply of source and destination, independent of factors/operation.
    Multiply,
}

/// A solid-color tint applied to every source pixel before blending, by multiplying each
/// channel (including alpha) by the tint's own channel, scaled to `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coloring {
    pub enabled: bool,
    pub color: Color,
}

impl Default for Coloring {
    fn default() -> Coloring {
        Coloring {
            enabled: false,
            color: Color::rgb(255, 255, 255),
        }
    }
}

/// The blend state a draw call runs under, set up via [`crate::context::RenderContext`]'s
/// `set_blend_*` methods and threaded down to [`blend_row`]/[`blend_solid_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendContext {
    pub mode: BlendMode,
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub operation: BlendOperation,
    pub coloring: Coloring,
}

impl Default for BlendContext {
    fn default() -> BlendContext {
        BlendContext {
            mode: BlendMode::NoBlend,
            src_factor: BlendFactor::SourceAlpha,
            dst_factor: BlendFactor::InverseSourceAlpha,
            operation: BlendOperation::Add,
            coloring: Coloring::default(),
        }
    }
}

fn mul8(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16) >> 8) as u8
}

fn resolve_factor(factor: BlendFactor, alpha: u8, dst_alpha: u8, src_channel: u8, dst_channel: u8) -> u8 {
    match factor {
        BlendFactor::Zero => 0,
        BlendFactor::One => 255,
        BlendFactor::SourceAlpha => alpha,
        BlendFactor::InverseSourceAlpha => 255 - alpha,
        BlendFactor::DestAlpha => dst_alpha,
        BlendFactor::InverseDestAlpha => 255 - dst_alpha,
        BlendFactor::SourceColor => src_channel,
        BlendFactor::DestColor => dst_channel,
        BlendFactor::InverseSourceColor => 255 - src_channel,
        BlendFactor::InverseDestColor => 255 - dst_channel,
    }
}

fn combine(op: BlendOperation, src: u8, src_factor: u8, dst: u8, dst_factor: u8) -> u8 {
    let s = src as i32 * src_factor as i32;
    let d = dst as i32 * dst_factor as i32;
    let raw = match op {
        BlendOperation::Add => s + d,
        BlendOperation::Subtract => s - d,
        BlendOperation::ReverseSubtract => d - s,
        BlendOperation::BitwiseAnd => s & d,
    };
    (raw >> 8).clamp(0, 255) as u8
}

/// Tints and blends a single hub-format (ARGB8888) source pixel into `dst_pixel`, a
/// `dst_fmt.bytes_per_pixel()`-byte slice holding one pixel in its native format.
pub(crate) fn blend_pixel(dst_fmt: PixelFormat, dst_pixel: &mut [u8], hub_src: [u8; 4], ctx: &BlendContext) {
    let [mut a, mut r, mut g, mut b] = hub_src;

    if matches!(ctx.mode, BlendMode::NoBlend | BlendMode::ColoringOnly) {
        a = 255;
    }

    if ctx.coloring.enabled {
        let tint = ctx.coloring.color;
        r = mul8(r, tint.red());
        g = mul8(g, tint.green());
        b = mul8(b, tint.blue());
        a = mul8(a, tint.alpha());
    }

    if a == 0 {
        return;
    }

    if a == 255 && !matches!(ctx.mode, BlendMode::Multiply) {
        convert_pixels(PixelFormat::Argb8888, dst_fmt, &[a, r, g, b], dst_pixel, 1);
        return;
    }

    let mut dst_hub = [0u8; 4];
    convert_pixels(dst_fmt, PixelFormat::Argb8888, dst_pixel, &mut dst_hub, 1);
    let [da, dr, dg, db] = dst_hub;

    let blended = match ctx.mode {
        BlendMode::Multiply => [a.max(da), mul8(r, dr), mul8(g, dg), mul8(b, db)],
        _ => {
            let sf = |src_chan, dst_chan| resolve_factor(ctx.src_factor, a, da, src_chan, dst_chan);
            let df = |src_chan, dst_chan| resolve_factor(ctx.dst_factor, a, da, src_chan, dst_chan);
            let out_r = combine(ctx.operation, r, sf(r, dr), dr, df(r, dr));
            let out_g = combine(ctx.operation, g, sf(g, dg), dg, df(g, dg));
            let out_b = combine(ctx.operation, b, sf(b, db), db, df(b, db));
            let out_a = a.saturating_add(mul8(da, 255 - a));
            [out_a, out_r, out_g, out_b]
        }
    };

    convert_pixels(PixelFormat::Argb8888, dst_fmt, &blended, dst_pixel, 1);
}

/// Blends `count` pixels of `src_row` (in `src_fmt`) into `dst_row` (in `dst_fmt`), under `ctx`.
///
/// RGB565 destination with a GRAYSCALE8 source is a required specialization: rather than
/// converting the source to the hub (which would binarize Y into a 0/255 alpha, like every other
/// GRAYSCALE8 pair), Y is fed to [`blend_pixel`] directly as a continuous alpha/tint factor, so a
/// mid-gray source blends roughly half-and-half with the destination instead of fully overwriting
/// it.
pub fn blend_row(
    dst_fmt: PixelFormat,
    dst_row: &mut [u8],
    src_fmt: PixelFormat,
    src_row: &[u8],
    count: usize,
    ctx: &BlendContext,
) {
    if count == 0 {
        return;
    }
    let dst_bpp = dst_fmt.bytes_per_pixel();

    if src_fmt == PixelFormat::Grayscale8 && dst_fmt == PixelFormat::Rgb565 {
        for i in 0..count {
            let gray = src_row[i];
            let hub_src = [gray, gray, gray, gray];
            blend_pixel(dst_fmt, &mut dst_row[i * dst_bpp..(i + 1) * dst_bpp], hub_src, ctx);
        }
        return;
    }

    let mut hub = vec![0u8; count * 4];
    convert_pixels(src_fmt, PixelFormat::Argb8888, src_row, &mut hub, count);
    for i in 0..count {
        let hub_src = [hub[i * 4], hub[i * 4 + 1], hub[i * 4 + 2], hub[i * 4 + 3]];
        blend_pixel(dst_fmt, &mut dst_row[i * dst_bpp..(i + 1) * dst_bpp], hub_src, ctx);
    }
}

/// Blends a single solid `color` across `count` destination pixels, as used by flat-fill
/// primitives ([`crate::raster`]'s rect and line drawing). Equivalent to calling [`blend_row`]
/// with a source row that repeats `color` everywhere, without materializing one.
pub fn blend_solid_row(dst_fmt: PixelFormat, dst_row: &mut [u8], count: usize, color: Color, ctx: &BlendContext) {
    let hub_src = [color.alpha(), color.red(), color.green(), color.blue()];
    let dst_bpp = dst_fmt.bytes_per_pixel();
    for i in 0..count {
        blend_pixel(dst_fmt, &mut dst_row[i * dst_bpp..(i + 1) * dst_bpp], hub_src, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_solid_color_leaves_destination_untouched() {
        let mut dst = [10u8, 20, 30];
        let ctx = BlendContext {
            mode: BlendMode::Simple,
            ..Default::default()
        };
        blend_solid_row(PixelFormat::Rgb24, &mut dst, 1, Color::rgba(1, 2, 3, 0), &ctx);
        assert_eq!(dst, [10, 20, 30]);
    }

    #[test]
    fn opaque_solid_color_overwrites_destination() {
        let mut dst = [10u8, 20, 30];
        let ctx = BlendContext::default();
        blend_solid_row(PixelFormat::Rgb24, &mut dst, 1, Color::rgb(1, 2, 3), &ctx);
        assert_eq!(dst, [1, 2, 3]);
    }

    #[test]
    fn half_alpha_source_alpha_blend_mixes_toward_destination() {
        let mut dst = [0u8, 0, 0];
        let ctx = BlendContext {
            mode: BlendMode::Simple,
            src_factor: BlendFactor::SourceAlpha,
            dst_factor: BlendFactor::InverseSourceAlpha,
            operation: BlendOperation::Add,
            coloring: Coloring::default(),
        };
        blend_solid_row(PixelFormat::Rgb24, &mut dst, 1, Color::rgba(200, 0, 0, 128), &ctx);
        // 200 * 128 / 256 ~= 100, destination contributes roughly (255-128)=127 worth of 0.
        assert!(dst[0] > 50 && dst[0] < 150);
    }

    #[test]
    fn coloring_tint_scales_source_channels() {
        let mut dst = [0u8, 0, 0];
        let ctx = BlendContext {
            coloring: Coloring {
                enabled: true,
                color: Color::rgb(128, 128, 128),
            },
            ..Default::default()
        };
        blend_solid_row(PixelFormat::Rgb24, &mut dst, 1, Color::rgb(255, 255, 255), &ctx);
        assert_eq!(dst, [128, 128, 128]);
    }

    #[test]
    fn multiply_mode_darkens_toward_destination() {
        let mut dst = [200u8, 200, 200];
        let ctx = BlendContext {
            mode: BlendMode::Multiply,
            ..Default::default()
        };
        blend_solid_row(PixelFormat::Rgb24, &mut dst, 1, Color::rgb(128, 128, 128), &ctx);
        assert_eq!(dst, [100, 100, 100]);
    }

    #[test]
    fn grayscale_zero_is_transparent_when_blending_a_row() {
        let mut dst = [5u8, 6, 7, 8];
        let src = [0u8, 255];
        let ctx = BlendContext {
            mode: BlendMode::Simple,
            ..Default::default()
        };
        blend_row(PixelFormat::Grayscale8, &mut dst[0..1], PixelFormat::Grayscale8, &src[0..1], 1, &ctx);
        assert_eq!(dst[0], 5);
    }

    #[test]
    fn coloring_only_mode_keeps_a_translucent_tint_translucent() {
        let mut dst = [0u8, 0, 0];
        let ctx = BlendContext {
            mode: BlendMode::ColoringOnly,
            coloring: Coloring {
                enabled: true,
                color: Color::rgba(255, 255, 255, 128),
            },
            ..Default::default()
        };
        blend_solid_row(PixelFormat::Rgb24, &mut dst, 1, Color::rgb(255, 255, 255), &ctx);
        // The tint's alpha (128) should scale the draw roughly half-way toward the destination,
        // not be clobbered back to fully opaque by the COLORINGONLY alpha-forcing step.
        assert!(dst[0] > 50 && dst[0] < 200, "got {dst:?}");
    }

    #[test]
    fn grayscale8_to_rgb565_mid_gray_is_a_partial_blend_not_an_overwrite() {
        let mut dst = [0u8, 0]; // RGB565 black
        let src = [128u8];
        let ctx = BlendContext {
            mode: BlendMode::Simple,
            src_factor: BlendFactor::SourceAlpha,
            dst_factor: BlendFactor::InverseSourceAlpha,
            operation: BlendOperation::Add,
            coloring: Coloring::default(),
        };
        blend_row(PixelFormat::Rgb565, &mut dst, PixelFormat::Grayscale8, &src, 1, &ctx);
        assert_ne!(dst, [0, 0], "a mid-gray source should move the destination off black");

        let mut overwritten = [0u8, 0];
        let full_src = [255u8];
        blend_row(PixelFormat::Rgb565, &mut overwritten, PixelFormat::Grayscale8, &full_src, 1, &ctx);
        assert_ne!(dst, overwritten, "Y=128 must blend differently than Y=255's full overwrite");
    }
}
