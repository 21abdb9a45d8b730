// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bresenham line drawing, pre-clipped against the active clip rectangle.

use crate::blend::{blend_solid_row, BlendMode};
use crate::color::Color;
use crate::context::{ClipRect, RenderContext};

use super::geometry::cohen_sutherland_clip;
use super::rect::draw_rect;

/// Draws a line from `(x0, y0)` to `(x1, y1)` with `color`. Horizontal and vertical lines
/// delegate to [`draw_rect`] for a single 1-pixel-wide row/column; everything else is a standard
/// integer Bresenham walk, pre-clipped with Cohen-Sutherland against the current clip rectangle
/// (or the full target if clipping is disabled).
pub fn draw_line(ctx: &mut RenderContext<'_>, color: Color, x0: i32, y0: i32, x1: i32, y1: i32) {
    if x0 == x1 && y0 == y1 {
        draw_rect(ctx, color, x0, y0, 1, 1);
        return;
    }
    if y0 == y1 {
        let (lo, hi) = (x0.min(x1), x0.max(x1));
        draw_rect(ctx, color, lo, y0, (hi - lo) as u32 + 1, 1);
        return;
    }
    if x0 == x1 {
        let (lo, hi) = (y0.min(y1), y0.max(y1));
        draw_rect(ctx, color, x0, lo, 1, (hi - lo) as u32 + 1);
        return;
    }

    let Some(target_extent) = ctx.get_target_texture().map(|t| (t.width(), t.height())) else { return };
    let clip = if ctx.clipping_enabled() {
        ctx.get_clipping_area()
    } else {
        ClipRect { x: 0, y: 0, width: target_extent.0, height: target_extent.1 }
    };

    let Some((cx0, cy0, cx1, cy1)) = cohen_sutherland_clip(x0 as i64, y0 as i64, x1 as i64, y1 as i64, clip) else {
        return;
    };

    let (mut x0, mut y0, x1, y1) = (cx0 as i32, cy0 as i32, cx1 as i32, cy1 as i32);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let blend_mode = ctx.get_blend_mode();
    let alpha_is_full = color.alpha() == 255 || blend_mode == BlendMode::NoBlend;

    loop {
        plot_point(ctx, color, x0, y0, alpha_is_full);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn plot_point(ctx: &mut RenderContext<'_>, color: Color, x: i32, y: i32, opaque: bool) {
    let Some(target) = ctx.get_target_texture_mut() else { return };
    if x < 0 || y < 0 || x as u32 >= target.width() || y as u32 >= target.height() {
        return;
    }
    let format = target.format();
    let bpp = format.bytes_per_pixel();
    let row = target.row_mut(y as u32);
    let start = x as usize * bpp;

    if opaque {
        color.convert_to(format, &mut row[start..start + bpp]);
        return;
    }

    let blend_ctx = *ctx.blend_context();
    let target = ctx.get_target_texture_mut().expect("checked above");
    let row = target.row_mut(y as u32);
    blend_solid_row(format, &mut row[start..start + bpp], 1, color, &blend_ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;
    use crate::texture::Texture;

    #[test]
    fn horizontal_line_fills_a_single_row() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(5, 3, PixelFormat::Rgb24));
        draw_line(&mut ctx, Color::rgb(1, 2, 3), 0, 1, 4, 1);
        let target = ctx.get_target_texture().unwrap();
        assert!(target.row(1).chunks(3).all(|px| px == [1, 2, 3]));
        assert!(target.row(0).iter().all(|&b| b == 0));
    }

    #[test]
    fn diagonal_line_touches_expected_endpoints() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(5, 5, PixelFormat::Rgb24));
        draw_line(&mut ctx, Color::rgb(9, 9, 9), 0, 0, 4, 4);
        let target = ctx.get_target_texture().unwrap();
        assert_eq!(&target.row(0)[0..3], &[9, 9, 9]);
        assert_eq!(&target.row(4)[12..15], &[9, 9, 9]);
    }

    #[test]
    fn line_outside_clip_rect_is_not_drawn() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(10, 10, PixelFormat::Rgb24));
        ctx.set_clipping(ClipRect { x: 0, y: 0, width: 2, height: 2 });
        ctx.enable_clipping(true);
        draw_line(&mut ctx, Color::rgb(1, 1, 1), 5, 5, 9, 9);
        let target = ctx.get_target_texture().unwrap();
        assert!(target.data().iter().all(|&b| b == 0));
    }
}
