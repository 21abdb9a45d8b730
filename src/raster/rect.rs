// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clear and solid-rectangle fills.

use crate::blend::{blend_solid_row, BlendMode};
use crate::color::Color;
use crate::context::RenderContext;

use super::geometry::intersect;

/// Fills the entire target with `color`, ignoring the clip rectangle (a clear always covers the
/// whole target).
pub fn clear_target(ctx: &mut RenderContext<'_>, color: Color) {
    let Some(target) = ctx.require_target() else { return };
    let format = target.format();
    let width = target.width();
    let height = target.height();
    if width == 0 || height == 0 {
        return;
    }
    let bpp = format.bytes_per_pixel();
    let mut row = vec![0u8; width as usize * bpp];
    color.convert_to(format, &mut row[0..bpp]);
    for i in 1..width as usize {
        row.copy_within(0..bpp, i * bpp);
    }
    for y in 0..height {
        target.row_mut(y).copy_from_slice(&row);
    }
}

/// Fills `[x, x+length) x [y, y+height)`, clipped to the target and (if enabled) the clip
/// rectangle, with `color` under the context's current blend state.
pub fn draw_rect(ctx: &mut RenderContext<'_>, color: Color, x: i32, y: i32, length: u32, height: u32) {
    if length == 0 || height == 0 {
        return;
    }
    let clip = if ctx.clipping_enabled() { Some(ctx.get_clipping_area()) } else { None };
    let Some(target) = ctx.require_target() else { return };
    let rect = intersect(x, y, length, height, target.width(), target.height(), clip);
    if rect.is_empty() {
        return;
    }

    let format = target.format();
    let bpp = format.bytes_per_pixel();
    let opaque = color.alpha() == 255 || ctx.get_blend_mode() == BlendMode::NoBlend;

    if opaque {
        let mut row = vec![0u8; rect.width as usize * bpp];
        color.convert_to(format, &mut row[0..bpp]);
        for i in 1..rect.width as usize {
            row.copy_within(0..bpp, i * bpp);
        }
        let target = ctx.get_target_texture_mut().expect("target checked above");
        for dy in rect.y..rect.y + rect.height as i32 {
            let dst_row = target.row_mut(dy as u32);
            let start = rect.x as usize * bpp;
            dst_row[start..start + row.len()].copy_from_slice(&row);
        }
        return;
    }

    let blend_ctx = *ctx.blend_context();
    let target = ctx.get_target_texture_mut().expect("target checked above");
    for dy in rect.y..rect.y + rect.height as i32 {
        let dst_row = target.row_mut(dy as u32);
        let start = rect.x as usize * bpp;
        let end = start + rect.width as usize * bpp;
        blend_solid_row(format, &mut dst_row[start..end], rect.width as usize, color, &blend_ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;
    use crate::texture::Texture;

    #[test]
    fn scenario_s1_clear() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(4, 2, PixelFormat::Rgb24));
        clear_target(&mut ctx, Color::rgb(0x12, 0x34, 0x56));
        let data = ctx.get_target_texture().unwrap().data();
        assert!(data.chunks(3).all(|px| px == [0x12, 0x34, 0x56]));
    }

    #[test]
    fn scenario_s4_clip() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(10, 10, PixelFormat::Rgb24));
        ctx.set_clipping(crate::context::ClipRect { x: 2, y: 2, width: 3, height: 3 });
        ctx.enable_clipping(true);
        draw_rect(&mut ctx, Color::rgb(255, 0, 0), 0, 0, 100, 100);
        let target = ctx.get_target_texture().unwrap();
        for yy in 0..10u32 {
            for xx in 0..10u32 {
                let px = &target.row(yy)[xx as usize * 3..xx as usize * 3 + 3];
                let in_box = (2..5).contains(&xx) && (2..5).contains(&yy);
                if in_box {
                    assert_eq!(px, [255, 0, 0]);
                } else {
                    assert_eq!(px, [0, 0, 0]);
                }
            }
        }
    }

    #[test]
    fn rect_with_no_target_is_a_silent_no_op() {
        let mut ctx = RenderContext::new();
        draw_rect(&mut ctx, Color::rgb(1, 2, 3), 0, 0, 10, 10);
    }

    #[test]
    fn negative_position_shrinks_extent_instead_of_panicking() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(4, 4, PixelFormat::Rgb24));
        draw_rect(&mut ctx, Color::rgb(9, 9, 9), -2, -2, 4, 4);
        let target = ctx.get_target_texture().unwrap();
        assert_eq!(&target.row(0)[0..6], &[9, 9, 9, 9, 9, 9]);
    }
}
