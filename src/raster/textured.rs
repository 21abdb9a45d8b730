// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned textured rectangle: draws a texture's full extent at an integer destination
//! offset, with no rotation or scaling.

use crate::blend::BlendMode;
use crate::context::RenderContext;
use crate::texture::Texture;

use super::geometry::intersect;

/// Draws `source`'s full extent into the target at `(x, y)`.
///
/// A source format with no alpha channel always takes a straight per-row conversion (NOBLEND),
/// regardless of the configured blend mode: there is no per-pixel alpha to test or tint, so
/// coloring and blend factors have nothing to act on. Otherwise each destination row is handed to
/// the context's blend kernel ([`crate::context::RenderContext::blend_func`]) together with the
/// *unconverted* source row; the blender does its own format normalization.
pub fn draw_texture(ctx: &mut RenderContext<'_>, source: &Texture<'_>, x: i32, y: i32) {
    let clip = if ctx.clipping_enabled() { Some(ctx.get_clipping_area()) } else { None };
    let Some(target) = ctx.require_target() else { return };
    let rect = intersect(x, y, source.width(), source.height(), target.width(), target.height(), clip);
    if rect.is_empty() {
        return;
    }

    let src_x0 = (rect.x - x) as u32;
    let src_y0 = (rect.y - y) as u32;
    let dst_format = target.format();
    let src_format = source.format();

    // A source format with no alpha channel has nothing for the blend engine to test or tint
    // per pixel, so it always takes the straight row-conversion path regardless of the
    // configured blend mode — matching the original's `subBlend = hasAlpha ? blendMode :
    // NOBLEND` downgrade. GRAYSCALE8 has no explicit alpha channel (its alpha is derived, not
    // stored) so it downgrades the same way.
    let use_noblend = !src_format.has_alpha();

    if use_noblend {
        let dst_bpp = dst_format.bytes_per_pixel();
        let target = ctx.get_target_texture_mut().expect("checked above");
        for row_offset in 0..rect.height {
            let src_row = source.row(src_y0 + row_offset);
            let src_bpp = src_format.bytes_per_pixel();
            let src_slice = &src_row[src_x0 as usize * src_bpp..(src_x0 as usize + rect.width as usize) * src_bpp];
            let dst_row = target.row_mut(rect.y as u32 + row_offset);
            let dst_start = rect.x as usize * dst_bpp;
            let dst_slice = &mut dst_row[dst_start..dst_start + rect.width as usize * dst_bpp];
            crate::convert::convert_pixels(src_format, dst_format, src_slice, dst_slice, rect.width as usize);
        }
        return;
    }

    let blend_ctx = *ctx.blend_context();
    let blend_func = ctx.blend_func();
    let target = ctx.get_target_texture_mut().expect("checked above");
    for row_offset in 0..rect.height {
        let src_row = source.row(src_y0 + row_offset);
        let src_bpp = src_format.bytes_per_pixel();
        let src_slice = &src_row[src_x0 as usize * src_bpp..(src_x0 as usize + rect.width as usize) * src_bpp];
        let dst_row = target.row_mut(rect.y as u32 + row_offset);
        let dst_bpp = dst_format.bytes_per_pixel();
        let dst_start = rect.x as usize * dst_bpp;
        let dst_slice = &mut dst_row[dst_start..dst_start + rect.width as usize * dst_bpp];
        blend_func(dst_format, dst_slice, src_format, src_slice, rect.width as usize, &blend_ctx);
    }
}
