// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rotated rectangle and textured-rectangle drawing via destination-space inverse mapping.
//!
//! A rotated solid rectangle and a rotated texture are the same problem once the "what color is
//! at source coordinate (x, y)" question is abstracted behind [`Sampler`]: walk the rotated
//! quad's destination-space bounding box, invert the rotation to find the source coordinate for
//! each destination pixel, and sample. Exact multiples of 90 degrees with no pivot offset get a
//! dedicated fast path that remaps row-major without trigonometry, so [90/180/270]-degree
//! rotations are bit-exact rather than subject to float rounding (see the testable property on
//! 90-degree rotation exactness).

use crate::color::Color;
use crate::context::RenderContext;
use crate::texture::Texture;

use super::geometry::intersect;
use super::sampler::{Sampler, SolidColorSampler, TextureSampler};

fn normalize_degrees(angle: f32) -> f32 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Rotates `(dx, dy)` (already relative to the pivot) by `-angle` to find the unrotated source
/// offset.
fn inverse_rotate(dx: f32, dy: f32, angle_radians: f32) -> (f32, f32) {
    let (sin, cos) = angle_radians.sin_cos();
    (dx * cos + dy * sin, -dx * sin + dy * cos)
}

fn bounding_box_after_rotation(width: u32, height: u32, pivot_x: f32, pivot_y: f32, angle_radians: f32) -> (f32, f32, f32, f32) {
    let (sin, cos) = angle_radians.sin_cos();
    let corners = [(0.0, 0.0), (width as f32, 0.0), (0.0, height as f32), (width as f32, height as f32)];
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for (cx, cy) in corners {
        let rel_x = cx - half_w;
        let rel_y = cy - half_h;
        let rx = rel_x * cos - rel_y * sin;
        let ry = rel_x * sin + rel_y * cos;
        let x = pivot_x + rx;
        let y = pivot_y + ry;
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    (min_x, min_y, max_x, max_y)
}

/// Walks `sampler`'s extent rotated by `angle_degrees` around the pivot
/// `(x + width/2 + off_x, y + height/2 + off_y)` and draws into the target, honoring clipping
/// and the context's blend state.
fn draw_rotated(ctx: &mut RenderContext<'_>, sampler: &dyn Sampler, x: i32, y: i32, angle_degrees: f32, off_x: i32, off_y: i32) {
    let width = sampler.width();
    let height = sampler.height();
    if width == 0 || height == 0 {
        return;
    }

    let angle = normalize_degrees(angle_degrees);

    if angle == 0.0 && off_x == 0 && off_y == 0 {
        draw_axis_aligned(ctx, sampler, x, y);
        return;
    }
    if (angle == 90.0 || angle == 180.0 || angle == 270.0) && off_x == 0 && off_y == 0 {
        draw_right_angle_fast_path(ctx, sampler, x, y, angle);
        return;
    }

    let pivot_x = x as f32 + width as f32 / 2.0 + off_x as f32;
    let pivot_y = y as f32 + height as f32 / 2.0 + off_y as f32;
    let angle_radians = angle.to_radians();

    let (min_x, min_y, max_x, max_y) = bounding_box_after_rotation(width, height, pivot_x, pivot_y, angle_radians);
    let bbox_x = (min_x.floor() as i32) - 1;
    let bbox_y = (min_y.floor() as i32) - 1;
    let bbox_w = (max_x.ceil() - min_x.floor()) as u32 + 2;
    let bbox_h = (max_y.ceil() - min_y.floor()) as u32 + 2;

    let clip = if ctx.clipping_enabled() { Some(ctx.get_clipping_area()) } else { None };
    let Some(target) = ctx.require_target() else { return };
    let rect = intersect(bbox_x, bbox_y, bbox_w, bbox_h, target.width(), target.height(), clip);
    if rect.is_empty() {
        return;
    }

    let dst_format = target.format();
    let sampling = ctx.sampling_method();
    let blend_ctx = *ctx.blend_context();
    let target = ctx.get_target_texture_mut().expect("checked above");
    let dst_bpp = dst_format.bytes_per_pixel();

    for dy in rect.y..rect.y + rect.height as i32 {
        let row = target.row_mut(dy as u32);
        for dx in rect.x..rect.x + rect.width as i32 {
            let (src_dx, src_dy) = inverse_rotate(dx as f32 - pivot_x, dy as f32 - pivot_y, angle_radians);
            let src_x = src_dx + width as f32 / 2.0;
            let src_y = src_dy + height as f32 / 2.0;

            let hub = match sampling {
                crate::context::SamplingMethod::Nearest => {
                    sampler.sample_nearest(src_x.round() as i32, src_y.round() as i32)
                }
                crate::context::SamplingMethod::Linear => sampler.sample_bilinear(src_x, src_y),
            };
            let Some(hub) = hub else { continue };

            let start = dx as usize * dst_bpp;
            crate::blend::blend_pixel(dst_format, &mut row[start..start + dst_bpp], hub, &blend_ctx);
        }
    }
}

fn draw_axis_aligned(ctx: &mut RenderContext<'_>, sampler: &dyn Sampler, x: i32, y: i32) {
    let clip = if ctx.clipping_enabled() { Some(ctx.get_clipping_area()) } else { None };
    let Some(target) = ctx.require_target() else { return };
    let rect = intersect(x, y, sampler.width(), sampler.height(), target.width(), target.height(), clip);
    if rect.is_empty() {
        return;
    }
    let dst_format = target.format();
    let dst_bpp = dst_format.bytes_per_pixel();
    let blend_ctx = *ctx.blend_context();
    let target = ctx.get_target_texture_mut().expect("checked above");

    for dy in rect.y..rect.y + rect.height as i32 {
        let src_y = dy - y;
        let row = target.row_mut(dy as u32);
        for dx in rect.x..rect.x + rect.width as i32 {
            let src_x = dx - x;
            let Some(hub) = sampler.sample_nearest(src_x, src_y) else { continue };
            let start = dx as usize * dst_bpp;
            crate::blend::blend_pixel(dst_format, &mut row[start..start + dst_bpp], hub, &blend_ctx);
        }
    }
}

/// Remaps row-major for an exact 90/180/270-degree rotation with zero pivot offset: no
/// trigonometry, no rounding, byte-identical to a true rotation.
fn draw_right_angle_fast_path(ctx: &mut RenderContext<'_>, sampler: &dyn Sampler, x: i32, y: i32, angle: f32) {
    let (src_w, src_h) = (sampler.width(), sampler.height());
    let (dst_w, dst_h) = if angle == 180.0 { (src_w, src_h) } else { (src_h, src_w) };

    let clip = if ctx.clipping_enabled() { Some(ctx.get_clipping_area()) } else { None };
    let Some(target) = ctx.require_target() else { return };
    let rect = intersect(x, y, dst_w, dst_h, target.width(), target.height(), clip);
    if rect.is_empty() {
        return;
    }
    let dst_format = target.format();
    let dst_bpp = dst_format.bytes_per_pixel();
    let blend_ctx = *ctx.blend_context();
    let target = ctx.get_target_texture_mut().expect("checked above");

    for dy in rect.y..rect.y + rect.height as i32 {
        let row = target.row_mut(dy as u32);
        for dx in rect.x..rect.x + rect.width as i32 {
            let out_x = (dx - x) as u32;
            let out_y = (dy - y) as u32;
            let (src_x, src_y) = if angle == 90.0 {
                (out_y, src_h - 1 - out_x)
            } else if angle == 180.0 {
                (src_w - 1 - out_x, src_h - 1 - out_y)
            } else {
                (src_w - 1 - out_y, out_x)
            };
            let Some(hub) = sampler.sample_nearest(src_x as i32, src_y as i32) else { continue };
            let start = dx as usize * dst_bpp;
            crate::blend::blend_pixel(dst_format, &mut row[start..start + dst_bpp], hub, &blend_ctx);
        }
    }
}

/// Draws a solid-color rectangle rotated by `angle_degrees` around its own center, offset by
/// `(off_x, off_y)` from that center.
pub fn draw_rect_rotated(
    ctx: &mut RenderContext<'_>,
    color: Color,
    x: i32,
    y: i32,
    length: u32,
    height: u32,
    angle_degrees: f32,
    off_x: i32,
    off_y: i32,
) {
    if length == 0 || height == 0 {
        return;
    }
    let hub = [color.alpha(), color.red(), color.green(), color.blue()];
    let sampler = SolidColorSampler { width: length, height, hub };
    draw_rotated(ctx, &sampler, x, y, angle_degrees, off_x, off_y);
}

/// Draws `source`'s full extent rotated by `angle_degrees` around its own center, offset by
/// `(off_x, off_y)` from that center.
pub fn draw_texture_rotated(ctx: &mut RenderContext<'_>, source: &Texture<'_>, x: i32, y: i32, angle_degrees: f32, off_x: i32, off_y: i32) {
    let sampler = TextureSampler { texture: source };
    draw_rotated(ctx, &sampler, x, y, angle_degrees, off_x, off_y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;

    #[test]
    fn scenario_s5_180_degree_rotate() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(3, 1, PixelFormat::Rgb24));
        let mut src_bytes = [0xAA, 0xBB, 0xCC, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66];
        let src = Texture::view(3, 1, 9, PixelFormat::Rgb24, &mut src_bytes).unwrap();
        draw_texture_rotated(&mut ctx, &src, 0, 0, 180.0, 0, 0);
        let target = ctx.get_target_texture().unwrap();
        assert_eq!(target.data(), &[0x44, 0x55, 0x66, 0x11, 0x22, 0x33, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn zero_degree_rotation_matches_axis_aligned_draw() {
        let mut ctx_rotated = RenderContext::new();
        ctx_rotated.set_target_texture(Texture::new_owned(2, 2, PixelFormat::Rgb24));
        let mut ctx_plain = RenderContext::new();
        ctx_plain.set_target_texture(Texture::new_owned(2, 2, PixelFormat::Rgb24));

        let mut bytes_a = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let mut bytes_b = bytes_a;
        let src_a = Texture::view(2, 2, 6, PixelFormat::Rgb24, &mut bytes_a).unwrap();
        let src_b = Texture::view(2, 2, 6, PixelFormat::Rgb24, &mut bytes_b).unwrap();

        draw_texture_rotated(&mut ctx_rotated, &src_a, 0, 0, 0.0, 0, 0);
        super::super::textured::draw_texture(&mut ctx_plain, &src_b, 0, 0);

        assert_eq!(ctx_rotated.get_target_texture().unwrap().data(), ctx_plain.get_target_texture().unwrap().data());
    }

    #[test]
    fn ninety_then_two_seventy_round_trips_to_original() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(2, 3, PixelFormat::Grayscale8));
        let mut src_bytes = [1u8, 2, 3, 4, 5, 6];
        let src = Texture::view(2, 3, 2, PixelFormat::Grayscale8, &mut src_bytes).unwrap();
        draw_texture_rotated(&mut ctx, &src, 0, 0, 90.0, 0, 0);
        let rotated = ctx.get_target_texture().unwrap().data().to_vec();

        let mut ctx2 = RenderContext::new();
        ctx2.set_target_texture(Texture::new_owned(2, 3, PixelFormat::Grayscale8));
        let mut rotated_bytes = rotated;
        let rotated_tex = Texture::view(3, 2, 3, PixelFormat::Grayscale8, &mut rotated_bytes).unwrap();
        draw_texture_rotated(&mut ctx2, &rotated_tex, 0, 0, 270.0, 0, 0);

        assert_eq!(ctx2.get_target_texture().unwrap().data(), &[1, 2, 3, 4, 5, 6]);
    }
}
