// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `RenderContext` bundles everything a draw call in [`crate::raster`] needs besides its own
//! arguments: which texture to draw into, the current clip rectangle, blend state, and sampling
//! method. One context is reused across many draw calls, the way the original's render context
//! object is threaded through every drawing function rather than rebuilt per call.

use log::warn;

use crate::blend::{BlendContext, BlendFactor, BlendMode, BlendOperation, Coloring};
use crate::pixel_format::PixelFormat;
use crate::texture::Texture;

/// The signature of [`crate::blend::blend_row`], installable via [`RenderContext::set_blend_func`]
/// for callers that know their format pair and want to bypass the default dispatch.
pub type BlendRowFn = fn(PixelFormat, &mut [u8], PixelFormat, &[u8], usize, &BlendContext);

/// How a sampled source pixel is chosen when a texture is drawn at a non-integer scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMethod {
    /// Round to the closest source pixel.
    #[default]
    Nearest,
    /// Interpolate the four nearest source pixels.
    Linear,
}

/// An axis-aligned pixel rectangle used for clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ClipRect {
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width as i32 && y < self.y + self.height as i32
    }
}

/// The mutable state shared by every draw call in a drawing session.
///
/// `'a` is the lifetime of the target texture's backing storage, the same as [`Texture`]'s own.
pub struct RenderContext<'a> {
    target: Option<Texture<'a>>,
    clipping_enabled: bool,
    clip_rect: ClipRect,
    blend: BlendContext,
    sampling: SamplingMethod,
    blend_func: Option<BlendRowFn>,
}

impl<'a> RenderContext<'a> {
    /// Builds a context with no target texture, clipping disabled, [`BlendMode::NoBlend`], and
    /// nearest-neighbor sampling.
    pub fn new() -> RenderContext<'a> {
        RenderContext {
            target: None,
            clipping_enabled: false,
            clip_rect: ClipRect { x: 0, y: 0, width: 0, height: 0 },
            blend: BlendContext::default(),
            sampling: SamplingMethod::default(),
            blend_func: None,
        }
    }

    /// Installs `texture` as the draw target, taking ownership of it (or of the borrow it wraps).
    /// Replaces any previous target.
    pub fn set_target_texture(&mut self, texture: Texture<'a>) {
        self.target = Some(texture);
    }

    pub fn get_target_texture(&self) -> Option<&Texture<'a>> {
        self.target.as_ref()
    }

    pub fn get_target_texture_mut(&mut self) -> Option<&mut Texture<'a>> {
        self.target.as_mut()
    }

    pub fn take_target_texture(&mut self) -> Option<Texture<'a>> {
        self.target.take()
    }

    /// Sets the clip rectangle. Draw calls in [`crate::raster`] intersect every primitive's
    /// extent against this rectangle when [`RenderContext::enable_clipping`] is on; it has no
    /// effect while clipping is disabled.
    pub fn set_clipping(&mut self, rect: ClipRect) {
        self.clip_rect = rect;
    }

    pub fn enable_clipping(&mut self, enabled: bool) {
        self.clipping_enabled = enabled;
    }

    pub fn clipping_enabled(&self) -> bool {
        self.clipping_enabled
    }

    /// The effective clip rectangle: the configured one if clipping is enabled, or the full
    /// target extent otherwise (so callers can always intersect against *something*).
    pub fn get_clipping_area(&self) -> ClipRect {
        if self.clipping_enabled {
            self.clip_rect
        } else {
            match &self.target {
                Some(t) => ClipRect { x: 0, y: 0, width: t.width(), height: t.height() },
                None => ClipRect { x: 0, y: 0, width: 0, height: 0 },
            }
        }
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend.mode = mode;
    }

    pub fn get_blend_mode(&self) -> BlendMode {
        self.blend.mode
    }

    pub fn set_blend_factors(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.blend.src_factor = src;
        self.blend.dst_factor = dst;
    }

    pub fn set_blend_operation(&mut self, operation: BlendOperation) {
        self.blend.operation = operation;
    }

    pub fn set_coloring(&mut self, coloring: Coloring) {
        self.blend.coloring = coloring;
    }

    pub fn get_coloring(&self) -> Coloring {
        self.blend.coloring
    }

    pub fn set_sampling_method(&mut self, method: SamplingMethod) {
        self.sampling = method;
    }

    pub fn sampling_method(&self) -> SamplingMethod {
        self.sampling
    }

    /// The full blend state, as handed to [`crate::blend::blend_row`]/`blend_solid_row` by the
    /// primitives in [`crate::raster`].
    pub fn blend_context(&self) -> &BlendContext {
        &self.blend
    }

    /// Installs an explicit row-blend kernel, overriding the default dispatch
    /// ([`crate::blend::blend_row`]) for every subsequent textured draw.
    pub fn set_blend_func(&mut self, func: BlendRowFn) {
        self.blend_func = Some(func);
    }

    /// The kernel a textured draw should call: the installed override, or
    /// [`crate::blend::blend_row`] if none was set.
    pub fn blend_func(&self) -> BlendRowFn {
        self.blend_func.unwrap_or(crate::blend::blend_row)
    }

    /// Logs and returns `None` if there is no target texture, for the common
    /// "can't draw, no-op" path every primitive starts with.
    pub(crate) fn require_target(&mut self) -> Option<&mut Texture<'a>> {
        if self.target.is_none() {
            warn!("draw call with no target texture set; ignored");
        }
        self.target.as_mut()
    }
}

impl Default for RenderContext<'_> {
    fn default() -> Self {
        RenderContext::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;

    #[test]
    fn fresh_context_has_no_target() {
        let ctx = RenderContext::new();
        assert!(ctx.get_target_texture().is_none());
    }

    #[test]
    fn clipping_area_defaults_to_full_target_when_disabled() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(10, 20, PixelFormat::Rgb24));
        let area = ctx.get_clipping_area();
        assert_eq!((area.x, area.y, area.width, area.height), (0, 0, 10, 20));
    }

    #[test]
    fn explicit_clip_rect_is_used_once_enabled() {
        let mut ctx = RenderContext::new();
        ctx.set_target_texture(Texture::new_owned(10, 20, PixelFormat::Rgb24));
        ctx.set_clipping(ClipRect { x: 2, y: 3, width: 4, height: 5 });
        ctx.enable_clipping(true);
        let area = ctx.get_clipping_area();
        assert_eq!((area.x, area.y, area.width, area.height), (2, 3, 4, 5));
    }

    #[test]
    fn clip_rect_contains_point_is_half_open() {
        let rect = ClipRect { x: 0, y: 0, width: 4, height: 4 };
        assert!(rect.contains_point(0, 0));
        assert!(rect.contains_point(3, 3));
        assert!(!rect.contains_point(4, 0));
        assert!(!rect.contains_point(-1, 0));
    }
}
