// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A CPU-only 2D software rasterizer.
//!
//! [`Texture`] wraps a caller-owned or caller-borrowed pixel buffer in one of eight
//! [`PixelFormat`]s. [`RenderContext`] holds the mutable drawing state (target, clip rectangle,
//! blend state, sampling method) that every primitive in [`raster`] is threaded through: clear,
//! solid rectangle, line, axis-aligned texture, and rotated (optionally scaled) texture. Pixel
//! format conversion ([`convert`]) and row blending ([`blend`]) are exposed directly for callers
//! that want to drive them without going through a primitive.
//!
//! Every draw call degrades to a logged no-op rather than panicking or returning a `Result`: see
//! [`error`] for the narrower set of conditions ([`Texture`] construction) that are still
//! fallible.

pub mod blend;
pub mod color;
pub mod context;
pub mod convert;
pub mod error;
pub mod pixel_format;
pub mod raster;
pub mod texture;

pub use blend::{BlendContext, BlendFactor, BlendMode, BlendOperation, Coloring};
pub use color::Color;
pub use context::{ClipRect, RenderContext, SamplingMethod};
pub use error::{RasterError, Result};
pub use pixel_format::PixelFormat;
pub use raster::{clear_target, draw_line, draw_rect, draw_rect_rotated, draw_texture, draw_texture_rotated, draw_texture_scaled_rotated};
pub use texture::Texture;
