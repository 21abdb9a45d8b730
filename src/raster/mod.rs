// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The primitive drawing operations: clear, solid rectangle, line, axis-aligned texture, and
//! rotated (optionally scaled) texture. Each one is a free function taking a
//! [`crate::context::RenderContext`] rather than a method, so the context stays a plain data
//! bag and the primitives can be tested independently of each other.

mod geometry;
mod line;
mod rect;
mod rotate;
mod sampler;
mod scaled_rotate;
mod textured;

pub use line::draw_line;
pub use rect::{clear_target, draw_rect};
pub use rotate::{draw_rect_rotated, draw_texture_rotated};
pub use scaled_rotate::draw_texture_scaled_rotated;
pub use textured::draw_texture;
