// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The crate's single fallible surface.
//!
//! Draw calls on [`crate::context::RenderContext`] never return a `Result`: per the error
//! handling design, a missing target, an empty/clipped-away extent, an unregistered format
//! pair, or a degenerate transform all degrade to a logged no-op on the affected draw only.
//! `RasterError` exists for the much smaller set of conditions that are cheap to check before
//! any address arithmetic happens, namely constructing a [`crate::texture::Texture`] over a
//! buffer that doesn't actually fit its own stated dimensions.

use crate::pixel_format::PixelFormat;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("buffer too small for {width}x{height} at pitch {pitch}: need {required} bytes, got {actual}")]
    BufferTooSmall {
        width: u32,
        height: u32,
        pitch: u32,
        required: usize,
        actual: usize,
    },

    #[error("pitch {pitch} is narrower than width {width} * {bytes_per_pixel} bytes/pixel")]
    InvalidPitch {
        width: u32,
        bytes_per_pixel: u8,
        pitch: u32,
    },

    #[error("a kernel for {src:?} -> {dst:?} is already registered")]
    DuplicateKernel { src: PixelFormat, dst: PixelFormat },
}

pub type Result<T> = core::result::Result<T, RasterError>;
