// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A `Texture` is a view (or owner) of a rectangular pixel buffer: width, height, pitch,
//! format, and the bytes themselves. It never reallocates after construction.
//!
//! There are two backing storage kinds, matching the original's ownership flag:
//! - [`Texture::new_owned`] allocates its own `Vec<u8>` and frees it on drop.
//! - [`Texture::view`] borrows a caller-supplied `&mut [u8]` for a lifetime `'a`; it never
//!   allocates or frees anything. A [`Texture::subregion`] re-bases into the same storage and
//!   borrows the parent's lifetime, so it cannot outlive it.

use crate::error::{RasterError, Result};
use crate::pixel_format::PixelFormat;

enum Storage<'a> {
    Owned(Vec<u8>),
    View(&'a mut [u8]),
}

impl Storage<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Owned(v) => v,
            Storage::View(s) => s,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Storage::Owned(v) => v,
            Storage::View(s) => s,
        }
    }
}

/// A rectangular pixel buffer: base bytes, width, height, pitch, and format.
///
/// `'a` is `'static` for an owned texture (it carries its own storage) and the lifetime of the
/// borrowed buffer for a view or a sub-texture.
pub struct Texture<'a> {
    storage: Storage<'a>,
    width: u32,
    height: u32,
    pitch: u32,
    format: PixelFormat,
}

fn required_len(width: u32, height: u32, pitch: u32, bpp: u8) -> usize {
    if height == 0 {
        return 0;
    }
    (height as usize - 1) * pitch as usize + width as usize * bpp as usize
}

impl Texture<'static> {
    /// Allocates a zero-filled, tightly-packed (`pitch == width * bytes_per_pixel`) owned
    /// texture. Released automatically on drop, matching a texture constructed with the
    /// ownership flag set in the original design.
    pub fn new_owned(width: u32, height: u32, format: PixelFormat) -> Texture<'static> {
        let bpp = format.bytes_per_pixel() as u32;
        let pitch = width * bpp;
        let len = required_len(width, height, pitch, format.bytes_per_pixel() as u8);
        Texture {
            storage: Storage::Owned(vec![0u8; len]),
            width,
            height,
            pitch,
            format,
        }
    }
}

impl<'a> Texture<'a> {
    /// Builds a non-owning texture over a caller-supplied buffer. Fails if `data` is too short
    /// for `width * height` pixels at the given `pitch`, or if `pitch` is narrower than one row
    /// actually needs — this is the one construction-time check the library can cheaply make;
    /// everything past it is address arithmetic that trusts the caller (see the error handling
    /// design notes on caller contract violations).
    pub fn view(
        width: u32,
        height: u32,
        pitch: u32,
        format: PixelFormat,
        data: &'a mut [u8],
    ) -> Result<Texture<'a>> {
        let bpp = format.bytes_per_pixel() as u8;
        if pitch < width * bpp as u32 {
            return Err(RasterError::InvalidPitch {
                width,
                bytes_per_pixel: bpp,
                pitch,
            });
        }
        let required = required_len(width, height, pitch, bpp);
        if data.len() < required {
            return Err(RasterError::BufferTooSmall {
                width,
                height,
                pitch,
                required,
                actual: data.len(),
            });
        }
        Ok(Texture {
            storage: Storage::View(data),
            width,
            height,
            pitch,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        self.storage.as_slice()
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        self.storage.as_mut_slice()
    }

    /// Returns the `width * bytes_per_pixel` valid bytes of row `y` (the pitch may include
    /// trailing padding that isn't part of any pixel).
    pub fn row(&self, y: u32) -> &[u8] {
        let bpp = self.format.bytes_per_pixel();
        let start = y as usize * self.pitch as usize;
        let len = self.width as usize * bpp;
        &self.data()[start..start + len]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let bpp = self.format.bytes_per_pixel();
        let start = y as usize * self.pitch as usize;
        let len = self.width as usize * bpp;
        &mut self.data_mut()[start..start + len]
    }

    /// Builds a non-owning sub-texture pointing `(start_x, start_y)` into this texture's
    /// storage, `width x height` pixels in extent. The returned texture borrows `self` for as
    /// long as it lives, so it can never outlive the parent's storage. Returns `None` if the
    /// requested rectangle doesn't fit.
    pub fn subregion(&mut self, start_x: u32, start_y: u32, width: u32, height: u32) -> Option<Texture<'_>> {
        if start_x + width > self.width || start_y + height > self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let base = start_y as usize * self.pitch as usize + start_x as usize * bpp;
        let len = required_len(width, height, self.pitch, bpp as u8);
        let format = self.format;
        let pitch = self.pitch;
        let slice = &mut self.storage.as_mut_slice()[base..base + len];
        Some(Texture {
            storage: Storage::View(slice),
            width,
            height,
            pitch,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_texture_is_zeroed_and_tightly_packed() {
        let tex = Texture::new_owned(4, 2, PixelFormat::Rgb24);
        assert_eq!(tex.pitch(), 12);
        assert_eq!(tex.data().len(), 24);
        assert!(tex.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn view_rejects_undersized_buffer() {
        let mut buf = [0u8; 10];
        let err = Texture::view(4, 2, 12, PixelFormat::Rgb24, &mut buf).unwrap_err();
        assert!(matches!(err, RasterError::BufferTooSmall { .. }));
    }

    #[test]
    fn view_rejects_pitch_narrower_than_row() {
        let mut buf = [0u8; 48];
        let err = Texture::view(4, 2, 8, PixelFormat::Rgb24, &mut buf).unwrap_err();
        assert!(matches!(err, RasterError::InvalidPitch { .. }));
    }

    #[test]
    fn subregion_rebases_without_copying() {
        let mut tex = Texture::new_owned(4, 4, PixelFormat::Grayscale8);
        tex.data_mut()[2 * 4 + 2] = 0xFF; // (2, 2)
        let sub = tex.subregion(1, 1, 3, 3).unwrap();
        // (2, 2) in the parent is (1, 1) in the subregion.
        assert_eq!(sub.row(1)[1], 0xFF);
    }

    #[test]
    fn subregion_out_of_bounds_is_none() {
        let mut tex = Texture::new_owned(4, 4, PixelFormat::Rgb24);
        assert!(tex.subregion(2, 2, 3, 3).is_none());
    }
}
