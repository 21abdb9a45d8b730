// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pixel Formats
//!
//! A [`PixelFormat`] names a fixed byte encoding for a single pixel: how many bytes it takes,
//! which bits belong to which channel, and whether it carries an alpha channel at all. Every
//! other component in this crate treats the format as an opaque tag and looks up its
//! [`PixelFormatInfo`] descriptor rather than hard-coding offsets, so adding a format only
//! requires touching this module and the conversion/blend dispatch tables.
//!
//! Channel masks and shifts describe how to extract a channel from a pixel loaded as a
//! little-endian integer of the format's own width (for the 2-byte packed formats) or from
//! individual bytes in address order (for the 1-, 3-, and 4-byte formats). A shift of N means
//! "right-shift the loaded word by N, then mask", matching the convention used for 16-bit
//! packed formats like RGB565 and ARGB1555. For byte-per-channel formats the mask is always
//! `0xFF` and the shift is expressed in bits but really just selects a byte.

/// The set of pixel encodings this crate knows how to convert between and blend.
///
/// This is a closed enumeration: there is no provision for caller-defined formats, matching the
/// "no open-ended plugin loading" design note. Adding a format is a breaking change that touches
/// the descriptor table below plus the conversion and blend dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8 bits per channel, byte order R, G, B.
    Rgb24,
    /// 8 bits per channel, byte order B, G, R.
    Bgr24,
    /// 8 bits per channel, byte order A, R, G, B.
    Argb8888,
    /// 8 bits per channel, byte order R, G, B, A.
    Rgba8888,
    /// Little-endian 16-bit word, 5 bits R, 6 bits G, 5 bits B.
    Rgb565,
    /// Little-endian 16-bit word, 1 bit A, 5 bits R, 5 bits G, 5 bits B.
    Argb1555,
    /// Little-endian 16-bit word, 4 bits each of R, G, B, A.
    Rgba4444,
    /// Single byte luma. Alpha is implicit: 0 is fully transparent, anything else is opaque.
    Grayscale8,
}

/// All formats, in a fixed order used to build dispatch tables (see [`crate::convert`] and
/// [`crate::blend`]).
pub const ALL_FORMATS: [PixelFormat; 8] = [
    PixelFormat::Rgb24,
    PixelFormat::Bgr24,
    PixelFormat::Argb8888,
    PixelFormat::Rgba8888,
    PixelFormat::Rgb565,
    PixelFormat::Argb1555,
    PixelFormat::Rgba4444,
    PixelFormat::Grayscale8,
];

/// Static per-format metadata: byte layout, channel masks/shifts, and alpha presence.
///
/// One `PixelFormatInfo` exists per [`PixelFormat`] variant, returned by [`PixelFormat::info`].
/// Descriptors are `'static` constants; nothing in this crate mutates or constructs one at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormatInfo {
    pub format: PixelFormat,
    pub name: &'static str,
    pub bytes_per_pixel: u8,
    pub num_channels: u8,
    pub has_alpha: bool,
    pub red_mask: u16,
    pub red_shift: u8,
    pub green_mask: u16,
    pub green_shift: u8,
    pub blue_mask: u16,
    pub blue_shift: u8,
    pub alpha_mask: u16,
    pub alpha_shift: u8,
}

const RGB24_INFO: PixelFormatInfo = PixelFormatInfo {
    format: PixelFormat::Rgb24,
    name: "RGB24",
    bytes_per_pixel: 3,
    num_channels: 3,
    has_alpha: false,
    red_mask: 0xFF,
    red_shift: 0,
    green_mask: 0xFF,
    green_shift: 8,
    blue_mask: 0xFF,
    blue_shift: 16,
    alpha_mask: 0,
    alpha_shift: 0,
};

const BGR24_INFO: PixelFormatInfo = PixelFormatInfo {
    format: PixelFormat::Bgr24,
    name: "BGR24",
    bytes_per_pixel: 3,
    num_channels: 3,
    has_alpha: false,
    red_mask: 0xFF,
    red_shift: 16,
    green_mask: 0xFF,
    green_shift: 8,
    blue_mask: 0xFF,
    blue_shift: 0,
    alpha_mask: 0,
    alpha_shift: 0,
};

const ARGB8888_INFO: PixelFormatInfo = PixelFormatInfo {
    format: PixelFormat::Argb8888,
    name: "ARGB8888",
    bytes_per_pixel: 4,
    num_channels: 4,
    has_alpha: true,
    red_mask: 0xFF,
    red_shift: 16,
    green_mask: 0xFF,
    green_shift: 8,
    blue_mask: 0xFF,
    blue_shift: 0,
    alpha_mask: 0xFF,
    alpha_shift: 24,
};

const RGBA8888_INFO: PixelFormatInfo = PixelFormatInfo {
    format: PixelFormat::Rgba8888,
    name: "RGBA8888",
    bytes_per_pixel: 4,
    num_channels: 4,
    has_alpha: true,
    red_mask: 0xFF,
    red_shift: 24,
    green_mask: 0xFF,
    green_shift: 16,
    blue_mask: 0xFF,
    blue_shift: 8,
    alpha_mask: 0xFF,
    alpha_shift: 0,
};

const RGB565_INFO: PixelFormatInfo = PixelFormatInfo {
    format: PixelFormat::Rgb565,
    name: "RGB565",
    bytes_per_pixel: 2,
    num_channels: 3,
    has_alpha: false,
    red_mask: 0x1F,
    red_shift: 11,
    green_mask: 0x3F,
    green_shift: 5,
    blue_mask: 0x1F,
    blue_shift: 0,
    alpha_mask: 0,
    alpha_shift: 0,
};

const ARGB1555_INFO: PixelFormatInfo = PixelFormatInfo {
    format: PixelFormat::Argb1555,
    name: "ARGB1555",
    bytes_per_pixel: 2,
    num_channels: 4,
    has_alpha: true,
    red_mask: 0x1F,
    red_shift: 10,
    green_mask: 0x1F,
    green_shift: 5,
    blue_mask: 0x1F,
    blue_shift: 0,
    alpha_mask: 0x1,
    alpha_shift: 15,
};

const RGBA4444_INFO: PixelFormatInfo = PixelFormatInfo {
    format: PixelFormat::Rgba4444,
    name: "RGBA4444",
    bytes_per_pixel: 2,
    num_channels: 4,
    has_alpha: true,
    red_mask: 0xF,
    red_shift: 12,
    green_mask: 0xF,
    green_shift: 8,
    blue_mask: 0xF,
    blue_shift: 4,
    alpha_mask: 0xF,
    alpha_shift: 0,
};

const GRAYSCALE8_INFO: PixelFormatInfo = PixelFormatInfo {
    format: PixelFormat::Grayscale8,
    name: "GRAYSCALE8",
    bytes_per_pixel: 1,
    num_channels: 1,
    // Alpha is implicit (Y == 0 => transparent) rather than carried in its own bits; the mask
    // here stays zero and callers derive alpha explicitly (see crate::blend).
    has_alpha: false,
    red_mask: 0xFF,
    red_shift: 0,
    green_mask: 0xFF,
    green_shift: 0,
    blue_mask: 0xFF,
    blue_shift: 0,
    alpha_mask: 0,
    alpha_shift: 0,
};

impl PixelFormat {
    /// Looks up the static descriptor for this format. O(1), no allocation.
    pub const fn info(self) -> &'static PixelFormatInfo {
        match self {
            PixelFormat::Rgb24 => &RGB24_INFO,
            PixelFormat::Bgr24 => &BGR24_INFO,
            PixelFormat::Argb8888 => &ARGB8888_INFO,
            PixelFormat::Rgba8888 => &RGBA8888_INFO,
            PixelFormat::Rgb565 => &RGB565_INFO,
            PixelFormat::Argb1555 => &ARGB1555_INFO,
            PixelFormat::Rgba4444 => &RGBA4444_INFO,
            PixelFormat::Grayscale8 => &GRAYSCALE8_INFO,
        }
    }

    /// Shorthand for `self.info().bytes_per_pixel`.
    pub const fn bytes_per_pixel(self) -> usize {
        self.info().bytes_per_pixel as usize
    }

    /// Whether this format carries an explicit alpha channel (GRAYSCALE8's implicit alpha
    /// doesn't count; callers that need that distinction should match on the format directly).
    pub const fn has_alpha(self) -> bool {
        self.info().has_alpha
    }
}

/// Expands a narrow channel value to 8 bits by bit-replication, not multiply-divide.
///
/// Restricted to the channel widths this crate actually uses (1, 4, 5, 6, 8 bits). Replication
/// guarantees `0 -> 0` and `max -> 255` with no rounding drift, matching the original converter's
/// `(r << 3) | (r >> 2)` style formulas, e.g. a 5-bit value of 31 expands to `0xFF`.
pub const fn expand_bits(value: u8, bits: u8) -> u8 {
    match bits {
        1 => {
            if value != 0 {
                255
            } else {
                0
            }
        }
        4 => (value << 4) | value,
        5 => (value << 3) | (value >> 2),
        6 => (value << 2) | (value >> 4),
        8 => value,
        _ => value,
    }
}

/// Narrows an 8-bit channel value down to `bits` bits by taking the high bits. No dithering.
pub const fn narrow_bits(value: u8, bits: u8) -> u8 {
    if bits >= 8 {
        return value;
    }
    value >> (8 - bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_consistency() {
        for fmt in ALL_FORMATS {
            let info = fmt.info();
            let total_bits = info.bytes_per_pixel as u32 * 8;

            let channel_fits = |mask: u16, shift: u8| -> bool {
                if mask == 0 {
                    return true;
                }
                let highest_bit = 15 - (mask.leading_zeros() as u8);
                shift as u32 + highest_bit as u32 + 1 <= total_bits
            };

            assert!(channel_fits(info.red_mask, info.red_shift), "{:?} red", fmt);
            assert!(
                channel_fits(info.green_mask, info.green_shift),
                "{:?} green",
                fmt
            );
            assert!(
                channel_fits(info.blue_mask, info.blue_shift),
                "{:?} blue",
                fmt
            );
            assert!(
                channel_fits(info.alpha_mask, info.alpha_shift),
                "{:?} alpha",
                fmt
            );

            assert_eq!(info.has_alpha, info.alpha_mask != 0, "{:?} alpha flag", fmt);
        }
    }

    #[test]
    fn bit_replication_expansion() {
        assert_eq!(expand_bits(0, 5), 0);
        assert_eq!(expand_bits(31, 5), 255);
        assert_eq!(expand_bits(63, 6), 255);
        assert_eq!(expand_bits(0, 6), 0);
    }

    #[test]
    fn narrowing_takes_high_bits() {
        assert_eq!(narrow_bits(0xFF, 5), 0x1F);
        assert_eq!(narrow_bits(0x00, 5), 0x00);
        assert_eq!(narrow_bits(0xFF, 6), 0x3F);
    }
}
