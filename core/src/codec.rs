//! LVGL `CF_INDEXED_1BIT` buffers: an 8-byte palette followed by MSB-first
//! pixel rows, each row padded to a whole byte.

use log::warn;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Bitmap, Error, Result};

pub const PALETTE_SIZE: usize = core::mem::size_of::<Palette>();

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba { r: 0x00, g: 0x00, b: 0x00, a: 0xff };
    pub const WHITE: Rgba = Rgba { r: 0xff, g: 0xff, b: 0xff, a: 0xff };
}

/// Colors of palette index 0 and 1.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct Palette {
    pub index0: Rgba,
    pub index1: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PaletteConvention {
    /// Index 0 black, index 1 white.
    #[default]
    Standard,
    /// Index 0 white, index 1 black.
    Inverted,
}

impl PaletteConvention {
    pub fn palette(self) -> Palette {
        match self {
            PaletteConvention::Standard => Palette {
                index0: Rgba::BLACK,
                index1: Rgba::WHITE,
            },
            PaletteConvention::Inverted => Palette {
                index0: Rgba::WHITE,
                index1: Rgba::BLACK,
            },
        }
    }

    pub fn detect(palette: &Palette) -> Option<Self> {
        [PaletteConvention::Standard, PaletteConvention::Inverted]
            .into_iter()
            .find(|convention| convention.palette() == *palette)
    }
}

pub fn bytes_per_row(width: usize) -> usize {
    width.div_ceil(8)
}

/// Total encoded size, palette included.
pub fn encoded_len(width: usize, height: usize) -> usize {
    PALETTE_SIZE + height * bytes_per_row(width)
}

/// A borrowed view of a packed buffer.
#[derive(Clone, Copy, Debug)]
pub struct PackedImage<'a> {
    /// `None` if the buffer was too short to hold a palette.
    pub palette: Option<Palette>,
    pub width: usize,
    pub height: usize,
    pub pixels: &'a [u8],
}

impl<'a> PackedImage<'a> {
    pub fn parse(buffer: &'a [u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let (palette, pixels) = match Palette::read_from_prefix(buffer) {
            Ok((palette, pixels)) => (Some(palette), pixels),
            Err(_) => (None, &buffer[buffer.len()..]),
        };
        let expected = height * bytes_per_row(width);
        if pixels.len() < expected {
            warn!(
                "Pixel data truncated: {} of {} bytes, padding with background",
                pixels.len(),
                expected
            );
        }
        Ok(Self {
            palette,
            width,
            height,
            pixels,
        })
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let byte_index = y * bytes_per_row(self.width) + x / 8;
        let bit_index = 7 - (x % 8);
        self.pixels
            .get(byte_index)
            .is_some_and(|byte| (byte >> bit_index) & 1 == 1)
    }

    pub fn to_bitmap(&self) -> Result<Bitmap> {
        Bitmap::from_fn(self.width, self.height, |x, y| self.pixel(x, y))
    }
}

pub fn decode(buffer: &[u8], width: usize, height: usize) -> Result<Bitmap> {
    PackedImage::parse(buffer, width, height)?.to_bitmap()
}

pub fn encode(bitmap: &Bitmap, convention: PaletteConvention) -> Vec<u8> {
    let row_bytes = bytes_per_row(bitmap.width());
    let mut buffer = Vec::with_capacity(encoded_len(bitmap.width(), bitmap.height()));
    buffer.extend_from_slice(convention.palette().as_bytes());
    for row in bitmap.rows() {
        let start = buffer.len();
        buffer.resize(start + row_bytes, 0u8);
        for (x, _) in row.iter().enumerate().filter(|(_, set)| **set) {
            buffer[start + x / 8] |= 1 << (7 - (x % 8));
        }
    }
    buffer
}
