/*!
Content-aware cropping for packed 1-bit LVGL art.

Converts `CF_INDEXED_1BIT` bitmaps from one fixed size to a smaller one by
picking the most detailed sub-region. Pixels are copied, never resampled.

## Usage
```
# use artcrop_core::{Bitmap, CropConfig, Converter, PaletteConvention, codec};
# fn main() -> Result<(), artcrop_core::Error> {
let config = CropConfig::default();
let source = Bitmap::new(config.src_width, config.src_height)?;
let buffer = codec::encode(&source, PaletteConvention::Standard);

let converter = Converter::new(config)?;
let conversion = converter.convert(&buffer)?;
assert_eq!(conversion.cropped.width(), 128);
assert_eq!(conversion.selection.window.x, 6);
# Ok(())
# }
```
*/

pub mod bitmap;
pub mod codec;
pub mod config;
pub mod convert;
pub mod lvgl;
pub mod score;
pub mod select;
pub mod source;


pub use bitmap::Bitmap;
pub use codec::{PackedImage, Palette, PaletteConvention, Rgba};
pub use config::CropConfig;
pub use convert::{Conversion, Converter};
pub use select::{CropSelection, CropWindow, Margins};
pub use source::SourceImage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    InvalidDimensions {
        width: usize,
        height: usize,
    },
    InvalidCropBudget {
        src_width: usize,
        src_height: usize,
        dst_width: usize,
        dst_height: usize,
    },
    InvalidBias(f64),
    ScoreCountMismatch {
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid bitmap dimensions {width}x{height}")
            }
            Error::InvalidCropBudget {
                src_width,
                src_height,
                dst_width,
                dst_height,
            } => write!(
                f,
                "cannot crop {src_width}x{src_height} down to {dst_width}x{dst_height}"
            ),
            Error::InvalidBias(bias) => write!(f, "vertical bias must be finite, got {bias}"),
            Error::ScoreCountMismatch { expected, actual } => {
                write!(f, "expected {expected} row scores, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {}
