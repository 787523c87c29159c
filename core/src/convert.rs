use log::info;

use crate::{Bitmap, CropConfig, CropSelection, PaletteConvention, Result, codec, select};

pub struct Conversion {
    pub source: Bitmap,
    pub cropped: Bitmap,
    /// Packed cropped image, palette included.
    pub buffer: Vec<u8>,
    pub selection: CropSelection,
}

#[derive(Clone, Copy, Debug)]
pub struct Converter {
    config: CropConfig,
    convention: PaletteConvention,
}

impl Converter {
    pub fn new(config: CropConfig) -> Result<Self> {
        Self::with_convention(config, PaletteConvention::Standard)
    }

    pub fn with_convention(config: CropConfig, convention: PaletteConvention) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, convention })
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn convert(&self, buffer: &[u8]) -> Result<Conversion> {
        let source = codec::decode(buffer, self.config.src_width, self.config.src_height)?;
        let selection = select::select(&source, &self.config)?;
        let window = selection.window;
        let cropped = source.crop(window.x, window.y, window.width, window.height)?;
        let buffer = codec::encode(&cropped, self.convention);
        Ok(Conversion {
            source,
            cropped,
            buffer,
            selection,
        })
    }

    /// Like [`Converter::convert`], logging the outcome under `name`.
    pub fn convert_named(&self, name: &str, buffer: &[u8]) -> Result<Conversion> {
        let conversion = self.convert(buffer)?;
        let window = conversion.selection.window;
        info!(
            "{}: crop y={}..{} (skip top {}px, bottom {}px)",
            name,
            window.y,
            window.bottom(),
            conversion.selection.removed.top,
            conversion.selection.removed.bottom
        );
        Ok(conversion)
    }
}
