use std::path::PathBuf;

use argh::FromArgs;
use artcrop_core::{
    Converter, CropConfig, PaletteConvention, lvgl,
    codec::{self, PackedImage},
    source::{self, SourceImage},
};
use log::{error, info, warn};

use crate::error::Error;

mod error;
mod preview;

#[derive(FromArgs)]
/// Crop 1-bit LVGL art arrays to a smaller display without rescaling.
struct Args {
    /// path of the C source containing the `uint8_t <name>_map[]` arrays
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path of the C source to write the cropped arrays to
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// directory for PNG previews and comparison strips
    #[argh(option)]
    png_dir: Option<PathBuf>,

    /// only convert arrays whose name starts with this prefix
    #[argh(option)]
    prefix: Option<String>,

    /// source size as WxH (default 140x68)
    #[argh(option, from_str_fn(parse_size))]
    src_size: Option<(usize, usize)>,

    /// destination size as WxH (default 128x32)
    #[argh(option, from_str_fn(parse_size))]
    dst_size: Option<(usize, usize)>,

    /// preferred crop center, 0 = top, 0.5 = middle, 1 = bottom (default 0.35)
    #[argh(option, short = 'b')]
    bias: Option<f64>,

    /// preprocessor flag guarding the inverted palette
    #[argh(option, default = "String::from(lvgl::DEFAULT_INVERTED_FLAG)")]
    inverted_flag: String,
}

fn parse_size(value: &str) -> Result<(usize, usize), String> {
    let parsed = value
        .split_once('x')
        .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)));
    parsed.ok_or_else(|| format!("expected WxH, got '{value}'"))
}

impl Args {
    fn config(&self) -> CropConfig {
        let mut config = CropConfig::default();
        if let Some((width, height)) = self.src_size {
            config.src_width = width;
            config.src_height = height;
        }
        if let Some((width, height)) = self.dst_size {
            config.dst_width = width;
            config.dst_height = height;
        }
        if let Some(bias) = self.bias {
            config.vertical_bias = bias;
        }
        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let config = args.config();
    let converter = Converter::new(config)?;
    info!(
        "Cropping {}x{} -> {}x{}, vertical bias {} (0=top, 0.5=center, 1=bottom)",
        config.src_width, config.src_height, config.dst_width, config.dst_height, config.vertical_bias
    );

    let text = std::fs::read_to_string(&args.input)?;
    let mut images = source::extract_images(&text);
    if let Some(prefix) = &args.prefix {
        images = source::filter_by_prefix(images, prefix);
    }
    info!("Found {} images in {}", images.len(), args.input.display());

    let images = convertible(images, &converter)?;
    if images.is_empty() {
        return Err(Error::NoImages);
    }

    let mut converted = Vec::with_capacity(images.len());
    for image in &images {
        let conversion = converter.convert_named(&image.name, &image.data)?;
        if let Some(dir) = &args.png_dir {
            preview::write_previews(dir, &image.name, &conversion)?;
        }
        converted.push((image.name.as_str(), conversion));
    }

    let banner = format!(
        "Cropped from {}x{} to {}x{}, pixels copied without rescaling",
        config.src_width, config.src_height, config.dst_width, config.dst_height
    );
    let mut out = String::new();
    lvgl::write_art_file(
        &mut out,
        &[banner.as_str(), "SPDX-License-Identifier: MIT"],
        converted.iter().map(|(name, conversion)| (*name, &conversion.cropped)),
        &args.inverted_flag,
    )?;
    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.output, out)?;

    info!("Converted {} images", converted.len());
    info!("  C source:     {}", args.output.display());
    if let Some(dir) = &args.png_dir {
        info!("  Previews:     {}", dir.display());
    }
    Ok(())
}

/// Drops arrays that do not hold a whole source image. Inverted input
/// palettes are converted as usual but reported, since the output always
/// carries the standard palette under the `#else` branch.
fn convertible(images: Vec<SourceImage>, converter: &Converter) -> Result<Vec<SourceImage>, Error> {
    let config = converter.config();
    let expected_len = codec::encoded_len(config.src_width, config.src_height);
    let mut kept = Vec::with_capacity(images.len());
    for image in images {
        if image.data.len() != expected_len {
            warn!(
                "Skipping {}: {} bytes, expected {} for {}x{}",
                image.name,
                image.data.len(),
                expected_len,
                config.src_width,
                config.src_height
            );
            continue;
        }
        let packed = PackedImage::parse(&image.data, config.src_width, config.src_height)?;
        match packed.palette.as_ref().map(PaletteConvention::detect) {
            Some(Some(PaletteConvention::Standard)) => {}
            Some(Some(PaletteConvention::Inverted)) => {
                warn!("{}: input carries the inverted palette", image.name)
            }
            _ => warn!("{}: unrecognised palette {:?}", image.name, packed.palette),
        }
        kept.push(image);
    }
    Ok(kept)
}
