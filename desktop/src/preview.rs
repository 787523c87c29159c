use std::path::Path;

use artcrop_core::{Bitmap, Conversion, PaletteConvention, Rgba};
use embedded_graphics::{
    Pixel,
    mono_font::{MonoTextStyle, ascii::FONT_4X6},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Baseline, Text},
};
use image::{GrayImage, Luma, Rgb, RgbImage};
use log::debug;

use crate::error::Error;

const MARGIN: u32 = 4;
const LABEL_HEIGHT: u32 = 20;
const BACKGROUND: Rgb888 = Rgb888::new(200, 200, 200);

/// Color a pixel shows on the panel with the standard palette.
fn shade(set: bool) -> Rgba {
    let palette = PaletteConvention::Standard.palette();
    if set { palette.index1 } else { palette.index0 }
}

pub fn to_gray(bitmap: &Bitmap) -> GrayImage {
    GrayImage::from_fn(bitmap.width() as u32, bitmap.height() as u32, |x, y| {
        Luma([shade(bitmap.get(x as usize, y as usize)).r])
    })
}

/// An RGB image that embedded-graphics can draw on. Out of bounds pixels
/// are dropped.
struct Canvas(RgbImage);

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 {
                continue;
            }
            if let Some(pixel) = self.0.get_pixel_mut_checked(coord.x as u32, coord.y as u32) {
                *pixel = Rgb([color.r(), color.g(), color.b()]);
            }
        }
        Ok(())
    }
}

fn bitmap_pixels(bitmap: &Bitmap, origin: Point) -> impl Iterator<Item = Pixel<Rgb888>> + '_ {
    (0..bitmap.height()).flat_map(move |y| {
        (0..bitmap.width()).map(move |x| {
            let Rgba { r, g, b, .. } = shade(bitmap.get(x, y));
            Pixel(origin + Point::new(x as i32, y as i32), Rgb888::new(r, g, b))
        })
    })
}

/// Source with the crop box outlined in red, next to the cropped result,
/// both labelled.
pub fn comparison(conversion: &Conversion) -> RgbImage {
    let source = &conversion.source;
    let cropped = &conversion.cropped;
    let selection = &conversion.selection;
    let src_w = source.width() as u32;
    let src_h = source.height() as u32;
    let dst_w = cropped.width() as u32;
    let dst_h = cropped.height() as u32;

    let mut canvas = Canvas(RgbImage::new(
        src_w + MARGIN + dst_w,
        src_h.max(dst_h) + LABEL_HEIGHT,
    ));
    let Ok(()) = canvas.clear(BACKGROUND);
    let Ok(()) = canvas.draw_iter(bitmap_pixels(source, Point::zero()));
    let cropped_origin = Point::new((src_w + MARGIN) as i32, 0);
    let Ok(()) = canvas.draw_iter(bitmap_pixels(cropped, cropped_origin));

    let window = selection.window;
    let outline = PrimitiveStyleBuilder::new()
        .stroke_color(Rgb888::RED)
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    let Ok(()) = Rectangle::new(
        Point::new(window.x as i32, window.y as i32),
        Size::new(window.width as u32, window.height as u32),
    )
    .into_styled(outline)
    .draw(&mut canvas);

    let label = MonoTextStyle::new(&FONT_4X6, Rgb888::BLACK);
    let Ok(_) = Text::with_baseline(
        &format!("Original {src_w}x{src_h}"),
        Point::new(0, src_h as i32 + 2),
        label,
        Baseline::Top,
    )
    .draw(&mut canvas);
    let Ok(_) = Text::with_baseline(
        &format!(
            "Crop {dst_w}x{dst_h} (top-{} bot-{})",
            selection.removed.top, selection.removed.bottom
        ),
        cropped_origin + Point::new(0, dst_h as i32 + 2),
        label,
        Baseline::Top,
    )
    .draw(&mut canvas);

    canvas.0
}

/// Writes `original_<W>x<H>/<name>.png`, `cropped_<W>x<H>/<name>.png` and
/// `comparison/<name>_crop.png` below `dir`.
pub fn write_previews(dir: &Path, name: &str, conversion: &Conversion) -> Result<(), Error> {
    let source = &conversion.source;
    let cropped = &conversion.cropped;
    let original_dir = dir.join(format!("original_{}x{}", source.width(), source.height()));
    let cropped_dir = dir.join(format!("cropped_{}x{}", cropped.width(), cropped.height()));
    let comparison_dir = dir.join("comparison");
    for dir in [&original_dir, &cropped_dir, &comparison_dir] {
        std::fs::create_dir_all(dir)?;
    }

    to_gray(source).save(original_dir.join(format!("{name}.png")))?;
    to_gray(cropped).save(cropped_dir.join(format!("{name}.png")))?;
    comparison(conversion).save(comparison_dir.join(format!("{name}_crop.png")))?;
    debug!("Wrote previews for {name} to {}", dir.display());
    Ok(())
}
