//! Renders bitmaps as LVGL `CF_INDEXED_1BIT` C arrays.
//!
//! Both palettes are emitted behind an `#if <inverted_flag>` switch so the
//! firmware build picks one; the pixel rows are shared.

use core::fmt::{self, Write};

use crate::{
    Bitmap, PaletteConvention,
    codec::{self, PALETTE_SIZE, bytes_per_row},
};

pub const DEFAULT_INVERTED_FLAG: &str = "CONFIG_NICE_OLED_CUSTOM_WIDGET_INVERTED";

pub fn write_image(out: &mut impl Write, name: &str, bitmap: &Bitmap, inverted_flag: &str) -> fmt::Result {
    let upper = name.to_uppercase();
    let buffer = codec::encode(bitmap, PaletteConvention::Standard);
    let row_bytes = bytes_per_row(bitmap.width());

    writeln!(out, "#ifndef LV_ATTRIBUTE_IMG_{upper}")?;
    writeln!(out, "#define LV_ATTRIBUTE_IMG_{upper}")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(
        out,
        "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMG_{upper} uint8_t {name}_map[] = {{"
    )?;
    writeln!(out, "#if {inverted_flag}")?;
    write_palette(&mut *out, PaletteConvention::Inverted)?;
    writeln!(out, "#else")?;
    write_palette(&mut *out, PaletteConvention::Standard)?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    for row in buffer[PALETTE_SIZE..].chunks(row_bytes) {
        out.write_str(" ")?;
        for byte in row {
            write!(out, " 0x{byte:02x},")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "const lv_img_dsc_t {name} = {{")?;
    writeln!(out, "  .header.cf = LV_IMG_CF_INDEXED_1BIT,")?;
    writeln!(out, "  .header.always_zero = 0,")?;
    writeln!(out, "  .header.reserved = 0,")?;
    writeln!(out, "  .header.w = {},", bitmap.width())?;
    writeln!(out, "  .header.h = {},", bitmap.height())?;
    writeln!(out, "  .data_size = {},", buffer.len())?;
    writeln!(out, "  .data = {name}_map,")?;
    writeln!(out, "}};")
}

fn write_palette(out: &mut impl Write, convention: PaletteConvention) -> fmt::Result {
    let palette = convention.palette();
    for (index, color) in [palette.index0, palette.index1].iter().enumerate() {
        writeln!(
            out,
            "        0x{:02x}, 0x{:02x}, 0x{:02x}, 0x{:02x}, /*Color of index {index}*/",
            color.r, color.g, color.b, color.a
        )?;
    }
    Ok(())
}

/// A complete source file: `banner` comment lines, the LVGL include and
/// every image.
pub fn write_art_file<'a>(
    out: &mut impl Write,
    banner: &[&str],
    images: impl IntoIterator<Item = (&'a str, &'a Bitmap)>,
    inverted_flag: &str,
) -> fmt::Result {
    writeln!(out, "/*")?;
    writeln!(out, " *")?;
    for line in banner {
        writeln!(out, " * {line}")?;
    }
    writeln!(out, " *")?;
    writeln!(out, " */")?;
    writeln!(out)?;
    writeln!(out, "#include <lvgl.h>")?;
    for (name, bitmap) in images {
        writeln!(out)?;
        write_image(&mut *out, name, bitmap, inverted_flag)?;
    }
    Ok(())
}
