use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};

use crate::{Error, Result};

/// A monochrome pixel grid. `true` is a set bit (foreground, black),
/// `false` is background (white).
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Bitmap {
    /// Creates an all-background bitmap.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::from_fn(width, height, |_, _| false)
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[bool] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks_exact(self.width)
    }

    /// Copies the `width`×`height` region starting at (`x`, `y`).
    ///
    /// Panics if the region does not lie inside the bitmap.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Bitmap> {
        assert!(
            x + width <= self.width && y + height <= self.height,
            "crop {width}x{height}+{x}+{y} exceeds {}x{}",
            self.width,
            self.height
        );
        Bitmap::from_fn(width, height, |cx, cy| self.get(x + cx, y + cy))
    }

    fn set(&mut self, x: i32, y: i32, value: bool) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = value;
    }
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Bitmap {}x{}", self.width, self.height)?;
        for row in self.rows() {
            for &pixel in row {
                f.write_str(if pixel { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set(coord.x, coord.y, color.is_on());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Bitmap::new(0, 4).unwrap_err(),
            Error::InvalidDimensions { width: 0, height: 4 }
        );
        assert!(Bitmap::new(3, 0).is_err());
    }

    #[test]
    fn draw_and_crop() {
        let mut bitmap = Bitmap::new(10, 6).unwrap();
        Rectangle::new(Point::new(2, 1), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut bitmap)
            .unwrap();
        assert!(bitmap.get(2, 1));
        assert!(bitmap.get(4, 2));
        assert!(!bitmap.get(5, 2));
        assert!(!bitmap.get(2, 3));

        let cropped = bitmap.crop(2, 1, 4, 3).unwrap();
        assert_eq!(cropped.width(), 4);
        assert_eq!(cropped.height(), 3);
        assert_eq!(cropped.row(0), &[true, true, true, false]);
        assert_eq!(cropped.row(2), &[false, false, false, false]);
    }

    #[test]
    fn drawing_outside_is_clipped() {
        let mut bitmap = Bitmap::new(4, 4).unwrap();
        Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut bitmap)
            .unwrap();
        assert_eq!(bitmap.rows().filter(|row| row[0]).count(), 2);
        assert!(!bitmap.get(2, 2));
    }

    #[test]
    #[should_panic]
    fn crop_outside_panics() {
        let bitmap = Bitmap::new(4, 4).unwrap();
        let _ = bitmap.crop(1, 0, 4, 4);
    }
}
