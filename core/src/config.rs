use crate::{Error, Result};

/// Source and destination geometry plus the vertical placement preference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropConfig {
    pub src_width: usize,
    pub src_height: usize,
    pub dst_width: usize,
    pub dst_height: usize,
    /// Where the crop should be centered: 0.0 top, 0.5 middle, 1.0 bottom.
    pub vertical_bias: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            src_width: 140,
            src_height: 68,
            dst_width: 128,
            dst_height: 32,
            vertical_bias: 0.35,
        }
    }
}

impl CropConfig {
    pub fn validate(&self) -> Result<()> {
        if self.src_width == 0 || self.src_height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.src_width,
                height: self.src_height,
            });
        }
        if self.dst_width == 0 || self.dst_height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.dst_width,
                height: self.dst_height,
            });
        }
        if self.dst_width > self.src_width || self.dst_height > self.src_height {
            return Err(Error::InvalidCropBudget {
                src_width: self.src_width,
                src_height: self.src_height,
                dst_width: self.dst_width,
                dst_height: self.dst_height,
            });
        }
        if !self.vertical_bias.is_finite() {
            return Err(Error::InvalidBias(self.vertical_bias));
        }
        Ok(())
    }

    /// Columns removed in total. Only meaningful on a validated config.
    pub fn horizontal_crop(&self) -> usize {
        self.src_width - self.dst_width
    }

    /// Rows removed in total. Only meaningful on a validated config.
    pub fn vertical_crop(&self) -> usize {
        self.src_height - self.dst_height
    }

    pub fn ideal_center(&self) -> f64 {
        self.vertical_bias * self.src_height as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = CropConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.horizontal_crop(), 12);
        assert_eq!(config.vertical_crop(), 36);
        assert!((config.ideal_center() - 23.8).abs() < 1e-9);
    }

    #[test]
    fn rejects_growing() {
        let config = CropConfig {
            dst_width: 141,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidCropBudget {
                src_width: 140,
                src_height: 68,
                dst_width: 141,
                dst_height: 32,
            })
        );
        let config = CropConfig {
            dst_height: 69,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidCropBudget { .. })));
    }

    #[test]
    fn rejects_degenerate() {
        let config = CropConfig {
            dst_height: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidDimensions { width: 128, height: 0 })
        );
        let config = CropConfig {
            vertical_bias: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidBias(_))));
    }
}
