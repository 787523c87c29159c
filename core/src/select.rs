use log::{debug, trace};

use crate::{Bitmap, CropConfig, Error, Result, score};

/// Rows at either end of the search range that get penalised.
const EDGE_ROWS: usize = 3;
const TOP_EDGE_PENALTY: f64 = 0.7;
const BOTTOM_EDGE_PENALTY: f64 = 0.8;
/// How fast the position bonus decays per row of distance from the ideal center.
const CENTER_FALLOFF: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropWindow {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CropWindow {
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }
}

/// Pixels cut away on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Margins {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropSelection {
    pub window: CropWindow,
    pub score: f64,
    pub removed: Margins,
}

/// Scores the rows of `bitmap` and picks the best window.
pub fn select(bitmap: &Bitmap, config: &CropConfig) -> Result<CropSelection> {
    if bitmap.width() != config.src_width || bitmap.height() != config.src_height {
        return Err(Error::InvalidDimensions {
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }
    select_window(&score::row_scores(bitmap), config)
}

/// Searches every vertical offset; the horizontal offset is always centered.
///
/// On equal totals the earliest offset wins.
pub fn select_window(row_scores: &[f64], config: &CropConfig) -> Result<CropSelection> {
    config.validate()?;
    if row_scores.len() != config.src_height {
        return Err(Error::ScoreCountMismatch {
            expected: config.src_height,
            actual: row_scores.len(),
        });
    }

    let h_crop = config.horizontal_crop();
    let v_crop = config.vertical_crop();
    let x = h_crop / 2;

    let mut best_y = 0;
    let mut best_score = f64::NEG_INFINITY;
    for y in 0..=v_crop {
        let total = total_score(row_scores, y, config);
        trace!("candidate y={y} total={total:.3}");
        if total > best_score {
            best_score = total;
            best_y = y;
        }
    }

    let window = CropWindow {
        x,
        y: best_y,
        width: config.dst_width,
        height: config.dst_height,
    };
    debug_assert!(window.right() <= config.src_width && window.bottom() <= config.src_height);
    debug!(
        "Selected window {}x{}+{}+{} (score {:.3})",
        window.width, window.height, window.x, window.y, best_score
    );

    Ok(CropSelection {
        window,
        score: best_score,
        removed: Margins {
            top: best_y,
            bottom: v_crop - best_y,
            left: x,
            right: h_crop - x,
        },
    })
}

fn total_score(row_scores: &[f64], y: usize, config: &CropConfig) -> f64 {
    let window_score: f64 = row_scores[y..y + config.dst_height].iter().sum();
    window_score * position_bonus(y, config)
}

fn position_bonus(y: usize, config: &CropConfig) -> f64 {
    let window_center = y as f64 + config.dst_height as f64 / 2.0;
    let distance = (window_center - config.ideal_center()).abs();
    let mut bonus = 1.0 / (1.0 + distance * CENTER_FALLOFF);
    if y < EDGE_ROWS {
        bonus *= TOP_EDGE_PENALTY;
    }
    // y > v_crop - EDGE_ROWS without underflow
    if y + EDGE_ROWS > config.vertical_crop() {
        bonus *= BOTTOM_EDGE_PENALTY;
    }
    bonus
}

#[cfg(test)]
mod test {
    use super::*;

    fn blank(config: &CropConfig) -> Bitmap {
        Bitmap::new(config.src_width, config.src_height).unwrap()
    }

    #[test]
    fn horizontal_offset_is_centered() {
        let config = CropConfig::default();
        let selection = select(&blank(&config), &config).unwrap();
        assert_eq!(selection.window.x, 6);
        assert_eq!(selection.window.right() - selection.window.x, 128);
        assert_eq!(selection.removed.left, 6);
        assert_eq!(selection.removed.right, 6);
    }

    #[test]
    fn odd_horizontal_budget_drops_extra_column_on_the_right() {
        let config = CropConfig {
            src_width: 141,
            ..Default::default()
        };
        let selection = select_window(&[1.0; 68], &config).unwrap();
        assert_eq!(selection.window.x, 6);
        assert_eq!(selection.removed.right, 7);
    }

    #[test]
    fn uniform_image_picks_first_offset() {
        let config = CropConfig::default();
        let selection = select(&blank(&config), &config).unwrap();
        assert_eq!(selection.window.y, 0);
        assert_eq!(selection.score, 0.0);
        assert_eq!(selection.removed.top, 0);
        assert_eq!(selection.removed.bottom, 36);
    }

    #[test]
    fn single_detailed_row_is_centered_near_bias() {
        let config = CropConfig::default();
        let bitmap = Bitmap::from_fn(140, 68, |x, y| y == 20 && x % 2 == 0).unwrap();
        let selection = select(&bitmap, &config).unwrap();
        assert_eq!(selection.window.y, 8);
        assert_eq!(selection.removed.bottom, 28);
        assert!(selection.window.y <= 20 && selection.window.bottom() > 20);
    }

    #[test]
    fn top_rows_are_suppressed() {
        let config = CropConfig::default();
        let scores = [2.5; 68];
        let at_three = total_score(&scores, 3, &config);
        for y in 0..3 {
            assert!(total_score(&scores, y, &config) < at_three, "y={y}");
        }
    }

    #[test]
    fn bottom_rows_are_suppressed() {
        let config = CropConfig {
            vertical_bias: 1.0,
            ..Default::default()
        };
        let scores = [2.5; 68];
        let v_crop = config.vertical_crop();
        let at_edge = total_score(&scores, v_crop - 3, &config);
        for y in v_crop - 2..=v_crop {
            assert!(total_score(&scores, y, &config) < at_edge, "y={y}");
        }
        assert_eq!(select_window(&scores, &config).unwrap().window.y, v_crop - 3);
    }

    #[test]
    fn top_bias_skips_edge_rows() {
        let config = CropConfig {
            vertical_bias: 0.0,
            ..Default::default()
        };
        assert_eq!(select_window(&[1.0; 68], &config).unwrap().window.y, 3);
    }

    #[test]
    fn result_stays_in_bounds() {
        let config = CropConfig::default();
        let scores: Vec<f64> = (0..68).map(|y| ((y * 37) % 11) as f64).collect();
        let selection = select_window(&scores, &config).unwrap();
        assert!(selection.window.y <= 36);
        assert_eq!(selection.removed.top + selection.removed.bottom, 36);
    }

    #[test]
    fn tiny_budgets() {
        let config = CropConfig {
            src_width: 4,
            src_height: 4,
            dst_width: 4,
            dst_height: 3,
            vertical_bias: 0.5,
        };
        let selection = select_window(&[0.0, 1.0, 1.0, 1.0], &config).unwrap();
        assert_eq!(selection.window.y, 1);
        assert_eq!(selection.removed, Margins { top: 1, bottom: 0, left: 0, right: 0 });
    }

    #[test]
    fn invalid_budget() {
        let config = CropConfig {
            dst_width: 200,
            ..Default::default()
        };
        assert!(matches!(
            select_window(&[0.0; 68], &config),
            Err(Error::InvalidCropBudget { .. })
        ));
    }

    #[test]
    fn score_count_must_match() {
        let config = CropConfig::default();
        assert_eq!(
            select_window(&[0.0; 10], &config).unwrap_err(),
            Error::ScoreCountMismatch { expected: 68, actual: 10 }
        );
        let small = Bitmap::new(10, 10).unwrap();
        assert!(matches!(select(&small, &config), Err(Error::InvalidDimensions { .. })));
    }
}
