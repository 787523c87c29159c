//! Per-row "interest": rows with many edges and an even black/white mix
//! score high, blank or solid rows score low.

use crate::Bitmap;

const TRANSITION_WEIGHT: f64 = 0.7;
const BALANCE_WEIGHT: f64 = 0.3;

pub fn row_scores(bitmap: &Bitmap) -> Vec<f64> {
    bitmap.rows().map(row_score).collect()
}

/// Score of a single row. Set pixels count as black (0.0), clear pixels as
/// white (1.0).
pub fn row_score(row: &[bool]) -> f64 {
    let width = row.len() as f64;
    let transitions = row.windows(2).filter(|pair| pair[0] != pair[1]).count() as f64;
    let white = row.iter().filter(|&&set| !set).count() as f64 / width;
    let black_ratio = 1.0 - white;
    let balance = 1.0 - (black_ratio - 0.5).abs() * 2.0;
    transitions * TRANSITION_WEIGHT + balance * BALANCE_WEIGHT * width
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn blank_and_solid_rows_score_zero() {
        assert!(close(row_score(&[false; 140]), 0.0));
        assert!(close(row_score(&[true; 140]), 0.0));
    }

    #[test]
    fn alternating_row() {
        let row: Vec<bool> = (0..140).map(|x| x % 2 == 0).collect();
        // 139 transitions, perfect balance
        assert!(close(row_score(&row), 139.0 * 0.7 + 0.3 * 140.0));
    }

    #[test]
    fn half_filled_row() {
        let row: Vec<bool> = (0..10).map(|x| x < 5).collect();
        assert!(close(row_score(&row), 0.7 + 3.0));
    }

    #[test]
    fn quarter_filled_row() {
        let row: Vec<bool> = (0..8).map(|x| x < 2).collect();
        // black ratio 0.25 -> balance 0.5
        assert!(close(row_score(&row), 0.7 + 0.5 * 0.3 * 8.0));
    }

    #[test]
    fn single_pixel_row() {
        assert!(close(row_score(&[true]), 0.0));
    }

    #[test]
    fn scores_every_row() {
        let bitmap = Bitmap::from_fn(6, 3, |x, y| y == 1 && x % 2 == 1).unwrap();
        let scores = row_scores(&bitmap);
        assert_eq!(scores.len(), 3);
        assert!(close(scores[0], 0.0));
        assert!(close(scores[1], 5.0 * 0.7 + 0.3 * 6.0));
        assert!(close(scores[2], 0.0));
    }
}
