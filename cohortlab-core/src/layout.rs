//! Grid placement for multi-panel figures.

use serde::{Deserialize, Serialize};

/// Which panels show the y-axis label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisLabelPolicy {
    /// Grid figures: only the left column, to avoid repetition.
    LeftColumnOnly,
    /// Dashboard cards: every panel is read on its own.
    EveryPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub y_labels: AxisLabelPolicy,
}

impl GridLayout {
    pub fn new(columns: usize, y_labels: AxisLabelPolicy) -> Self {
        Self {
            columns: columns.max(1),
            y_labels,
        }
    }

    /// `(row, column)` of panel `index`, row-major.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    pub fn rows(&self, panel_count: usize) -> usize {
        panel_count.div_ceil(self.columns)
    }

    pub fn shows_y_label(&self, index: usize) -> bool {
        match self.y_labels {
            AxisLabelPolicy::LeftColumnOnly => self.position(index).1 == 0,
            AxisLabelPolicy::EveryPanel => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_panels_fill_five_rows_of_three() {
        let grid = GridLayout::new(3, AxisLabelPolicy::LeftColumnOnly);
        assert_eq!(grid.rows(15), 5);
        assert_eq!(grid.rows(16), 6);
        assert_eq!(grid.position(7), (2, 1));
    }

    #[test]
    fn left_column_only_labels() {
        let grid = GridLayout::new(3, AxisLabelPolicy::LeftColumnOnly);
        let labelled: Vec<usize> = (0..9).filter(|i| grid.shows_y_label(*i)).collect();
        assert_eq!(labelled, vec![0, 3, 6]);
    }

    #[test]
    fn every_panel_labels() {
        let grid = GridLayout::new(2, AxisLabelPolicy::EveryPanel);
        assert!((0..5).all(|i| grid.shows_y_label(i)));
    }

    #[test]
    fn zero_columns_clamped() {
        let grid = GridLayout::new(0, AxisLabelPolicy::EveryPanel);
        assert_eq!(grid.columns, 1);
        assert_eq!(grid.rows(4), 4);
    }
}
