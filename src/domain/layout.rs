use super::ScriptEntry;
use crate::util::display_width;
use thiserror::Error;

/// Smallest terminal the menu will draw into.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

/// Checkbox or cursor marker plus one separating space.
pub const MARKER_WIDTH: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("terminal is {width}x{height}, needs at least {min_width}x{min_height}")]
    TooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// Column-major grid: entry `i` sits at row `i % rows`, column `i / rows`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: usize,
}

pub fn compute_layout(
    entries: &[ScriptEntry],
    width: u16,
    height: u16,
) -> Result<GridLayout, LayoutError> {
    let cell_width = entries
        .iter()
        .map(|entry| display_width(&entry.file_name))
        .max()
        .unwrap_or(0)
        + MARKER_WIDTH;

    let min_width = u16::try_from(cell_width).unwrap_or(u16::MAX).max(MIN_WIDTH);
    if width < min_width || height < MIN_HEIGHT {
        return Err(LayoutError::TooSmall {
            width,
            height,
            min_width,
            min_height: MIN_HEIGHT,
        });
    }

    let columns = (width as usize / cell_width).max(1);
    let rows = entries.len().div_ceil(columns);
    Ok(GridLayout {
        columns,
        rows,
        cell_width,
    })
}

impl GridLayout {
    /// `(row, column)` of the entry at `index`.
    pub fn position(&self, index: usize) -> (usize, usize) {
        if self.rows == 0 {
            return (0, 0);
        }
        (index % self.rows, index / self.rows)
    }

    /// Number of occupied rows in `column`; always a prefix starting at row 0.
    pub fn rows_in_column(&self, column: usize, len: usize) -> usize {
        len.saturating_sub(column * self.rows).min(self.rows)
    }

    /// Number of occupied columns in `row`; always a prefix starting at column 0.
    pub fn columns_in_row(&self, row: usize, len: usize) -> usize {
        if self.rows == 0 || row >= len {
            return 0;
        }
        (len - row).div_ceil(self.rows)
    }

    /// Cursor index after moving one cell, wrapping at the grid edge.
    pub fn step(&self, index: usize, len: usize, direction: Direction) -> usize {
        if len == 0 || self.rows == 0 || index >= len {
            return index;
        }
        let (row, column) = self.position(index);
        match direction {
            Direction::Up | Direction::Down => {
                let height = self.rows_in_column(column, len);
                let row = wrap(row, height, direction == Direction::Down);
                column * self.rows + row
            }
            Direction::Left | Direction::Right => {
                let width = self.columns_in_row(row, len);
                let column = wrap(column, width, direction == Direction::Right);
                column * self.rows + row
            }
        }
    }
}

fn wrap(value: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        return value;
    }
    if forward {
        (value + 1) % count
    } else {
        (value + count - 1) % count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entries(names: &[&str]) -> Vec<ScriptEntry> {
        names
            .iter()
            .map(|name| ScriptEntry::new(*name, PathBuf::from(name), ""))
            .collect()
    }

    fn numbered(count: usize) -> Vec<ScriptEntry> {
        (0..count)
            .map(|i| ScriptEntry::new(format!("new-{:02}.sh", i), PathBuf::new(), ""))
            .collect()
    }

    #[test]
    fn test_cell_width_reserves_marker() {
        let layout = compute_layout(&entries(&["new-a.sh", "new-long-name.sh"]), 80, 24).unwrap();
        assert_eq!(layout.cell_width, "new-long-name.sh".len() + 4);
    }

    #[test]
    fn test_columns_and_rows() {
        // cell width 13, so 80 / 13 = 6 columns and ceil(10 / 6) = 2 rows.
        let layout = compute_layout(&numbered(10), 80, 24).unwrap();
        assert_eq!(layout.cell_width, 13);
        assert_eq!(layout.columns, 6);
        assert_eq!(layout.rows, 2);
    }

    #[test]
    fn test_layout_is_deterministic_and_covers_entries() {
        for count in 1..40 {
            let items = numbered(count);
            for width in [40u16, 57, 80, 132, 200] {
                let first = compute_layout(&items, width, 30).unwrap();
                let second = compute_layout(&items, width, 30).unwrap();
                assert_eq!(first, second);
                assert!(first.rows * first.columns >= count);
            }
        }
    }

    #[test]
    fn test_column_major_placement() {
        let layout = GridLayout {
            columns: 2,
            rows: 2,
            cell_width: 10,
        };
        assert_eq!(layout.position(0), (0, 0));
        assert_eq!(layout.position(1), (1, 0));
        assert_eq!(layout.position(2), (0, 1));
        assert_eq!(layout.position(3), (1, 1));
        assert_eq!(layout.rows_in_column(1, 4), 2);
        assert_eq!(layout.rows_in_column(1, 3), 1);
    }

    #[test]
    fn test_too_small_terminal() {
        let items = numbered(3);
        assert!(matches!(
            compute_layout(&items, 39, 24),
            Err(LayoutError::TooSmall { .. })
        ));
        assert!(matches!(
            compute_layout(&items, 80, 9),
            Err(LayoutError::TooSmall { .. })
        ));
    }

    #[test]
    fn test_too_narrow_for_one_column() {
        let long_name = "new-".to_string() + &"x".repeat(60) + ".sh";
        let items = entries(&[long_name.as_str()]);
        let err = compute_layout(&items, 60, 24).unwrap_err();
        assert_eq!(
            err,
            LayoutError::TooSmall {
                width: 60,
                height: 24,
                min_width: 71,
                min_height: MIN_HEIGHT,
            }
        );
    }

    #[test]
    fn test_vertical_navigation_wraps_within_column() {
        let layout = GridLayout {
            columns: 2,
            rows: 3,
            cell_width: 10,
        };
        assert_eq!(layout.step(0, 6, Direction::Up), 2);
        assert_eq!(layout.step(2, 6, Direction::Down), 0);
        assert_eq!(layout.step(3, 6, Direction::Up), 5);
        assert_eq!(layout.step(1, 6, Direction::Down), 2);
    }

    #[test]
    fn test_vertical_navigation_in_partial_column() {
        // Second column only holds indices 3 and 4.
        let layout = GridLayout {
            columns: 2,
            rows: 3,
            cell_width: 10,
        };
        assert_eq!(layout.step(3, 5, Direction::Up), 4);
        assert_eq!(layout.step(4, 5, Direction::Down), 3);
    }

    #[test]
    fn test_horizontal_navigation_wraps() {
        let layout = GridLayout {
            columns: 3,
            rows: 2,
            cell_width: 10,
        };
        assert_eq!(layout.step(0, 6, Direction::Right), 2);
        assert_eq!(layout.step(4, 6, Direction::Right), 0);
        assert_eq!(layout.step(0, 6, Direction::Left), 4);
        // Row 1 has no third column when only five entries exist.
        assert_eq!(layout.step(3, 5, Direction::Right), 1);
        assert_eq!(layout.step(1, 5, Direction::Left), 3);
    }

    #[test]
    fn test_single_column_navigation() {
        let layout = compute_layout(&numbered(3), 40, 20).unwrap();
        assert_eq!(layout.columns, 3);
        let narrow = GridLayout {
            columns: 1,
            rows: 3,
            cell_width: 13,
        };
        assert_eq!(narrow.step(1, 3, Direction::Left), 1);
        assert_eq!(narrow.step(1, 3, Direction::Right), 1);
        assert_eq!(narrow.step(0, 3, Direction::Up), 2);
    }
}
