use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One bead position: a color string, or `None` when no bead is placed.
///
/// Color strings are opaque to the model; only the renderer tries to parse them.
pub type Cell = Option<String>;

/// A row of cells shared between grid versions until one of them writes to it.
pub type Row = Arc<Vec<Cell>>;

/// Row-major table of cells.
///
/// Cloning a grid clones the row handles, not the cells. Writing through
/// [`Grid::set`] copies only the row being written, so an older grid held by a
/// renderer or an autosave never observes the change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// `height` rows of `width` empty cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rows: (0..height).map(|_| empty_row(width)).collect(),
        }
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            rows: rows.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows actually stored.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row. Imported grids may be ragged.
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Writes one cell, copying its row if another grid still shares it.
    ///
    /// Returns false if the position is outside the stored rows.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.rows.get_mut(row) {
            Some(r) if col < r.len() => {
                Arc::make_mut(r)[col] = cell;
                true
            }
            _ => false,
        }
    }

    /// Every row truncated or right-padded with empty cells to `new_width`.
    pub fn resize_width(&self, new_width: usize) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                if row.len() == new_width {
                    Arc::clone(row)
                } else {
                    let mut cells: Vec<Cell> = row.iter().take(new_width).cloned().collect();
                    cells.resize(new_width, None);
                    Arc::new(cells)
                }
            })
            .collect();
        Self { rows }
    }

    /// Rows truncated, or extended with empty rows of `width` cells, to `new_height`.
    pub fn resize_height(&self, new_height: usize, width: usize) -> Self {
        let mut rows: Vec<Row> = self.rows.iter().take(new_height).cloned().collect();
        while rows.len() < new_height {
            rows.push(empty_row(width));
        }
        Self { rows }
    }

    /// True when there are exactly `height` rows of exactly `width` cells.
    pub fn has_dimensions(&self, width: usize, height: usize) -> bool {
        self.rows.len() == height && self.rows.iter().all(|row| row.len() == width)
    }

    /// `(row, col, color)` for every painted cell.
    pub fn painted_cells(&self) -> impl Iterator<Item = (usize, usize, &str)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.as_deref().map(|color| (r, c, color)))
        })
    }
}

fn empty_row(width: usize) -> Row {
    Arc::new(vec![None; width])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(grid: &Grid) -> Vec<(usize, usize, String)> {
        grid.painted_cells()
            .map(|(r, c, color)| (r, c, color.to_owned()))
            .collect()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 2);
        assert!(grid.has_dimensions(3, 2));
        assert_eq!(painted(&grid), vec![]);
    }

    #[test]
    fn test_set_copies_only_the_written_row() {
        let original = Grid::new(4, 3);
        let mut edited = original.clone();
        assert!(edited.set(1, 2, Some("#ff0000".into())));

        assert_eq!(original.get(1, 2), Some(&None));
        assert_eq!(edited.get(1, 2), Some(&Some("#ff0000".to_string())));
        assert!(Arc::ptr_eq(&original.rows()[0], &edited.rows()[0]));
        assert!(!Arc::ptr_eq(&original.rows()[1], &edited.rows()[1]));
    }

    #[test]
    fn test_set_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(2, 2);
        assert!(!grid.set(2, 0, Some("#000".into())));
        assert!(!grid.set(0, 2, Some("#000".into())));
        assert_eq!(grid, Grid::new(2, 2));
    }

    #[test]
    fn test_resize_width_grow_then_shrink() {
        let mut grid = Grid::new(3, 2);
        grid.set(0, 0, Some("a".into()));
        grid.set(1, 2, Some("b".into()));

        let grown = grid.resize_width(5);
        assert!(grown.has_dimensions(5, 2));
        assert_eq!(grown.get(0, 0), Some(&Some("a".to_string())));
        assert_eq!(grown.get(1, 2), Some(&Some("b".to_string())));
        assert_eq!(grown.get(1, 4), Some(&None));
        // Growing and shrinking back loses nothing.
        assert_eq!(grown.resize_width(3), grid);

        let shrunk = grid.resize_width(2);
        assert!(shrunk.has_dimensions(2, 2));
        assert_eq!(painted(&shrunk), vec![(0, 0, "a".to_string())]);

        // Column 2 was dropped by the shrink and does not come back.
        let regrown = shrunk.resize_width(3);
        assert_eq!(regrown.get(1, 2), Some(&None));
    }

    #[test]
    fn test_resize_height_keeps_rows_and_appends_empty_ones() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 1, Some("x".into()));

        let taller = grid.resize_height(4, 2);
        assert!(taller.has_dimensions(2, 4));
        assert_eq!(painted(&taller), vec![(1, 1, "x".to_string())]);

        let shorter = taller.resize_height(1, 2);
        assert!(shorter.has_dimensions(2, 1));
        assert_eq!(painted(&shorter), vec![]);
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let mut grid = Grid::new(2, 1);
        grid.set(0, 1, Some("#123456".into()));
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r##"[[null,"#123456"]]"##);
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
