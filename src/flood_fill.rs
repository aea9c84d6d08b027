use crate::grid::{Cell, Grid};
use std::collections::VecDeque;

/// Replaces the 4-connected region around `(start_row, start_col)` with `target`.
///
/// The seed's current value, empty included, is what the region is made of.
/// Returns `None` when the fill would change nothing: the seed is outside the
/// grid or already holds `target`. Ragged grids are fine; every neighbor is
/// bounds-checked against its own row.
pub fn flood_fill(grid: &Grid, start_row: usize, start_col: usize, target: &Cell) -> Option<Grid> {
    let seed = grid.get(start_row, start_col)?.clone();
    if seed == *target {
        return None;
    }

    let width = grid.max_width();
    let height = grid.height();
    let mut visited = vec![false; width * height];
    let mut queue = VecDeque::new();
    let mut filled = grid.clone();

    visited[start_row * width + start_col] = true;
    queue.push_back((start_row, start_col));

    while let Some((row, col)) = queue.pop_front() {
        filled.set(row, col, target.clone());

        let mut visit = |r: usize, c: usize| {
            let idx = r * width + c;
            if visited[idx] {
                return;
            }
            if grid.get(r, c) == Some(&seed) {
                visited[idx] = true;
                queue.push_back((r, c));
            }
        };

        if row > 0 {
            visit(row - 1, col);
        }
        if row + 1 < height {
            visit(row + 1, col);
        }
        if col > 0 {
            visit(row, col - 1);
        }
        if col + 1 < width {
            visit(row, col + 1);
        }
    }

    log::trace!(
        "flood fill from ({start_row}, {start_col}) visited {} cells",
        visited.iter().filter(|v| **v).count()
    );

    Some(filled)
}
