use super::{CellPos, row_offset};
use crate::pattern::Stitch;
use egui::Pos2;

/// Inverse of [`super::cell_top_left`]: the cell under a logical pixel.
///
/// Returns `None` for anything outside `width` x `height`, including the empty
/// half-cell at the end of unstaggered peyote rows. A zero cell size never hits.
pub fn pixel_to_cell(stitch: Stitch, pos: Pos2, cell: u32, width: u32, height: u32) -> Option<CellPos> {
    if cell == 0 || !pos.x.is_finite() || !pos.y.is_finite() {
        return None;
    }
    let size = cell as f32;

    let row = (pos.y / size).floor();
    if row < 0.0 || row >= height as f32 {
        return None;
    }
    let row = row as usize;

    let col = ((pos.x - row_offset(stitch, row, cell)) / size).floor();
    if col < 0.0 || col >= width as f32 {
        return None;
    }

    Some(CellPos::new(row, col as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cell_top_left;
    use egui::vec2;

    #[test]
    fn test_round_trip_every_cell() {
        for stitch in [Stitch::Square, Stitch::Peyote] {
            for cell in [6, 11, 20, 48] {
                for row in 0..5 {
                    for col in 0..5 {
                        let pos = CellPos::new(row, col);
                        let top_left = cell_top_left(stitch, pos, cell);
                        let last = cell as f32 - 0.01;
                        for offset in [vec2(0.0, 0.0), vec2(last, last), vec2(cell as f32 / 2.0, 1.0)] {
                            assert_eq!(
                                pixel_to_cell(stitch, top_left + offset, cell, 5, 5),
                                Some(pos),
                                "{stitch:?} cell={cell} {pos:?} offset={offset:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_misses_outside_grid() {
        let p = |x, y| Pos2::new(x, y);
        assert_eq!(pixel_to_cell(Stitch::Square, p(-0.5, 5.0), 10, 4, 4), None);
        assert_eq!(pixel_to_cell(Stitch::Square, p(5.0, -0.5), 10, 4, 4), None);
        assert_eq!(pixel_to_cell(Stitch::Square, p(40.0, 5.0), 10, 4, 4), None);
        assert_eq!(pixel_to_cell(Stitch::Square, p(5.0, 40.0), 10, 4, 4), None);
    }

    #[test]
    fn test_peyote_gaps_miss() {
        // Left of the staggered row's first cell.
        assert_eq!(pixel_to_cell(Stitch::Peyote, Pos2::new(3.0, 15.0), 10, 4, 4), None);
        // Trailing half-cell of an unstaggered row.
        assert_eq!(pixel_to_cell(Stitch::Peyote, Pos2::new(42.0, 5.0), 10, 4, 4), None);
        // Same x on the staggered row is its last cell.
        assert_eq!(
            pixel_to_cell(Stitch::Peyote, Pos2::new(42.0, 15.0), 10, 4, 4),
            Some(CellPos::new(1, 3))
        );
    }

    #[test]
    fn test_zero_cell_size_never_hits() {
        assert_eq!(pixel_to_cell(Stitch::Square, Pos2::new(0.0, 0.0), 0, 4, 4), None);
    }
}
