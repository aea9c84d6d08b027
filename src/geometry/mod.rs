//! Layout of a pattern in logical pixels.
//!
//! Rendering and hit testing both go through these functions, so a cell is
//! always picked exactly where it is drawn. Everything here works in logical
//! pixels (egui points); scaling to physical pixels is the surface's job.

mod hit_testing;

pub use hit_testing::pixel_to_cell;

use crate::pattern::Stitch;
use egui::{Pos2, Vec2, pos2};
use serde::{Deserialize, Serialize};

/// A grid position, 0-indexed from the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Horizontal shift of a row. Peyote staggers every odd row by half a bead.
pub fn row_offset(stitch: Stitch, row: usize, cell: u32) -> f32 {
    match stitch {
        Stitch::Square => 0.0,
        Stitch::Peyote if row % 2 == 1 => cell as f32 / 2.0,
        Stitch::Peyote => 0.0,
    }
}

pub fn pattern_pixel_width(stitch: Stitch, width: u32, cell: u32) -> f32 {
    let base = width as f32 * cell as f32;
    match stitch {
        Stitch::Square => base,
        // Room for the staggered rows.
        Stitch::Peyote => base + cell as f32 / 2.0,
    }
}

pub fn pattern_pixel_height(height: u32, cell: u32) -> f32 {
    height as f32 * cell as f32
}

pub fn pattern_pixel_size(stitch: Stitch, width: u32, height: u32, cell: u32) -> Vec2 {
    Vec2::new(
        pattern_pixel_width(stitch, width, cell),
        pattern_pixel_height(height, cell),
    )
}

pub fn cell_top_left(stitch: Stitch, pos: CellPos, cell: u32) -> Pos2 {
    pos2(
        pos.col as f32 * cell as f32 + row_offset(stitch, pos.row, cell),
        pos.row as f32 * cell as f32,
    )
}
