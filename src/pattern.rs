use crate::flood_fill::flood_fill;
use crate::geometry::{self, CellPos};
use crate::grid::{Cell, Grid};
use egui::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub const MIN_DIMENSION: u32 = 2;
pub const MAX_DIMENSION: u32 = 200;
pub const MIN_CELL_SIZE: u32 = 6;
pub const MAX_CELL_SIZE: u32 = 48;

pub const DEFAULT_TITLE: &str = "Untitled pattern";
pub const DEFAULT_WIDTH: u32 = 20;
pub const DEFAULT_HEIGHT: u32 = 20;
pub const DEFAULT_CELL_SIZE: u32 = 20;

pub const DEFAULT_PALETTE: [&str; 10] = [
    "#000000", "#ffffff", "#e63946", "#f4a261", "#e9c46a", "#2a9d8f", "#264653", "#8ecae6",
    "#9b5de5", "#f15bb5",
];

/// How rows of beads sit relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stitch {
    Square,
    #[default]
    Peyote,
}

impl Stitch {
    pub fn all() -> &'static [Stitch] {
        &[Stitch::Square, Stitch::Peyote]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stitch::Square => "square",
            Stitch::Peyote => "peyote",
        }
    }
}

/// Shared handle to a published pattern. Editors replace it, never write through it.
pub type PatternRef = Arc<Pattern>;

/// The whole bead pattern. Field names match the exported JSON schema.
///
/// Edits never happen in place: every `with_*` method returns a new pattern,
/// and the ones that can be no-ops return `None` instead of an identical copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub cell: u32,
    pub stitch: Stitch,
    pub grid: Grid,
    pub palette: Vec<String>,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell: DEFAULT_CELL_SIZE,
            stitch: Stitch::default(),
            grid: Grid::new(DEFAULT_WIDTH as usize, DEFAULT_HEIGHT as usize),
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
        }
    }
}

pub fn clamp_dimension(value: u32) -> u32 {
    value.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

pub fn clamp_cell_size(value: u32) -> u32 {
    value.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE)
}

impl Pattern {
    /// Logical pixel size of the rendered pattern.
    pub fn pixel_size(&self) -> Vec2 {
        geometry::pattern_pixel_size(self.stitch, self.width, self.height, self.cell)
    }

    /// The cell under a logical pixel, using the declared dimensions.
    pub fn cell_at(&self, pos: egui::Pos2) -> Option<CellPos> {
        geometry::pixel_to_cell(self.stitch, pos, self.cell, self.width, self.height)
    }

    pub fn color_at(&self, pos: CellPos) -> Option<&str> {
        self.grid.get(pos.row, pos.col).and_then(|cell| cell.as_deref())
    }

    /// False for imported patterns whose `width`/`height` disagree with the grid.
    pub fn is_consistent(&self) -> bool {
        self.grid
            .has_dimensions(self.width as usize, self.height as usize)
    }

    /// Paints (or with `None`, erases) one cell.
    ///
    /// `None` if the cell is outside the stored grid or already holds `cell`.
    pub fn with_cell(&self, pos: CellPos, cell: Cell) -> Option<Pattern> {
        let current = self.grid.get(pos.row, pos.col)?;
        if *current == cell {
            return None;
        }
        let mut grid = self.grid.clone();
        grid.set(pos.row, pos.col, cell);
        Some(Pattern { grid, ..self.clone_meta() })
    }

    /// Flood fills the region around `pos` with `color`. `None` when nothing changes.
    pub fn with_fill(&self, pos: CellPos, color: &str) -> Option<Pattern> {
        let grid = flood_fill(&self.grid, pos.row, pos.col, &Some(color.to_owned()))?;
        Some(Pattern { grid, ..self.clone_meta() })
    }

    /// New dimensions, clamped to the editor bounds. Existing beads keep their
    /// positions; columns and rows outside the new size are dropped.
    pub fn with_dimensions(&self, width: u32, height: u32) -> Option<Pattern> {
        let width = clamp_dimension(width);
        let height = clamp_dimension(height);
        if width == self.width && height == self.height && self.is_consistent() {
            return None;
        }
        let grid = self
            .grid
            .resize_width(width as usize)
            .resize_height(height as usize, width as usize);
        Some(Pattern {
            width,
            height,
            grid,
            ..self.clone_meta()
        })
    }

    pub fn with_cell_size(&self, cell: u32) -> Option<Pattern> {
        let cell = clamp_cell_size(cell);
        (cell != self.cell).then(|| Pattern {
            cell,
            grid: self.grid.clone(),
            ..self.clone_meta()
        })
    }

    pub fn with_stitch(&self, stitch: Stitch) -> Option<Pattern> {
        (stitch != self.stitch).then(|| Pattern {
            stitch,
            grid: self.grid.clone(),
            ..self.clone_meta()
        })
    }

    pub fn with_title(&self, title: &str) -> Option<Pattern> {
        (title != self.title).then(|| Pattern {
            title: title.to_owned(),
            grid: self.grid.clone(),
            ..self.clone_meta()
        })
    }

    pub fn with_palette(&self, palette: Vec<String>) -> Option<Pattern> {
        (palette != self.palette).then(|| Pattern {
            palette,
            grid: self.grid.clone(),
            ..self.clone_meta()
        })
    }

    /// Empties every cell, keeping dimensions, stitch, palette and title.
    pub fn cleared(&self) -> Option<Pattern> {
        let grid = Grid::new(self.width as usize, self.height as usize);
        (grid != self.grid).then(|| Pattern { grid, ..self.clone_meta() })
    }

    /// Occurrences of each color, most used first.
    ///
    /// Ties keep whatever order the counting map produced.
    pub fn color_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, _, color) in self.grid.painted_cells() {
            *counts.entry(color).or_default() += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(color, count)| (color.to_owned(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Everything but the grid, which callers supply themselves.
    fn clone_meta(&self) -> Pattern {
        Pattern {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            cell: self.cell,
            stitch: self.stitch,
            grid: Grid::default(),
            palette: self.palette.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Cell {
        Some("#ff0000".to_owned())
    }

    #[test]
    fn test_default_pattern_is_consistent() {
        let pattern = Pattern::default();
        assert!(pattern.is_consistent());
        assert_eq!(pattern.palette.len(), DEFAULT_PALETTE.len());
        assert!(pattern.color_counts().is_empty());
    }

    #[test]
    fn test_with_cell_leaves_original_untouched() {
        let original = Pattern::default();
        let painted = original.with_cell(CellPos::new(0, 0), red()).unwrap();
        assert_eq!(painted.color_at(CellPos::new(0, 0)), Some("#ff0000"));
        assert_eq!(original.color_at(CellPos::new(0, 0)), None);
        assert_eq!(painted.title, original.title);
        assert_eq!(painted.palette, original.palette);
    }

    #[test]
    fn test_with_cell_no_op_and_out_of_bounds() {
        let pattern = Pattern::default().with_cell(CellPos::new(1, 1), red()).unwrap();
        assert!(pattern.with_cell(CellPos::new(1, 1), red()).is_none());
        assert!(pattern.with_cell(CellPos::new(99, 0), red()).is_none());
    }

    #[test]
    fn test_dimensions_are_clamped() {
        let pattern = Pattern::default();
        let tiny = pattern.with_dimensions(0, 1).unwrap();
        assert_eq!((tiny.width, tiny.height), (MIN_DIMENSION, MIN_DIMENSION));
        assert!(tiny.is_consistent());

        let huge = pattern.with_dimensions(5000, 250).unwrap();
        assert_eq!((huge.width, huge.height), (MAX_DIMENSION, MAX_DIMENSION));
        assert!(huge.is_consistent());
    }

    #[test]
    fn test_resize_repairs_inconsistent_import() {
        let mut pattern = Pattern::default();
        pattern.grid = Grid::new(3, 3);
        assert!(!pattern.is_consistent());
        let repaired = pattern
            .with_dimensions(pattern.width, pattern.height)
            .unwrap();
        assert!(repaired.is_consistent());
    }

    #[test]
    fn test_cell_size_is_clamped() {
        let pattern = Pattern::default();
        assert_eq!(pattern.with_cell_size(1).unwrap().cell, MIN_CELL_SIZE);
        assert_eq!(pattern.with_cell_size(100).unwrap().cell, MAX_CELL_SIZE);
        assert!(pattern.with_cell_size(DEFAULT_CELL_SIZE).is_none());
    }

    #[test]
    fn test_cleared_keeps_metadata() {
        let pattern = Pattern::default()
            .with_stitch(Stitch::Square)
            .unwrap()
            .with_cell(CellPos::new(2, 2), red())
            .unwrap();
        let cleared = pattern.cleared().unwrap();
        assert_eq!(cleared.stitch, Stitch::Square);
        assert!(cleared.is_consistent());
        assert!(cleared.color_counts().is_empty());
        assert!(cleared.cleared().is_none());
    }

    #[test]
    fn test_color_counts_descending() {
        let mut pattern = Pattern::default();
        for col in 0..3 {
            pattern = pattern.with_cell(CellPos::new(0, col), red()).unwrap();
        }
        pattern = pattern
            .with_cell(CellPos::new(1, 0), Some("#00ff00".into()))
            .unwrap();
        assert_eq!(
            pattern.color_counts(),
            vec![("#ff0000".to_owned(), 3), ("#00ff00".to_owned(), 1)]
        );
    }

    #[test]
    fn test_stitch_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Stitch::Peyote).unwrap(), r#""peyote""#);
        assert_eq!(
            serde_json::from_str::<Stitch>(r#""square""#).unwrap(),
            Stitch::Square
        );
    }
}
