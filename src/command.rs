use crate::event::PatternChange;
use crate::geometry::CellPos;
use crate::pattern::{Pattern, Stitch};
use serde::{Deserialize, Serialize};

/// An edit to the pattern.
///
/// Commands never touch the pattern they are applied to: [`Command::apply`]
/// returns the replacement, or `None` when the edit changes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Put a bead of `color` at `pos`
    Paint { pos: CellPos, color: String },
    /// Remove the bead at `pos`
    Erase { pos: CellPos },
    /// Flood fill the region containing `pos`
    Fill { pos: CellPos, color: String },
    /// Change the grid dimensions, keeping existing beads
    Resize { width: u32, height: u32 },
    SetCellSize(u32),
    SetStitch(Stitch),
    SetTitle(String),
    /// Append a swatch to the palette
    AddSwatch(String),
    /// Remove the swatch at an index
    RemoveSwatch(usize),
    SetPalette(Vec<String>),
    /// Empty every cell
    Clear,
    /// Swap in a whole new pattern (import)
    Replace(Box<Pattern>),
}

impl Command {
    pub fn apply(&self, pattern: &Pattern) -> Option<Pattern> {
        match self {
            Command::Paint { pos, color } => pattern.with_cell(*pos, Some(color.clone())),
            Command::Erase { pos } => pattern.with_cell(*pos, None),
            Command::Fill { pos, color } => pattern.with_fill(*pos, color),
            Command::Resize { width, height } => pattern.with_dimensions(*width, *height),
            Command::SetCellSize(cell) => pattern.with_cell_size(*cell),
            Command::SetStitch(stitch) => pattern.with_stitch(*stitch),
            Command::SetTitle(title) => pattern.with_title(title),
            Command::AddSwatch(color) => {
                let mut palette = pattern.palette.clone();
                palette.push(color.clone());
                pattern.with_palette(palette)
            }
            Command::RemoveSwatch(index) => {
                if *index >= pattern.palette.len() {
                    return None;
                }
                let mut palette = pattern.palette.clone();
                palette.remove(*index);
                pattern.with_palette(palette)
            }
            Command::SetPalette(palette) => pattern.with_palette(palette.clone()),
            Command::Clear => pattern.cleared(),
            Command::Replace(replacement) => {
                (**replacement != *pattern).then(|| (**replacement).clone())
            }
        }
    }

    /// Short label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Paint { .. } => "paint",
            Command::Erase { .. } => "erase",
            Command::Fill { .. } => "fill",
            Command::Resize { .. } => "resize",
            Command::SetCellSize(_) => "cell size",
            Command::SetStitch(_) => "stitch",
            Command::SetTitle(_) => "title",
            Command::AddSwatch(_) => "add swatch",
            Command::RemoveSwatch(_) => "remove swatch",
            Command::SetPalette(_) => "palette",
            Command::Clear => "clear",
            Command::Replace(_) => "replace",
        }
    }

    pub fn change(&self) -> PatternChange {
        match self {
            Command::Paint { .. } | Command::Erase { .. } => PatternChange::Cell,
            Command::Fill { .. } => PatternChange::Fill,
            Command::Resize { .. } | Command::SetCellSize(_) | Command::SetStitch(_) => {
                PatternChange::Layout
            }
            Command::SetTitle(_)
            | Command::AddSwatch(_)
            | Command::RemoveSwatch(_)
            | Command::SetPalette(_) => PatternChange::Metadata,
            Command::Clear => PatternChange::Cleared,
            Command::Replace(_) => PatternChange::Replaced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_edits_keep_order_and_duplicates() {
        let pattern = Pattern {
            palette: vec!["#111111".into(), "#222222".into()],
            ..Pattern::default()
        };
        let added = Command::AddSwatch("#111111".into()).apply(&pattern).unwrap();
        assert_eq!(added.palette, vec!["#111111", "#222222", "#111111"]);

        let removed = Command::RemoveSwatch(0).apply(&added).unwrap();
        assert_eq!(removed.palette, vec!["#222222", "#111111"]);

        assert!(Command::RemoveSwatch(5).apply(&removed).is_none());
    }

    #[test]
    fn test_erase_empty_cell_is_no_op() {
        let pattern = Pattern::default();
        assert!(Command::Erase { pos: CellPos::new(0, 0) }.apply(&pattern).is_none());
    }

    #[test]
    fn test_replace_with_identical_pattern_is_no_op() {
        let pattern = Pattern::default();
        assert!(Command::Replace(Box::new(pattern.clone())).apply(&pattern).is_none());
        let other = Pattern {
            title: "Other".into(),
            ..Pattern::default()
        };
        assert_eq!(Command::Replace(Box::new(other.clone())).apply(&pattern), Some(other));
    }
}
