use crate::command::Command;
use crate::geometry::CellPos;
use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};

/// The editing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolType {
    #[default]
    Pencil,
    Eraser,
    Eyedropper,
    Fill,
}

/// What applying a tool to a cell asks the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    /// Replace the pattern
    Execute(Command),
    /// Make this the current color
    PickColor(String),
}

impl ToolType {
    /// All tools in toolbar order
    pub fn all() -> &'static [ToolType] {
        &[
            ToolType::Pencil,
            ToolType::Eraser,
            ToolType::Eyedropper,
            ToolType::Fill,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolType::Pencil => "pencil",
            ToolType::Eraser => "eraser",
            ToolType::Eyedropper => "eyedropper",
            ToolType::Fill => "fill",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToolType::Pencil => "✏",
            ToolType::Eraser => "⌫",
            ToolType::Eyedropper => "💧",
            ToolType::Fill => "🪣",
        }
    }

    /// Keyboard shortcut that selects this tool
    pub fn shortcut(&self) -> egui::Key {
        match self {
            ToolType::Pencil => egui::Key::P,
            ToolType::Eraser => egui::Key::E,
            ToolType::Eyedropper => egui::Key::I,
            ToolType::Fill => egui::Key::F,
        }
    }

    /// Does this tool apply again on every new cell a drag enters?
    pub fn is_continuous(&self) -> bool {
        matches!(self, ToolType::Pencil | ToolType::Eraser)
    }

    /// What this tool does to `pos`. `None` when there is nothing to do,
    /// e.g. sampling an empty cell.
    pub fn apply(&self, pos: CellPos, pattern: &Pattern, color: &str) -> Option<ToolAction> {
        match self {
            ToolType::Pencil => Some(ToolAction::Execute(Command::Paint {
                pos,
                color: color.to_owned(),
            })),
            ToolType::Eraser => Some(ToolAction::Execute(Command::Erase { pos })),
            ToolType::Eyedropper => pattern
                .color_at(pos)
                .map(|sampled| ToolAction::PickColor(sampled.to_owned())),
            ToolType::Fill => Some(ToolAction::Execute(Command::Fill {
                pos,
                color: color.to_owned(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pencil_and_eraser_are_continuous() {
        let continuous: Vec<_> = ToolType::all()
            .iter()
            .filter(|tool| tool.is_continuous())
            .collect();
        assert_eq!(continuous, vec![&ToolType::Pencil, &ToolType::Eraser]);
    }

    #[test]
    fn test_shortcuts_are_distinct() {
        let keys: std::collections::HashSet<_> =
            ToolType::all().iter().map(|tool| tool.shortcut()).collect();
        assert_eq!(keys.len(), ToolType::all().len());
    }

    #[test]
    fn test_eyedropper_ignores_empty_cells() {
        let pattern = Pattern::default();
        let pos = CellPos::new(0, 0);
        assert_eq!(ToolType::Eyedropper.apply(pos, &pattern, "#000000"), None);

        let pattern = pattern.with_cell(pos, Some("#abcdef".into())).unwrap();
        assert_eq!(
            ToolType::Eyedropper.apply(pos, &pattern, "#000000"),
            Some(ToolAction::PickColor("#abcdef".into()))
        );
    }
}
