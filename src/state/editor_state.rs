//! Gesture state machine for pointer interaction on the canvas.
//!
//! ```text
//!  ┌──────┐  pointer down   ┌──────────┐
//!  │ Idle ├────────────────►│ Dragging │◄─┐ pointer move
//!  │      │◄────────────────┤          ├──┘
//!  └──────┘  up / cancel    └──────────┘
//! ```
//!
//! `Dragging` carries the tool and color that were current when the gesture
//! started, so changing either mid-drag does not affect the gesture.
use crate::geometry::CellPos;
use crate::tools::ToolType;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    /// No gesture in progress
    #[default]
    Idle,
    /// A pointer is held down on the canvas
    Dragging {
        tool: ToolType,
        color: String,
        /// The last cell the tool was applied to, `None` until the pointer
        /// first resolves to a cell
        last_cell: Option<CellPos>,
    },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, EditorState::Dragging { .. }) => true,
            (EditorState::Dragging { .. }, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Dragging { .. } => "Dragging",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorState::Dragging { .. })
    }

    /// The tool of the gesture in progress
    pub fn gesture_tool(&self) -> Option<ToolType> {
        match self {
            EditorState::Dragging { tool, .. } => Some(*tool),
            EditorState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragging() -> EditorState {
        EditorState::Dragging {
            tool: ToolType::Pencil,
            color: "#000000".into(),
            last_cell: None,
        }
    }

    #[test]
    fn test_transitions() {
        assert!(EditorState::Idle.can_transition_to(&dragging()));
        assert!(dragging().can_transition_to(&EditorState::Idle));
        assert!(!dragging().can_transition_to(&dragging()));
        assert!(!EditorState::Idle.can_transition_to(&EditorState::Idle));
    }

    #[test]
    fn test_gesture_tool() {
        assert_eq!(EditorState::Idle.gesture_tool(), None);
        assert_eq!(dragging().gesture_tool(), Some(ToolType::Pencil));
    }
}
