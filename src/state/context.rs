//! The interaction controller.
//!
//! `EditorContext` owns the published pattern, the current tool and color,
//! and the gesture state. Pointer positions come in as logical pixels relative
//! to the pattern's top-left corner; everything that changes the pattern goes
//! through [`EditorContext::execute`], which publishes a new [`PatternRef`].

use super::EditorState;
use super::persistence;
use crate::command::Command;
use crate::error::{ImportError, TransitionError};
use crate::event::{EditorEvent, EventBus, EventHandler, PatternChange};
use crate::geometry::CellPos;
use crate::input::InputEvent;
use crate::pattern::{Pattern, PatternRef};
use crate::tools::{ToolAction, ToolType};
use egui::Pos2;
use std::sync::Arc;

/// Color selected when the palette is empty.
const FALLBACK_COLOR: &str = "#000000";

#[derive(Debug)]
pub struct EditorContext {
    pattern: PatternRef,
    /// Bumped every time a new pattern is published
    version: u64,
    tool: ToolType,
    color: String,
    state: EditorState,
    event_bus: EventBus,
}

impl EditorContext {
    /// Starts idle with the pencil and the first palette color.
    pub fn new(pattern: Pattern) -> Self {
        let color = pattern
            .palette
            .first()
            .cloned()
            .unwrap_or_else(|| FALLBACK_COLOR.to_owned());
        Self {
            pattern: Arc::new(pattern),
            version: 0,
            tool: ToolType::default(),
            color,
            state: EditorState::Idle,
            event_bus: EventBus::new(),
        }
    }

    /// The current pattern. Holding on to it is safe; later edits publish a new one.
    pub fn pattern(&self) -> &PatternRef {
        &self.pattern
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn tool(&self) -> ToolType {
        self.tool
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Registers a handler for every event from now on.
    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    /// Takes effect from the next gesture.
    pub fn set_tool(&mut self, tool: ToolType) {
        if tool == self.tool {
            return;
        }
        let old = std::mem::replace(&mut self.tool, tool);
        self.event_bus.emit(EditorEvent::ToolChanged { old, new: tool });
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        if color == self.color {
            return;
        }
        self.color = color.clone();
        self.event_bus.emit(EditorEvent::ColorChanged { color });
    }

    /// Applies `command` and publishes the result. Returns false for no-ops,
    /// which publish nothing and leave the version alone.
    pub fn execute(&mut self, command: Command) -> bool {
        let Some(next) = command.apply(&self.pattern) else {
            log::trace!("{} changed nothing", command.name());
            return false;
        };
        if command.change() == PatternChange::Cell {
            log::trace!("{}", command.name());
        } else {
            log::info!("{}", command.name());
        }
        self.publish(next, command.change());
        true
    }

    /// Replaces the pattern with the contents of a pattern file. On error the
    /// current pattern is untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        match persistence::import_pattern(json) {
            Ok(pattern) => {
                self.execute(Command::Replace(Box::new(pattern)));
                Ok(())
            }
            Err(err) => {
                self.event_bus.emit(EditorEvent::ImportRejected {
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { location } => self.pointer_down(location.position),
            InputEvent::PointerMove { location } => self.pointer_move(location.position),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::PointerCancel => self.pointer_cancel(),
        }
    }

    /// Starts a gesture and applies the tool where it started.
    pub fn pointer_down(&mut self, pos: Pos2) {
        let cell = self.pattern.cell_at(pos);
        let gesture = EditorState::Dragging {
            tool: self.tool,
            color: self.color.clone(),
            last_cell: cell,
        };
        if let Err(err) = self.transition_to(gesture) {
            log::debug!("pointer down ignored: {err}");
            return;
        }
        if let Some(cell) = cell {
            let color = self.color.clone();
            self.apply_tool(self.tool, cell, &color);
        }
    }

    /// Re-applies continuous tools when the pointer enters a new cell.
    /// Positions off the grid are ignored but do not end the gesture.
    pub fn pointer_move(&mut self, pos: Pos2) {
        let EditorState::Dragging {
            tool,
            color,
            last_cell,
        } = &mut self.state
        else {
            return;
        };
        if !tool.is_continuous() {
            return;
        }
        let Some(cell) = self.pattern.cell_at(pos) else {
            return;
        };
        if *last_cell == Some(cell) {
            return;
        }
        *last_cell = Some(cell);
        let (tool, color) = (*tool, color.clone());
        self.apply_tool(tool, cell, &color);
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    pub fn pointer_cancel(&mut self) {
        self.end_gesture();
    }

    fn end_gesture(&mut self) {
        if self.state.is_dragging() {
            if let Err(err) = self.transition_to(EditorState::Idle) {
                log::debug!("{err}");
            }
        }
    }

    fn apply_tool(&mut self, tool: ToolType, cell: CellPos, color: &str) {
        log::trace!("{} at {cell:?}", tool.name());
        match tool.apply(cell, &self.pattern, color) {
            Some(ToolAction::Execute(command)) => {
                self.execute(command);
            }
            Some(ToolAction::PickColor(picked)) => self.set_color(picked),
            None => {}
        }
    }

    fn transition_to(&mut self, new_state: EditorState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(TransitionError::InvalidStateTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        let old = std::mem::replace(&mut self.state, new_state);
        self.event_bus.emit(EditorEvent::StateChanged {
            old,
            new: self.state.clone(),
        });
        Ok(())
    }

    fn publish(&mut self, pattern: Pattern, change: PatternChange) {
        self.pattern = Arc::new(pattern);
        self.version += 1;
        self.event_bus.emit(EditorEvent::PatternChanged {
            version: self.version,
            change,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Stitch;
    use egui::pos2;

    fn square_context() -> EditorContext {
        let pattern = Pattern::default()
            .with_stitch(Stitch::Square)
            .unwrap()
            .with_cell_size(10)
            .unwrap();
        EditorContext::new(pattern)
    }

    #[test]
    fn test_starts_with_first_palette_color() {
        let ctx = EditorContext::new(Pattern::default());
        assert_eq!(ctx.color(), "#000000");
        assert_eq!(ctx.tool(), ToolType::Pencil);
        assert!(ctx.state().is_idle());
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let ctx = EditorContext::new(Pattern {
            palette: vec![],
            ..Pattern::default()
        });
        assert_eq!(ctx.color(), FALLBACK_COLOR);
    }

    #[test]
    fn test_no_op_does_not_bump_version() {
        let mut ctx = square_context();
        assert!(!ctx.execute(Command::Erase { pos: CellPos::new(0, 0) }));
        assert_eq!(ctx.version(), 0);
    }

    #[test]
    fn test_pointer_down_off_grid_still_starts_gesture() {
        let mut ctx = square_context();
        ctx.pointer_down(pos2(-5.0, -5.0));
        assert!(ctx.state().is_dragging());
        assert_eq!(ctx.version(), 0);
        ctx.pointer_move(pos2(5.0, 5.0));
        assert_eq!(ctx.pattern().color_at(CellPos::new(0, 0)), Some("#000000"));
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let mut ctx = square_context();
        ctx.pointer_down(pos2(5.0, 5.0));
        ctx.set_color("#ff0000");
        ctx.pointer_down(pos2(15.0, 5.0));
        assert_eq!(ctx.pattern().color_at(CellPos::new(0, 1)), None);
        assert_eq!(ctx.version(), 1);
    }
}
