use egui::{Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Logical pixels relative to the canvas's top-left corner
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer events of one gesture on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved while the gesture is held, on or off the canvas
    PointerMove { location: InputLocation },
    /// Primary button released
    PointerUp { location: InputLocation },
    /// The pointer went away without a release
    PointerCancel,
}

/// The slice of egui's pointer state the handler looks at each frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    /// Whether the canvas widget is the topmost thing under the pointer
    pub over_canvas: bool,
}

impl PointerSnapshot {
    pub fn from_egui(input: &egui::InputState, over_canvas: bool) -> Self {
        Self {
            pos: input.pointer.latest_pos(),
            pressed: input.pointer.primary_pressed(),
            down: input.pointer.primary_down(),
            released: input.pointer.primary_released(),
            over_canvas,
        }
    }
}

/// Turns per-frame pointer state into gesture events.
///
/// A gesture can only start over the canvas. Once it has, the canvas keeps
/// receiving its moves and its release wherever the pointer goes.
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    captured: bool,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            captured: false,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (e.g. if the pattern was resized or scrolled)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Whether a gesture currently owns the pointer
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    pub fn process_input(&mut self, ctx: &egui::Context, over_canvas: bool) -> Vec<InputEvent> {
        let snapshot = ctx.input(|i| PointerSnapshot::from_egui(i, over_canvas));
        self.translate(snapshot)
    }

    pub fn translate(&mut self, snapshot: PointerSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if !self.captured {
            let start = snapshot
                .pos
                .filter(|pos| snapshot.pressed && snapshot.over_canvas && self.canvas_rect.contains(*pos));
            if let Some(pos) = start {
                self.captured = true;
                events.push(InputEvent::PointerDown {
                    location: self.make_location(pos),
                });
            }
        } else if let Some(pos) = snapshot.pos {
            if Some(pos) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove {
                    location: self.make_location(pos),
                });
            }
        }

        if self.captured && (snapshot.released || !snapshot.down) {
            self.captured = false;
            events.push(match snapshot.pos {
                Some(pos) => InputEvent::PointerUp {
                    location: self.make_location(pos),
                },
                None => InputEvent::PointerCancel,
            });
        }

        self.last_pointer_pos = snapshot.pos;
        events
    }
}
