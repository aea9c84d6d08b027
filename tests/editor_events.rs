use bead_pattern::{EditorContext, EditorEvent, EditorState, EventHandler, Pattern, PatternChange, ToolType};
use egui::pos2;
use std::cell::RefCell;
use std::rc::Rc;

// Handler that records every event it sees
struct Recorder(Rc<RefCell<Vec<EditorEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

fn recorded_context() -> (EditorContext, Rc<RefCell<Vec<EditorEvent>>>) {
    let mut ctx = EditorContext::new(Pattern::default());
    let events = Rc::new(RefCell::new(Vec::new()));
    ctx.subscribe(Box::new(Recorder(Rc::clone(&events))));
    (ctx, events)
}

#[test]
fn test_click_emits_gesture_and_change_events() {
    let (mut ctx, events) = recorded_context();
    ctx.pointer_down(pos2(5.0, 5.0));
    ctx.pointer_up();

    let gesture = EditorState::Dragging {
        tool: ToolType::Pencil,
        color: "#000000".into(),
        last_cell: Some(bead_pattern::CellPos::new(0, 0)),
    };
    assert_eq!(
        *events.borrow(),
        vec![
            EditorEvent::StateChanged {
                old: EditorState::Idle,
                new: gesture.clone(),
            },
            EditorEvent::PatternChanged {
                version: 1,
                change: PatternChange::Cell,
            },
            EditorEvent::StateChanged {
                old: gesture,
                new: EditorState::Idle,
            },
        ]
    );
}

#[test]
fn test_no_op_edits_emit_nothing() {
    let (mut ctx, events) = recorded_context();
    ctx.set_tool(ToolType::Pencil);
    ctx.set_color("#000000");
    ctx.execute(bead_pattern::Command::Clear);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_eyedropper_emits_color_change() {
    let (mut ctx, events) = recorded_context();
    ctx.set_color("#123456");
    ctx.pointer_down(pos2(5.0, 5.0));
    ctx.pointer_up();
    ctx.set_tool(ToolType::Eyedropper);
    ctx.set_color("#ffffff");
    events.borrow_mut().clear();

    ctx.pointer_down(pos2(5.0, 5.0));
    assert!(events.borrow().contains(&EditorEvent::ColorChanged {
        color: "#123456".into(),
    }));
}

#[test]
fn test_rejected_import_is_announced() {
    let (mut ctx, events) = recorded_context();
    assert!(ctx.import_json(r#"{"grid": "x"}"#).is_err());
    assert!(matches!(
        events.borrow().as_slice(),
        [EditorEvent::ImportRejected { .. }]
    ));
}

#[test]
fn test_layout_changes_are_tagged() {
    let (mut ctx, events) = recorded_context();
    ctx.execute(bead_pattern::Command::Resize { width: 30, height: 20 });
    ctx.execute(bead_pattern::Command::SetTitle("Beads".into()));
    assert_eq!(
        *events.borrow(),
        vec![
            EditorEvent::PatternChanged {
                version: 1,
                change: PatternChange::Layout,
            },
            EditorEvent::PatternChanged {
                version: 2,
                change: PatternChange::Metadata,
            },
        ]
    );
}
