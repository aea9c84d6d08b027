mod context;
mod editor_state;
pub mod persistence;

pub use context::EditorContext;
pub use editor_state::EditorState;
