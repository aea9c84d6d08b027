#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod flood_fill;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod panels;
pub mod pattern;
pub mod renderer;
pub mod state;
pub mod tools;

pub use app::BeadApp;
pub use command::Command;
pub use error::{ExportError, ImportError, TransitionError};
pub use event::{EditorEvent, EventBus, EventHandler, PatternChange};
pub use geometry::CellPos;
pub use grid::{Cell, Grid};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use pattern::{Pattern, PatternRef, Stitch};
pub use renderer::RasterSurface;
pub use state::{EditorContext, EditorState};
pub use tools::ToolType;
