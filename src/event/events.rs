use crate::state::EditorState;
use crate::tools::ToolType;

/// What kind of edit produced a new pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternChange {
    /// A single cell was painted or erased
    Cell,
    /// A flood fill
    Fill,
    /// Width, height, cell size or stitch changed
    Layout,
    /// Title or palette changed
    Metadata,
    Cleared,
    /// A whole pattern was loaded or imported
    Replaced,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A new pattern was published
    PatternChanged {
        version: u64,
        change: PatternChange,
    },
    ToolChanged {
        old: ToolType,
        new: ToolType,
    },
    ColorChanged {
        color: String,
    },
    StateChanged {
        old: EditorState,
        new: EditorState,
    },
    /// An import was refused; the pattern is unchanged
    ImportRejected {
        reason: String,
    },
}
