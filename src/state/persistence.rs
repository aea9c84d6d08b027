//! Saving and loading patterns.
//!
//! Autosave and exported files share one JSON format: the [`Pattern`] fields
//! as-is, with empty cells written as `null`.

use crate::error::{ExportError, ImportError};
use crate::pattern::Pattern;

/// Storage key the current pattern is autosaved under.
pub const AUTOSAVE_KEY: &str = "bead-pattern";

/// Parses a pattern file.
///
/// The only hard requirement is a `grid` array; everything else falls back to
/// the starter pattern's values. Width and height are taken as written even if
/// they disagree with the grid, so callers must not index by them blindly.
pub fn import_pattern(json: &str) -> Result<Pattern, ImportError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(ImportError::Parse)?;

    match value.get("grid") {
        None => return Err(ImportError::MissingGrid),
        Some(grid) if !grid.is_array() => return Err(ImportError::GridNotArray),
        Some(_) => {}
    }

    let pattern: Pattern = serde_json::from_value(value).map_err(ImportError::Schema)?;
    if !pattern.is_consistent() {
        log::warn!(
            "imported pattern declares {}x{} but its grid is {}x{}",
            pattern.width,
            pattern.height,
            pattern.grid.max_width(),
            pattern.grid.height()
        );
    }
    Ok(pattern)
}

/// The pattern as a pretty-printed JSON file.
pub fn export_json(pattern: &Pattern) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(pattern)?)
}

/// `<title>.<extension>`, or `pattern.<extension>` for a blank title.
pub fn export_file_name(title: &str, extension: &str) -> String {
    let title = title.trim();
    let stem = if title.is_empty() { "pattern" } else { title };
    format!("{stem}.{extension}")
}

/// Writes the pattern under [`AUTOSAVE_KEY`]. Failures are logged, never raised.
pub fn autosave(storage: &mut dyn eframe::Storage, pattern: &Pattern) {
    match serde_json::to_string(pattern) {
        Ok(json) => {
            storage.set_string(AUTOSAVE_KEY, json);
            storage.flush();
        }
        Err(err) => log::warn!("autosave skipped: {err}"),
    }
}

/// The autosaved pattern, or the starter pattern if there is none or it is unreadable.
pub fn restore(storage: Option<&dyn eframe::Storage>) -> Pattern {
    let Some(json) = storage.and_then(|s| s.get_string(AUTOSAVE_KEY)) else {
        log::info!("no autosaved pattern, starting fresh");
        return Pattern::default();
    };
    match import_pattern(&json) {
        Ok(pattern) => {
            log::info!("restored autosaved pattern {:?}", pattern.title);
            pattern
        }
        Err(err) => {
            log::warn!("discarding unreadable autosave: {err}");
            Pattern::default()
        }
    }
}
