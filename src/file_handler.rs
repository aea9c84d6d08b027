//! Getting pattern files in and out of the app: drag-and-drop and native
//! file dialogs.

use crate::error::{ExportError, ImportError};
use eframe::egui;
use std::path::Path;

/// A file dropped onto the window, read as text.
#[derive(Debug)]
pub struct DroppedPattern {
    pub name: String,
    pub contents: Result<String, ImportError>,
}

#[derive(Debug, Default)]
pub struct FileHandler {
    hovering: bool,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether files are currently being dragged over the window
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Collects the pattern files dropped this frame. Anything that isn't
    /// JSON is logged and skipped.
    pub fn take_dropped_patterns(&mut self, ctx: &egui::Context) -> Vec<DroppedPattern> {
        let (hovering, dropped) =
            ctx.input(|i| (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone()));
        self.hovering = hovering;

        dropped
            .iter()
            .filter_map(|file| {
                let name = dropped_file_name(file);
                if !is_pattern_file(file) {
                    log::warn!("Dropped file is not a pattern file: {name}");
                    return None;
                }
                log::info!("Importing dropped file {name}");
                Some(DroppedPattern {
                    contents: read_dropped_file(file),
                    name,
                })
            })
            .collect()
    }
}

fn dropped_file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn is_pattern_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime == "application/json"
    } else if let Some(path) = &file.path {
        has_extension(path, "json")
    } else {
        has_extension(Path::new(&file.name), "json")
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}

fn read_dropped_file(file: &egui::DroppedFile) -> Result<String, ImportError> {
    if let Some(bytes) = &file.bytes {
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    }
    match &file.path {
        Some(path) => read_pattern_file(path),
        None => Err(ImportError::Read(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "dropped file has no accessible data",
        ))),
    }
}

pub fn read_pattern_file(path: &Path) -> Result<String, ImportError> {
    Ok(std::fs::read_to_string(path)?)
}

/// Writes through a temporary file next to `path` so a failed write never
/// leaves a truncated export behind.
pub fn write_export(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("bead-pattern");
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));
    std::fs::write(&temp_path, contents)?;

    std::fs::rename(&temp_path, path).or_else(|rename_err| {
        if path.exists() {
            std::fs::remove_file(path)?;
            std::fs::rename(&temp_path, path)
        } else {
            Err(rename_err)
        }
    })?;
    log::info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Native open/save dialogs
#[cfg(not(target_arch = "wasm32"))]
pub mod dialogs {
    use rfd::FileDialog;
    use std::path::PathBuf;

    pub fn pick_pattern_file() -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Import pattern")
            .add_filter("Bead pattern", &["json"])
            .pick_file()
    }

    pub fn save_png(default_name: &str) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Export PNG")
            .add_filter("PNG image", &["png"])
            .set_file_name(default_name)
            .save_file()
    }

    pub fn save_json(default_name: &str) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Export pattern")
            .add_filter("Bead pattern", &["json"])
            .set_file_name(default_name)
            .save_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(name: &str, mime: &str) -> egui::DroppedFile {
        egui::DroppedFile {
            name: name.to_owned(),
            mime: mime.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_only_json_counts_as_pattern_file() {
        assert!(is_pattern_file(&dropped("daisy.json", "")));
        assert!(is_pattern_file(&dropped("DAISY.JSON", "")));
        assert!(is_pattern_file(&dropped("blob", "application/json")));
        assert!(!is_pattern_file(&dropped("daisy.png", "")));
        assert!(!is_pattern_file(&dropped("daisy.json", "image/png")));
    }

    #[test]
    fn test_dropped_bytes_are_read_as_text() {
        let file = egui::DroppedFile {
            name: "p.json".into(),
            bytes: Some(std::sync::Arc::from(&b"{\"grid\": []}"[..])),
            ..Default::default()
        };
        assert_eq!(read_dropped_file(&file).unwrap(), "{\"grid\": []}");
        assert!(matches!(
            read_dropped_file(&dropped("p.json", "")),
            Err(ImportError::Read(_))
        ));
    }

    #[test]
    fn test_write_export_replaces_existing_file() {
        let dir = std::env::temp_dir().join(format!("bead-pattern-test-{}", std::process::id()));
        let path = dir.join("out.json");
        write_export(&path, b"first").unwrap();
        write_export(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert!(!dir.join(".out.json.tmp").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
