use crate::error::ImportError;
use crate::event::LogEventHandler;
use crate::file_handler::{self, FileHandler};
use crate::geometry;
use crate::input::InputHandler;
use crate::panels;
use crate::pattern::Pattern;
use crate::state::{EditorContext, persistence};
use crate::tools::ToolType;

const HOVER_COLOR: egui::Color32 = egui::Color32::from_rgb(33, 150, 243);

pub struct BeadApp {
    editor: EditorContext,
    input: InputHandler,
    files: FileHandler,
    /// Version of the pattern last written to storage
    saved_version: u64,
    /// Shown in a window until dismissed
    notice: Option<String>,
}

impl BeadApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_pattern(persistence::restore(cc.storage))
    }

    pub fn with_pattern(pattern: Pattern) -> Self {
        let mut editor = EditorContext::new(pattern);
        editor.subscribe(Box::new(LogEventHandler));
        Self {
            editor,
            input: InputHandler::new(egui::Rect::NOTHING),
            files: FileHandler::new(),
            saved_version: 0,
            notice: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_file_hovering(&self) -> bool {
        self.files.is_hovering()
    }

    /// Feeds this frame's pointer state for the canvas at `canvas_rect` to the editor.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect, over_canvas: bool) {
        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx, over_canvas) {
            self.editor.handle_input(&event);
        }
    }

    pub fn paint_pattern(&self, painter: &egui::Painter, origin: egui::Pos2) {
        crate::renderer::paint(painter, origin, self.editor.pattern());
    }

    /// Outlines the cell under the pointer.
    pub fn paint_hover(&self, painter: &egui::Painter, origin: egui::Pos2, hover: Option<egui::Pos2>) {
        let pattern = self.editor.pattern();
        let Some(cell) = hover.and_then(|pos| pattern.cell_at((pos - origin).to_pos2())) else {
            return;
        };
        let min = origin + geometry::cell_top_left(pattern.stitch, cell, pattern.cell).to_vec2();
        let rect = egui::Rect::from_min_size(min, egui::Vec2::splat(pattern.cell as f32));
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, HOVER_COLOR));
    }

    /// Replaces the pattern with an imported file. A rejected file leaves the
    /// pattern alone and raises a notice.
    pub fn import(&mut self, source: &str, contents: Result<String, ImportError>) -> bool {
        match contents.and_then(|json| self.editor.import_json(&json)) {
            Ok(()) => {
                log::info!("Imported pattern from {source}");
                self.notice = None;
                true
            }
            Err(err) => {
                self.notice = Some(format!("Could not import {source}: {err}"));
                false
            }
        }
    }

    /// Writes the pattern to storage if it changed since the last save.
    pub fn autosave(&mut self, storage: &mut dyn eframe::Storage) {
        let version = self.editor.version();
        if version == self.saved_version {
            return;
        }
        persistence::autosave(storage, self.editor.pattern());
        self.saved_version = version;
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn import_from_dialog(&mut self) {
        let Some(path) = file_handler::dialogs::pick_pattern_file() else {
            return;
        };
        self.import(&path.display().to_string(), file_handler::read_pattern_file(&path));
    }

    /// Saves the pattern as it is drawn on screen.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_png(&mut self, ctx: &egui::Context) {
        let pattern = self.editor.pattern().clone();
        let name = persistence::export_file_name(&pattern.title, "png");
        let Some(path) = file_handler::dialogs::save_png(&name) else {
            return;
        };
        let max_side = ctx.input(|i| i.max_texture_side);
        let pixels_per_point =
            crate::renderer::fit_pixels_per_point(pattern.pixel_size(), ctx.pixels_per_point(), max_side);
        let result = crate::renderer::export_png(&pattern, pixels_per_point)
            .and_then(|bytes| file_handler::write_export(&path, &bytes));
        if let Err(err) = result {
            log::error!("PNG export failed: {err}");
            self.notice = Some(format!("Could not export {}: {err}", path.display()));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_json(&mut self) {
        let pattern = self.editor.pattern().clone();
        let name = persistence::export_file_name(&pattern.title, "json");
        let Some(path) = file_handler::dialogs::save_json(&name) else {
            return;
        };
        let result = persistence::export_json(&pattern)
            .and_then(|json| file_handler::write_export(&path, json.as_bytes()));
        if let Err(err) = result {
            log::error!("JSON export failed: {err}");
            self.notice = Some(format!("Could not export {}: {err}", path.display()));
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let picked = ctx.input(|i| {
            ToolType::all()
                .iter()
                .copied()
                .find(|tool| i.key_pressed(tool.shortcut()))
        });
        if let Some(tool) = picked {
            self.editor.set_tool(tool);
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.notice else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

impl std::fmt::Debug for BeadApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeadApp")
            .field("editor", &self.editor)
            .field("saved_version", &self.saved_version)
            .field("notice", &self.notice)
            .finish()
    }
}

impl eframe::App for BeadApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.autosave(storage);
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        for dropped in self.files.take_dropped_patterns(ctx) {
            self.import(&dropped.name, dropped.contents);
        }
        self.handle_shortcuts(ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        self.show_notice(ctx);

        if let Some(storage) = frame.storage_mut() {
            self.autosave(storage);
        }
    }
}
