use crate::tools::ToolType;
use eframe::egui;

const BUTTON_SIZE: f32 = 32.0;
const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgb(100, 181, 246);
const SELECTED_BORDER: egui::Color32 = egui::Color32::from_rgb(33, 150, 243);

/// Square icon button for one tool
pub struct ToolButton {
    pub tool: ToolType,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: ToolType, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(BUTTON_SIZE, BUTTON_SIZE), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                SELECTED_FILL
            } else if response.hovered() {
                egui::Color32::from_gray(40)
            } else {
                egui::Color32::from_gray(30)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(20.0),
                text_color,
            );

            if self.selected {
                ui.painter()
                    .rect_stroke(rect, 4.0, egui::Stroke::new(2.0, SELECTED_BORDER));
            }
        }

        response.on_hover_text(format!("{} ({:?})", self.tool.name(), self.tool.shortcut()))
    }
}

/// A clickable color sample. Colors that don't parse show as a crossed-out box.
pub struct Swatch<'a> {
    pub color: &'a str,
    pub selected: bool,
}

impl<'a> Swatch<'a> {
    pub fn new(color: &'a str, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let size = egui::vec2(22.0, 22.0);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            match crate::renderer::parse_cell_color(self.color) {
                Some(fill) => {
                    painter.rect_filled(rect, 2.0, fill);
                }
                None => {
                    let stroke = egui::Stroke::new(1.0, egui::Color32::GRAY);
                    painter.line_segment([rect.left_top(), rect.right_bottom()], stroke);
                }
            }
            let border = if self.selected {
                egui::Stroke::new(2.0, SELECTED_BORDER)
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_gray(90))
            };
            painter.rect_stroke(rect, 2.0, border);
        }

        response.on_hover_text(self.color)
    }
}
