use crate::BeadApp;
use crate::command::Command;
use crate::components::{Swatch, ToolButton};
use crate::pattern::{self, Stitch};
use crate::renderer::parse_cell_color;
use crate::tools::ToolType;
use egui::color_picker::{Alpha, color_edit_button_srgba};

/// `#rrggbb`, the form the color picker writes into the pattern.
pub fn color_to_hex(color: egui::Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

pub fn tools_panel(app: &mut BeadApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Tools");
                tool_buttons(app, ui);
                ui.separator();

                color_section(app, ui);
                ui.separator();

                pattern_section(app, ui);
                ui.separator();

                #[cfg(not(target_arch = "wasm32"))]
                {
                    file_section(app, ui);
                    ui.separator();
                }

                color_counts(app, ui);
            });
        });
}

fn tool_buttons(app: &mut BeadApp, ui: &mut egui::Ui) {
    let active = app.editor().tool();
    ui.horizontal(|ui| {
        for &tool in ToolType::all() {
            if ToolButton::new(tool, tool == active).show(ui).clicked() {
                log::info!("Tool selected from UI: {}", tool.name());
                app.editor_mut().set_tool(tool);
            }
        }
    });
}

fn color_section(app: &mut BeadApp, ui: &mut egui::Ui) {
    ui.label("Color");
    ui.horizontal(|ui| {
        let current = app.editor().color().to_owned();
        let mut picked = parse_cell_color(&current).unwrap_or(egui::Color32::BLACK);
        if color_edit_button_srgba(ui, &mut picked, Alpha::Opaque).changed() {
            app.editor_mut().set_color(color_to_hex(picked));
        }
        ui.monospace(current.as_str());
    });

    ui.label("Palette");
    let palette = app.editor().pattern().palette.clone();
    let current = app.editor().color().to_owned();
    let mut remove = None;
    ui.horizontal_wrapped(|ui| {
        for (index, color) in palette.iter().enumerate() {
            let response = Swatch::new(color, *color == current).show(ui);
            if response.clicked() {
                app.editor_mut().set_color(color.clone());
            }
            if response.secondary_clicked() {
                remove = Some(index);
            }
        }
    });
    if let Some(index) = remove {
        app.editor_mut().execute(Command::RemoveSwatch(index));
    }
    if ui
        .button("Add current color")
        .on_hover_text("Right-click a swatch to remove it")
        .clicked()
    {
        app.editor_mut().execute(Command::AddSwatch(current));
    }
}

fn pattern_section(app: &mut BeadApp, ui: &mut egui::Ui) {
    let pattern = app.editor().pattern().clone();

    ui.label("Title");
    let mut title = pattern.title.clone();
    if ui.text_edit_singleline(&mut title).changed() {
        app.editor_mut().execute(Command::SetTitle(title));
    }

    egui::Grid::new("pattern_settings_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            // Imported sizes may be out of range; only a user edit clamps them
            let dimension_range = pattern::MIN_DIMENSION..=pattern::MAX_DIMENSION;

            ui.label("Width");
            let mut width = pattern.width;
            let width_changed = ui
                .add(
                    egui::DragValue::new(&mut width)
                        .range(dimension_range.clone())
                        .clamp_existing_to_range(false),
                )
                .changed();
            ui.end_row();

            ui.label("Height");
            let mut height = pattern.height;
            let height_changed = ui
                .add(
                    egui::DragValue::new(&mut height)
                        .range(dimension_range)
                        .clamp_existing_to_range(false),
                )
                .changed();
            ui.end_row();

            if width_changed || height_changed {
                app.editor_mut().execute(Command::Resize { width, height });
            }

            ui.label("Cell size");
            let mut cell = pattern.cell;
            if ui
                .add(
                    egui::DragValue::new(&mut cell)
                        .range(pattern::MIN_CELL_SIZE..=pattern::MAX_CELL_SIZE)
                        .clamp_existing_to_range(false)
                        .suffix(" px"),
                )
                .changed()
            {
                app.editor_mut().execute(Command::SetCellSize(cell));
            }
            ui.end_row();

            ui.label("Stitch");
            ui.horizontal(|ui| {
                for &stitch in Stitch::all() {
                    if ui
                        .selectable_label(pattern.stitch == stitch, stitch.name())
                        .clicked()
                    {
                        app.editor_mut().execute(Command::SetStitch(stitch));
                    }
                }
            });
            ui.end_row();
        });

    if ui.button("Clear").clicked() {
        app.editor_mut().execute(Command::Clear);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn file_section(app: &mut BeadApp, ui: &mut egui::Ui) {
    ui.label("File");
    ui.horizontal_wrapped(|ui| {
        if ui.button("Import…").clicked() {
            app.import_from_dialog();
        }
        if ui.button("Export PNG…").clicked() {
            app.export_png(ui.ctx());
        }
        if ui.button("Export JSON…").clicked() {
            app.export_json();
        }
    });
    ui.small("Pattern files can also be dropped onto the window.");
}

fn color_counts(app: &BeadApp, ui: &mut egui::Ui) {
    let counts = app.editor().pattern().color_counts();
    ui.label(format!("Beads by color ({})", counts.len()));

    egui::Grid::new("color_counts_grid")
        .num_columns(3)
        .spacing([8.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for (color, count) in &counts {
                Swatch::new(color, false).show(ui);
                ui.monospace(color.as_str());
                ui.label(count.to_string());
                ui.end_row();
            }
        });
}
