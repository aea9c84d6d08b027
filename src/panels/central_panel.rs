use crate::BeadApp;

const DROP_HINT_COLOR: egui::Color32 = egui::Color32::from_rgb(33, 150, 243);

pub fn central_panel(app: &mut BeadApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(app.editor().pattern().title.as_str());

        egui::ScrollArea::both().show(ui, |ui| {
            let size = app.editor().pattern().pixel_size();
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            // Input goes first so this frame already shows its effect
            app.handle_input(ctx, canvas_rect, response.contains_pointer());
            app.paint_pattern(&painter, canvas_rect.min);

            if response.hovered() {
                app.paint_hover(&painter, canvas_rect.min, ctx.pointer_hover_pos());
            }
        });

        if app.is_file_hovering() {
            ui.painter().rect_stroke(
                ui.max_rect(),
                4.0,
                egui::Stroke::new(3.0, DROP_HINT_COLOR),
            );
        }
    });
}
