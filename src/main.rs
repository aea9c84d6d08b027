#![warn(clippy::all, rust_2018_idioms)]

use bead_pattern::BeadApp;
use eframe::NativeOptions;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("bead_pattern=info"))
        .init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Bead Pattern"),
        ..Default::default()
    };

    eframe::run_native(
        "Bead Pattern",
        options,
        Box::new(|cc| Ok(Box::new(BeadApp::new(cc)))),
    )
}
