//! Pente against the computer

use pente::ui::PenteApp;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([860.0, 620.0])
            .with_title("Pente"),
        ..Default::default()
    };

    eframe::run_native(
        "Pente",
        options,
        Box::new(|cc| Ok(Box::new(PenteApp::new(cc)))),
    )
}
