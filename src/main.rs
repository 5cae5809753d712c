mod app;
mod editor;
mod model;
mod store;

fn main() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Demarca",
        native_options,
        Box::new(|cc| Ok(Box::new(app::MapApp::new(cc)))),
    )
}
