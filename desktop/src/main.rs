mod app;
mod storage;

use app::ArithmeticApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 520.0])
            .with_min_inner_size([360.0, 460.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Arithmetic Practice",
        options,
        Box::new(|cc| Ok(Box::new(ArithmeticApp::new(cc)))),
    )
}
