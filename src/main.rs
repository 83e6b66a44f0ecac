mod app;
mod color;
mod compose;
mod config;
mod cursor;
mod data;
mod export;
mod state;
mod ui;

use app::FluoroApp;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting fluoro-cursors v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default();
    let state = AppState::from_config(&config).unwrap_or_else(|e| {
        log::error!("Falling back to the built-in cases: {e:#}");
        AppState::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Fluorescence Spectrum Analysis",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(FluoroApp::new(state)))
        }),
    )
}
