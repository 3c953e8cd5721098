#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod form;
mod generate;
mod toast;

use app::PixelPromptApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size((1000.0, 680.0))
            .with_min_inner_size((480.0, 400.0)),
        ..eframe::NativeOptions::default()
    };

    eframe::run_native(
        PixelPromptApp::name(),
        native_options,
        Box::new(|cc| Ok(Box::new(PixelPromptApp::new(cc)))),
    )
}
