//! FileCascade: group files by modification time and copy each group
//! into its own folder.
//!
//! Thin binary entry point. All logic lives in the `filecascade-core`
//! and `filecascade-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use filecascade_core::Settings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("FileCascade starting");

    let settings = Settings::from_env();
    let icon = filecascade_gui::icon::generate_icon(64);
    let state = filecascade_gui::FileCascadeState::build(settings);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("FileCascade")
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_icon(icon),
        ..Default::default()
    };

    eframe::run_native(
        "FileCascade",
        options,
        Box::new(|cc| Ok(Box::new(filecascade_gui::FileCascadeApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
