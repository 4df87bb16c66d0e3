/// Top action bar: copy and cancel controls, theme toggle and branding.
use crate::state::AppState;
use egui::Ui;
use filecascade_core::session::JobKind;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("FileCascade")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        let can_copy = state.session.can_copy();
        let copy_btn = ui
            .add_enabled(
                can_copy,
                egui::Button::new("📂 Copy Files to Destination").min_size(egui::vec2(70.0, 28.0)),
            )
            .on_disabled_hover_text(copy_disabled_reason(state));
        if copy_btn.clicked() {
            state.request_copy();
        }

        let running = state.session.active_job();
        let stop_label = match running {
            Some(JobKind::Scan) => "⏹ Stop Scan",
            _ => "⏹ Stop Copy",
        };
        if ui
            .add_enabled(
                running.is_some(),
                egui::Button::new(stop_label).min_size(egui::vec2(70.0, 28.0)),
            )
            .clicked()
        {
            state.cancel_job();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About FileCascade").clicked() {
                state.show_about = true;
            }

            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }

            let errors = state.session.scan_errors().len();
            if errors > 0 {
                ui.separator();
                if ui
                    .button(format!("⚠ {errors} skipped"))
                    .on_hover_text("Show entries skipped during the scan")
                    .clicked()
                {
                    state.show_errors = true;
                }
            }
        });
    });
}

fn copy_disabled_reason(state: &AppState) -> &'static str {
    let session = &state.session;
    if session.is_busy() {
        "Wait for the running job to finish"
    } else if session.destination().is_none() {
        "Select a destination directory first"
    } else {
        "Scan a source directory with matching files first"
    }
}
