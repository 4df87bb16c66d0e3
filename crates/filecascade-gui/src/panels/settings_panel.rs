/// Settings panel: source/destination pickers and grouping parameters.
use crate::state::AppState;
use egui::Ui;
use filecascade_core::config::{GROUP_COUNT_RANGE, THRESHOLD_RANGE};

/// Draw the settings rows at the top of the window.
pub fn settings_panel(ui: &mut Ui, state: &mut AppState) {
    let idle = !state.session.is_busy();

    ui.add_enabled_ui(idle, |ui| {
        directory_row(ui, state);
        ui.add_space(4.0);
        grouping_row(ui, state);
        ui.add_space(4.0);
        naming_row(ui, state);
        ui.add_space(4.0);
        extensions_row(ui, state);
    });
}

fn directory_row(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("directories")
        .num_columns(3)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Source:");
            path_field(ui, state.session.source());
            if ui.button("Browse...").clicked() {
                if let Some(path) = pick_folder("Select Source Directory") {
                    state.choose_source(path);
                }
            }
            ui.end_row();

            ui.label("Destination:");
            path_field(ui, state.session.destination());
            if ui.button("Browse...").clicked() {
                if let Some(path) = pick_folder("Select Destination Directory") {
                    state.choose_destination(path);
                }
            }
            ui.end_row();
        });
}

/// Read-only display of a chosen directory.
fn path_field(ui: &mut Ui, path: Option<&std::path::Path>) {
    let mut text = path.map(|p| p.display().to_string()).unwrap_or_default();
    ui.add(
        egui::TextEdit::singleline(&mut text)
            .interactive(false)
            .desired_width(ui.available_width() - 90.0),
    );
}

fn pick_folder(title: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new().set_title(title).pick_folder()
}

fn grouping_row(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let settings = state.session.settings();
        let mut threshold = settings.time_threshold_minutes;
        let mut manual = settings.manual_grouping;
        let mut count = settings.manual_group_count;

        ui.label("Time Threshold (min):");
        if ui
            .add_enabled(
                !manual,
                egui::DragValue::new(&mut threshold).range(THRESHOLD_RANGE),
            )
            .changed()
        {
            state.set_time_threshold(threshold);
        }

        ui.add_space(15.0);
        if ui.checkbox(&mut manual, "Manual Group Count:").changed() {
            state.set_manual_grouping(manual);
        }
        if ui
            .add_enabled(manual, egui::DragValue::new(&mut count).range(GROUP_COUNT_RANGE))
            .changed()
        {
            state.set_manual_group_count(count);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let can_regroup = !state.session.records().is_empty();
            if ui
                .add_enabled(can_regroup, egui::Button::new("Apply Grouping Settings"))
                .on_disabled_hover_text("Scan a source directory first")
                .clicked()
            {
                state.regroup();
            }
        });
    });
}

fn naming_row(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("Default Folder Pattern:");
        let response = ui
            .add(egui::TextEdit::singleline(&mut state.folder_pattern_input).desired_width(200.0))
            .on_hover_text("Pattern for destination folders (use {num})");
        let pattern_changed =
            state.folder_pattern_input != state.session.settings().folder_name_pattern;
        if response.lost_focus() && pattern_changed {
            state.commit_folder_pattern();
        }

        ui.add_space(15.0);
        let mut editing = state.session.settings().title_editing;
        if ui
            .checkbox(&mut editing, "Enable Group Title Editing")
            .on_hover_text("Toggle manual group title editing.")
            .changed()
        {
            state.set_title_editing(editing);
        }
    });
}

fn extensions_row(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("File Extensions:");
        ui.add(
            egui::TextEdit::singleline(&mut state.extensions_input)
                .desired_width(ui.available_width() - 90.0),
        )
        .on_hover_text("Comma-separated list of extensions (e.g., .csv, .txt, .log)");

        let can_scan = state.session.source().is_some();
        if ui
            .add_enabled(can_scan, egui::Button::new("Rescan"))
            .on_disabled_hover_text("Select a source directory first")
            .clicked()
        {
            state.start_scan();
        }
    });
}
