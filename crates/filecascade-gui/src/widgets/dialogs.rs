/// Modal windows: notices, the create-destination prompt, scan errors and About.
use crate::state::{AppState, NoticeKind};
use crate::theme::Palette;

/// Draw whichever dialogs are currently open.
pub fn dialogs(ctx: &egui::Context, state: &mut AppState) {
    notice_window(ctx, state);
    confirm_destination_window(ctx, state);
    scan_errors_window(ctx, state);
    about_window(ctx, state);
}

fn notice_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(notice) = state.notice.clone() else {
        return;
    };
    let palette = Palette::for_mode(state.dark_mode);
    let (icon, color) = match notice.kind {
        NoticeKind::Info => ("ℹ", palette.accent),
        NoticeKind::Warning => ("⚠", palette.warning),
        NoticeKind::Error => ("✖", palette.error),
    };

    egui::Window::new(notice.title.as_str())
        .id(egui::Id::new("notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icon).size(20.0).color(color));
                ui.label(notice.message.as_str());
            });
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    state.notice = None;
                }
            });
        });
}

fn confirm_destination_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(path) = state.confirm_create_destination.clone() else {
        return;
    };
    let mut answer = None;
    egui::Window::new("Create Directory?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Destination '{}' does not exist. Create?",
                path.display()
            ));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
            });
        });
    if let Some(create) = answer {
        state.answer_create_destination(create);
    }
}

fn scan_errors_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_errors;
    egui::Window::new("Skipped Entries")
        .open(&mut open)
        .default_size([520.0, 300.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("scan_errors")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for (path, message) in state.session.scan_errors() {
                            ui.label(path.as_str());
                            ui.label(
                                egui::RichText::new(message.as_str())
                                    .color(ui.visuals().weak_text_color()),
                            );
                            ui.end_row();
                        }
                    });
            });
        });
    state.show_errors = open;
}

fn about_window(ctx: &egui::Context, state: &mut AppState) {
    let mut show_about = state.show_about;
    egui::Window::new("About FileCascade")
        .open(&mut show_about)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([340.0, 0.0])
        .show(ctx, |ui| {
            let accent = ui.visuals().hyperlink_color;
            let muted = ui.visuals().weak_text_color();

            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("FileCascade")
                        .size(24.0)
                        .strong()
                        .color(accent),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(13.0)
                        .color(muted),
                );
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(
                        "Group files by modification time and copy\n\
                         each group into its own folder.\n\
                         Drag files between groups to adjust.",
                    )
                    .size(12.0),
                );
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Built with Rust & egui")
                        .size(11.0)
                        .color(muted),
                );
                ui.add_space(8.0);
            });
        });
    state.show_about = show_about;
}
