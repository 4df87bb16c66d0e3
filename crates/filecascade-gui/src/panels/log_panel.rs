/// Process log: the session's timestamped activity lines.
use crate::state::AppState;
use egui::Ui;

pub fn log_panel(ui: &mut Ui, state: &AppState) {
    ui.label(egui::RichText::new("Process Log:").strong());
    egui::ScrollArea::vertical()
        .id_salt("process_log")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in state.session.log_entries() {
                ui.label(egui::RichText::new(entry.to_string()).monospace().size(11.0));
            }
        });
}
