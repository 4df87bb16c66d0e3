/// Bottom status bar: job progress and group statistics.
use crate::state::AppState;
use crate::theme::Palette;
use egui::Ui;
use filecascade_core::model::format::format_count;
use filecascade_core::session::JobKind;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let palette = Palette::for_visuals(ui.visuals());
    let session = &state.session;

    ui.horizontal(|ui| {
        if let Some(status) = session.status() {
            ui.spinner();
            match status.kind {
                JobKind::Scan => {
                    ui.label(
                        egui::RichText::new(format!(
                            "Scanning... {} files",
                            format_count(status.current)
                        ))
                        .size(12.0),
                    );
                    if !status.message.is_empty() {
                        ui.separator();
                        ui.label(
                            egui::RichText::new(truncate_path(&status.message, 60))
                                .size(12.0)
                                .color(palette.text_muted),
                        );
                    }
                }
                JobKind::Copy => {
                    let fraction = status.fraction().unwrap_or(0.0);
                    let total = status.total.unwrap_or(0);
                    ui.add(
                        egui::ProgressBar::new(fraction)
                            .desired_width(240.0)
                            .text(format!("{}/{}", status.current, total)),
                    );
                }
            }
            return;
        }

        let groups = session.groups();
        if groups.is_empty() {
            ui.label(
                egui::RichText::new("Ready")
                    .size(12.0)
                    .color(palette.text_muted),
            );
        } else {
            let empty = groups.groups().iter().filter(|g| g.is_empty()).count();
            ui.label(
                egui::RichText::new(format!(
                    "{} files in {} groups",
                    format_count(groups.total_files() as u64),
                    groups.len()
                ))
                .size(12.0),
            );
            if empty > 0 {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{empty} empty (skipped on copy)"))
                        .size(12.0)
                        .color(palette.warning),
                );
            }
        }

        let errors = session.scan_errors().len();
        if errors > 0 {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{} skipped", format_count(errors as u64)))
                    .size(12.0)
                    .color(palette.warning),
            );
        }
    });
}

/// Shorten `path` to at most `max_chars` characters by replacing the middle
/// with "...".
fn truncate_path(path: &str, max_chars: usize) -> String {
    let count = path.chars().count();
    if count <= max_chars {
        return path.to_string();
    }
    let half = (max_chars.saturating_sub(3)) / 2;
    let head: String = path.chars().take(half).collect();
    let tail: String = path.chars().skip(count - half).collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_paths_are_unchanged() {
        assert_eq!(truncate_path("/a/b.csv", 60), "/a/b.csv");
    }

    #[test]
    fn long_paths_keep_both_ends() {
        let path = format!("/data/{}/run.csv", "x".repeat(100));
        let out = truncate_path(&path, 21);
        assert_eq!(out.chars().count(), 21);
        assert!(out.starts_with("/data/"));
        assert!(out.ends_with("run.csv"));
    }

    #[test]
    fn multibyte_characters_do_not_split() {
        let path = "ä".repeat(50);
        assert_eq!(truncate_path(&path, 11).chars().count(), 11);
    }
}
