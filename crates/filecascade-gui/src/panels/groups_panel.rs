/// Groups panel: one drop zone per group, files as drag sources.
///
/// Rendering only reads state; every user action is collected as a
/// [`GroupAction`] and applied after the loop, because the rows borrow the
/// group set while they are drawn.
use crate::state::{drag_payload, AppState};
use crate::theme::Palette;
use egui::{Stroke, Ui};
use filecascade_core::editor::DragPayload;
use filecascade_core::model::format::{format_count, format_timestamp};
use filecascade_core::model::LabelMode;
use std::path::PathBuf;

/// An edit requested from the groups panel.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupAction {
    InsertAfter(usize),
    Remove(usize),
    CommitTitle(usize),
    Click { path: PathBuf, additive: bool },
    Drop {
        payload: DragPayload,
        group: usize,
        row: usize,
    },
}

/// Draw the groups panel and apply any resulting edits.
pub fn groups_panel(ui: &mut Ui, state: &mut AppState) {
    let groups = state.session.groups();
    if groups.is_empty() {
        let text = if state.session.is_busy() {
            "Scanning... Please wait."
        } else if state.session.source().is_none() {
            "1. Select Source Directory to scan for files."
        } else {
            "No matching files found."
        };
        ui.add_space(8.0);
        ui.label(egui::RichText::new(text).color(ui.visuals().weak_text_color()));
        return;
    }

    let actions = draw_groups(ui, state);
    for action in actions {
        apply(state, action);
    }
}

fn apply(state: &mut AppState, action: GroupAction) {
    match action {
        GroupAction::InsertAfter(i) => state.insert_group_after(i),
        GroupAction::Remove(i) => state.remove_group(i),
        GroupAction::CommitTitle(i) => state.commit_title(i),
        GroupAction::Click { path, additive } => state.click_file(&path, additive),
        GroupAction::Drop {
            payload,
            group,
            row,
        } => state.drop_files(&payload, group, row),
    }
}

fn draw_groups(ui: &mut Ui, state: &mut AppState) -> Vec<GroupAction> {
    let palette = Palette::for_visuals(ui.visuals());
    let idle = !state.session.is_busy();
    let additive = ui.input(|i| i.modifiers.command);
    let mut actions = Vec::new();

    // Split the borrow: rows read the session while titles are edited in place.
    let AppState {
        session,
        title_buffers,
        selection,
        ..
    } = state;
    let set = session.groups();
    let editable = set.label_mode() == LabelMode::Editable;
    let group_count = set.len();

    egui::ScrollArea::vertical()
        .id_salt("groups")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (gi, group) in set.groups().iter().enumerate() {
                ui.push_id(gi, |ui| {
                    // ── Header ─────────────────────────────────────
                    egui::Frame::new()
                        .fill(palette.group_header)
                        .inner_margin(egui::Margin::symmetric(6, 3))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                if editable {
                                    if let Some(buffer) = title_buffers.get_mut(gi) {
                                        let response = ui.add_enabled(
                                            idle,
                                            egui::TextEdit::singleline(buffer)
                                                .desired_width(240.0),
                                        );
                                        if response.lost_focus() {
                                            actions.push(GroupAction::CommitTitle(gi));
                                        }
                                    }
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "({} files)",
                                            format_count(group.len() as u64)
                                        ))
                                        .color(palette.text_muted),
                                    );
                                } else {
                                    ui.label(egui::RichText::new(group.label.as_str()).strong());
                                }

                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        let can_remove = idle && group_count > 1;
                                        if ui
                                            .add_enabled(
                                                can_remove,
                                                egui::Button::new(
                                                    egui::RichText::new("✖").color(palette.error),
                                                )
                                                .small(),
                                            )
                                            .on_hover_text("Remove this group")
                                            .clicked()
                                        {
                                            actions.push(GroupAction::Remove(gi));
                                        }
                                        if ui
                                            .add_enabled(idle, egui::Button::new("➕").small())
                                            .on_hover_text("Add a new group below")
                                            .clicked()
                                        {
                                            actions.push(GroupAction::InsertAfter(gi));
                                        }
                                    },
                                );
                            });
                        });

                    // ── Files (drop zone) ───────────────────────────
                    let mut insert_row: Option<usize> = None;
                    let zone_frame = egui::Frame::new().inner_margin(4.0);
                    let (zone, dropped) = ui.dnd_drop_zone::<DragPayload, ()>(zone_frame, |ui| {
                        ui.set_min_size(egui::vec2(ui.available_width(), 24.0));
                        if group.is_empty() {
                            ui.label(
                                egui::RichText::new("Drop files here")
                                    .italics()
                                    .color(palette.text_muted),
                            );
                        }
                        for (row, file) in group.files.iter().enumerate() {
                            let selected = selection.contains(&file.path);
                            let payload = drag_payload(set, selection, &file.path);
                            let text = format!(
                                "{}    {}",
                                file.file_name(),
                                format_timestamp(file.modified)
                            );

                            let id = egui::Id::new(("file", &file.path));
                            let source = ui.dnd_drag_source(id, payload, |ui| {
                                ui.add_enabled(idle, egui::SelectableLabel::new(selected, text))
                                    .on_hover_text(file.path.display().to_string())
                            });
                            if source.inner.clicked() {
                                actions.push(GroupAction::Click {
                                    path: file.path.clone(),
                                    additive,
                                });
                            }

                            let rect = source.response.rect;
                            if source.response.dnd_hover_payload::<DragPayload>().is_some() {
                                let pointer_y = ui
                                    .input(|i| i.pointer.interact_pos())
                                    .map_or(rect.center().y, |p| p.y);
                                let (row_at, y) = if pointer_y < rect.center().y {
                                    (row, rect.top())
                                } else {
                                    (row + 1, rect.bottom())
                                };
                                insert_row = Some(row_at);
                                ui.painter().hline(
                                    rect.x_range(),
                                    y,
                                    Stroke::new(2.0, palette.insert_marker),
                                );
                            }
                        }
                    });

                    if zone.response.dnd_hover_payload::<DragPayload>().is_some() {
                        ui.painter().rect_filled(
                            zone.response.rect,
                            2.0,
                            palette.drop_highlight,
                        );
                    }
                    if let Some(payload) = dropped {
                        if idle {
                            actions.push(GroupAction::Drop {
                                payload: (*payload).clone(),
                                group: gi,
                                row: insert_row.unwrap_or(usize::MAX),
                            });
                        }
                    }
                    ui.add_space(6.0);
                });
            }
        });

    actions
}
