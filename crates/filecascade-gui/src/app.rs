/// Main `eframe::App` implementation for FileCascade.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::AppState;
use crate::theme::Palette;
use crate::widgets;
use filecascade_core::config::Settings;

/// Pre-built application state.
///
/// Construct this before calling `eframe::run_native` so settings are
/// loaded and the session exists when the first frame is drawn.
pub struct FileCascadeState {
    pub(crate) inner: AppState,
}

impl FileCascadeState {
    pub fn build(settings: Settings) -> Self {
        Self {
            inner: AppState::new(settings),
        }
    }
}

/// The FileCascade application.
pub struct FileCascadeApp {
    state: AppState,
}

impl FileCascadeApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: FileCascadeState) -> Self {
        Palette::for_mode(state.inner.dark_mode).apply(&cc.egui_ctx, state.inner.dark_mode);
        Self { state: state.inner }
    }
}

impl eframe::App for FileCascadeApp {
    /// Match the GPU clear colour to the theme background.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if ctx.style().visuals.dark_mode != self.state.dark_mode {
            Palette::for_mode(self.state.dark_mode).apply(ctx, self.state.dark_mode);
        }

        // ── Process background messages ───────────────────────────────────
        let changed = self.state.process_messages();
        if changed {
            ctx.request_repaint();
        }
        if self.state.session.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Settings ──────────────────────────────────────────────────────
        egui::TopBottomPanel::top("settings").show(ctx, |ui| {
            ui.add_space(4.0);
            panels::settings_panel::settings_panel(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Process log ───────────────────────────────────────────────────
        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(160.0)
            .min_height(80.0)
            .max_height(400.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                panels::log_panel::log_panel(ui, &self.state);
            });

        // ── Central panel (groups) ────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::groups_panel::groups_panel(ui, &mut self.state);
        });

        widgets::dialogs::dialogs(ctx, &mut self.state);
    }
}
