/// Colour scheme for FileCascade.
///
/// Dark and light palettes with semantically named colours, so panels
/// reference `palette.drop_highlight` rather than raw hex codes.
use egui::{Color32, Stroke, Visuals};

/// Semantic colour palette.
pub struct Palette {
    pub background: Color32,
    pub surface: Color32,
    pub surface_hover: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub success: Color32,
    pub separator: Color32,
    pub selection: Color32,
    pub group_header: Color32,
    /// Fill of a group while a drag hovers over it.
    pub drop_highlight: Color32,
    /// Line drawn where dropped files will be inserted.
    pub insert_marker: Color32,
}

impl Palette {
    /// Dark palette, the default.
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(0x1e, 0x1e, 0x2e),
            surface: Color32::from_rgb(0x2a, 0x2a, 0x3c),
            surface_hover: Color32::from_rgb(0x35, 0x35, 0x4a),
            text_primary: Color32::from_rgb(0xe4, 0xe4, 0xe8),
            text_muted: Color32::from_rgb(0x6c, 0x70, 0x86),
            accent: Color32::from_rgb(0x6b, 0xa8, 0xff),
            error: Color32::from_rgb(0xf3, 0x8b, 0xa8),
            warning: Color32::from_rgb(0xfa, 0xb3, 0x87),
            success: Color32::from_rgb(0xa6, 0xe3, 0xa1),
            separator: Color32::from_rgb(0x3a, 0x3a, 0x50),
            selection: Color32::from_rgb(0x28, 0x3a, 0x5c),
            group_header: Color32::from_rgb(0x22, 0x22, 0x34),
            drop_highlight: Color32::from_rgba_premultiplied(0x20, 0x38, 0x60, 0x60),
            insert_marker: Color32::from_rgb(0x6b, 0xa8, 0xff),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(0xf5, 0xf5, 0xf5),
            surface: Color32::from_rgb(0xff, 0xff, 0xff),
            surface_hover: Color32::from_rgb(0xe8, 0xe8, 0xef),
            text_primary: Color32::from_rgb(0x1e, 0x1e, 0x2e),
            text_muted: Color32::from_rgb(0x8a, 0x8a, 0x9a),
            accent: Color32::from_rgb(0x3a, 0x70, 0xe0),
            error: Color32::from_rgb(0xd0, 0x40, 0x50),
            warning: Color32::from_rgb(0xd0, 0x80, 0x20),
            success: Color32::from_rgb(0x30, 0x98, 0x30),
            separator: Color32::from_rgb(0xd0, 0xd0, 0xd8),
            selection: Color32::from_rgba_premultiplied(0x3a, 0x70, 0xe0, 0x30),
            group_header: Color32::from_rgb(0xe8, 0xe8, 0xf0),
            drop_highlight: Color32::from_rgba_premultiplied(0x3a, 0x70, 0xe0, 0x20),
            insert_marker: Color32::from_rgb(0x3a, 0x70, 0xe0),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Palette matching the visuals currently in effect.
    pub fn for_visuals(visuals: &Visuals) -> Self {
        Self::for_mode(visuals.dark_mode)
    }

    /// Apply this palette to an egui context.
    pub fn apply(&self, ctx: &egui::Context, dark_mode: bool) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = if dark_mode {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.extreme_bg_color = self.background;
        visuals.faint_bg_color = self.surface;
        visuals.hyperlink_color = self.accent;
        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.widgets.noninteractive.bg_fill = self.surface;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.hovered.bg_fill = self.surface_hover;
        visuals.widgets.active.bg_fill = self.accent;
        visuals.window_stroke = Stroke::new(1.0, self.separator);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        ctx.set_style(style);
    }
}
