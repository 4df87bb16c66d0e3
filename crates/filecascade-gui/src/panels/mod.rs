/// Layout panels composed by [`crate::app::FileCascadeApp`].
pub mod groups_panel;
pub mod log_panel;
pub mod settings_panel;
