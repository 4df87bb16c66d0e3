/// UI widgets for FileCascade.
pub mod dialogs;
pub mod status_bar;
pub mod toolbar;
