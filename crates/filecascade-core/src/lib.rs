/// FileCascade Core: scanning, grouping, editing and copying.
///
/// This crate contains all business logic with zero UI dependencies.
/// A front end drives it through [`session::Session`], or uses the
/// individual stages directly.
///
/// # Modules
///
/// - [`extensions`]: parse the user's extension list into a matcher.
/// - [`indexer`]: background directory walk producing time-sorted file records.
/// - [`grouping`]: split records into groups by time gap or fixed count.
/// - [`editor`]: insert/remove/rename groups and move files between them.
/// - [`naming`]: destination folder names for each group.
/// - [`copier`]: background copy of groups into per-group folders.
/// - [`session`]: one interactive session tying the stages together.
/// - [`config`]: defaults and the optional JSON settings file.
/// - [`model`]: file records, groups and display formatting.
pub mod config;
pub mod copier;
pub mod editor;
pub mod error;
pub mod extensions;
pub mod grouping;
pub mod indexer;
pub mod model;
pub mod naming;
pub mod session;

pub use config::Settings;
pub use editor::DragPayload;
pub use error::{ConfigError, InvariantError, ScanError, SessionError, ValidationError};
pub use extensions::ExtensionSet;
pub use session::{JobKind, JobOutcome, JobStatus, Session};
