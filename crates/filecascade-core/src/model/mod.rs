/// Data model for scanned files and their groups.
///
/// Re-exports the record, group and group-set types plus formatting helpers.
pub mod file_record;
pub mod format;
pub mod group;

pub use file_record::FileRecord;
pub use group::{Group, GroupSet, LabelMode};
