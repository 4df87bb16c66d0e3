/// Error taxonomy for the grouping and copy engine.
///
/// Fatal conditions abort a job before (or instead of) doing work and are
/// returned as typed errors. Per-file problems during a scan or copy are
/// not errors in this sense: they are counted and reported through the
/// job's progress channel.
use std::path::PathBuf;
use thiserror::Error;

/// The scan root could not be enumerated. Aborts the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("source directory '{}' does not exist", path.display())]
    RootMissing { path: PathBuf },

    #[error("source path '{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read source directory '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A precondition failed; the job never started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no valid file extensions specified")]
    NoExtensions,

    #[error("manual group count must be at least 1")]
    ZeroGroupCount,

    #[error("mismatch between group data ({groups}) and folder names ({names})")]
    FolderCountMismatch { groups: usize, names: usize },

    #[error("all groups are empty")]
    EmptyGroups,

    #[error("no files have been scanned")]
    NothingScanned,

    #[error("source directory not selected")]
    NoSource,

    #[error("destination directory not selected")]
    NoDestination,

    #[error("destination '{}' does not exist", .0.display())]
    DestinationMissing(PathBuf),
}

/// A group edit would break a GroupSet invariant. The set is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("cannot remove the last group")]
    LastGroup,

    #[error("group index {index} out of range (have {len} groups)")]
    GroupOutOfRange { index: usize, len: usize },

    #[error("file '{}' is not in any group", .0.display())]
    UnknownFile(PathBuf),
}

/// Errors surfaced by [`crate::session::Session`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a scan or copy job is already running")]
    Busy,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error("could not create destination '{}': {source}", path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
