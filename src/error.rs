use thiserror::Error;

/// The primary error type for fallible operations in this crate.
///
/// Only the settings store can fail: game transitions, the codec and the
/// matcher are infallible by design (unsupported input maps to `None`,
/// wrong answers are ordinary state transitions).
#[derive(Debug, Error)]
pub enum TutorError {
    /// An error originating from I/O on the settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file exists but is not valid JSON.
    #[error("settings file is not valid JSON: {0}")]
    MalformedSettings(#[from] serde_json::Error),

    /// The freshly written settings file could not be moved into place.
    #[error("failed to persist settings atomically: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A convenience `Result` type alias using the crate's `TutorError` type.
pub type Result<T> = std::result::Result<T, TutorError>;
