use thiserror::Error;

/// Application-specific error type
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine data directory")]
    NoDataDirectory,

    #[error("A timer is already running or paused")]
    TimerActive,

    #[error("No subject selected")]
    NoSubjectSelected,
}

/// Convenience type alias for Result with StudyError
pub type Result<T> = std::result::Result<T, StudyError>;
