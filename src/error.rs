use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("configuration file not found in '{0}'")]
    NotFound(PathBuf),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure while writing a record back out. Reads never produce this; absent
/// or unreadable records degrade to the caller-supplied fallback instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Store(#[from] StoreError),

    // Validation failures surfaced to the caller
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("student '{student}' already belongs to a group in course '{course}'")]
    AlreadyGrouped { student: String, course: String },
}
