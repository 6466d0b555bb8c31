use crate::domain::Field;
use thiserror::Error;

/// Errors produced by the semantic version model.
///
/// Parsing and bumping never print or exit; every failure surfaces as one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemverError {
    #[error("invalid semantic version '{0}': expected major.minor.patch")]
    RootFieldCount(String),

    #[error("invalid {field} version '{value}' in '{input}'")]
    RootField {
        field: Field,
        value: String,
        input: String,
    },

    #[error("invalid {field} pre-release version: '{value}'")]
    PreReleaseField { field: Field, value: String },

    #[error("invalid pre-release version '{0}': at most three numeric components are allowed")]
    PreReleaseFieldCount(String),

    #[error("invalid build version '{0}': expected label.number")]
    BuildFieldCount(String),

    #[error("invalid build version, build number is required: {0}")]
    BuildMissingNumber(String),

    #[error("invalid build version, build label must be alphanumeric: {0}")]
    BuildLabel(String),

    #[error("invalid build version, build number must be an integer: {0}")]
    BuildNumber(String),

    #[error("invalid bump strategy: {0}")]
    InvalidStrategy(String),

    #[error("invalid build label '{0}': must be a non-empty alphanumeric string")]
    InvalidBuildLabel(String),

    #[error("label {label} not found in pre-release labels: {labels:?}")]
    LabelNotFound { label: String, labels: Vec<String> },

    #[error("cannot bump beyond the last label {0}")]
    LastLabel(String),

    #[error("no pre-release labels configured")]
    EmptyLabels,

    #[error("cannot bump {field}: {value} is the largest supported value")]
    Overflow { field: String, value: u32 },
}

/// Unified error type for versionbump operations
#[derive(Error, Debug)]
pub enum VersionBumpError {
    #[error(transparent)]
    Semver(#[from] SemverError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Git error: {0}")]
    GitCommand(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("File error: {0}")]
    File(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in versionbump
pub type Result<T> = std::result::Result<T, VersionBumpError>;

impl VersionBumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionBumpError::Config(msg.into())
    }

    /// Create a git command error with context
    pub fn git(msg: impl Into<String>) -> Self {
        VersionBumpError::GitCommand(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        VersionBumpError::Tag(msg.into())
    }

    /// Create a tracked file error with context
    pub fn file(msg: impl Into<String>) -> Self {
        VersionBumpError::File(msg.into())
    }
}
