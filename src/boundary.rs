use std::fmt;

/// Non-fatal issues found while reading tags or preparing git operations.
/// These are reported to the user but never abort a command.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// Tag exists but doesn't match the configured pattern
    TagMismatchPattern { tag: String, pattern: String },
    /// Git signs commits or tags by default but the configuration does not ask for it
    SigningEnabledByDefault,
    /// HEAD does not point at a branch
    DetachedHead,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::TagMismatchPattern { tag, pattern } => {
                write!(f, "Tag '{}' does not match pattern '{}'", tag, pattern)
            }
            BoundaryWarning::SigningEnabledByDefault => write!(
                f,
                "Git signs commits or tags by default, but git-sign is disabled in the configuration; the version commit and tag will not be signed"
            ),
            BoundaryWarning::DetachedHead => {
                write!(f, "HEAD is detached; the version commit will not be on a branch")
            }
        }
    }
}
