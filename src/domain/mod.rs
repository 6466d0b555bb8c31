//! Semantic version model - pure value types independent of git and the filesystem

pub mod build;
pub mod prerelease;
pub mod semantic;
pub mod strategy;
pub mod tag;
pub mod version;

pub use build::BuildMetadata;
pub use prerelease::{PreReleasePart, PreReleaseVersion};
pub use semantic::SemanticVersion;
pub use strategy::BumpStrategy;
pub use tag::TagPattern;
pub use version::{Field, RootVersion};

use crate::error::SemverError;

/// Check whether `s` parses as a semantic version
pub fn validate_sem_version(s: &str) -> bool {
    SemanticVersion::parse(s).is_ok()
}

/// Every label must be a non-empty ASCII alphabetic string
pub fn validate_pre_release_labels(labels: &[String]) -> bool {
    labels.iter().all(|label| is_alphabetic(label))
}

/// The build label must be a non-empty ASCII alphanumeric string
pub fn validate_build_label(label: &str) -> bool {
    is_alphanumeric(label)
}

/// Sort versions in place, newest first
pub fn sort_versions(versions: &mut [SemanticVersion]) {
    versions.sort_by(|a, b| b.cmp(a));
}

/// Sorted copy of the label progression
pub(crate) fn sorted_labels(labels: &[String]) -> Result<Vec<String>, SemverError> {
    if labels.is_empty() {
        return Err(SemverError::EmptyLabels);
    }
    let mut sorted = labels.to_vec();
    sorted.sort();
    Ok(sorted)
}

fn is_alphabetic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}
