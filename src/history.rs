//! Version history recovered from git tag names

use crate::boundary::BoundaryWarning;
use crate::domain::{sort_versions, SemanticVersion, TagPattern};
use crate::error::Result;
use crate::git::Repository;

/// Versions found in tags, newest first, plus the tags that had to be skipped
#[derive(Debug, Clone, Default)]
pub struct TagHistory {
    pub versions: Vec<SemanticVersion>,
    pub warnings: Vec<BoundaryWarning>,
}

impl TagHistory {
    /// The newest version, if any tag carried one
    pub fn latest(&self) -> Option<&SemanticVersion> {
        self.versions.first()
    }
}

/// Read every tag and recover the versions embedded by `template`
///
/// Tags that don't match the template, or whose version part does not parse, are
/// skipped with a warning.
///
/// # Arguments
/// * `repo` - Repository to read tags from
/// * `template` - Tag name template, e.g. "v{new}"
///
/// # Returns
/// * `Ok(TagHistory)` - Versions sorted descending
/// * `Err` - If the template is invalid or tags cannot be listed
pub fn tag_history<R: Repository + ?Sized>(repo: &R, template: &str) -> Result<TagHistory> {
    let pattern = TagPattern::new(template)?;
    let mut history = TagHistory::default();

    for tag in repo.list_tags()? {
        let Some(version) = pattern.extract(&tag) else {
            history.warnings.push(BoundaryWarning::TagMismatchPattern {
                tag,
                pattern: template.to_string(),
            });
            continue;
        };

        match SemanticVersion::parse(version) {
            Ok(version) => history.versions.push(version),
            Err(e) => history.warnings.push(BoundaryWarning::UnparsableTag {
                tag,
                reason: e.to_string(),
            }),
        }
    }

    sort_versions(&mut history.versions);
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_tag_history_sorted_descending() {
        let repo = MockRepository::new()
            .with_tag("v1.0.0")
            .with_tag("v1.1.0-alpha")
            .with_tag("v0.9.0")
            .with_tag("v1.1.0");

        let history = tag_history(&repo, "v{new}").unwrap();
        let versions: Vec<String> = history.versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(versions, vec!["1.1.0", "1.1.0-alpha", "1.0.0", "0.9.0"]);
        assert_eq!(history.latest().unwrap().to_string(), "1.1.0");
        assert!(history.warnings.is_empty());
    }

    #[test]
    fn test_tag_history_skips_foreign_tags() {
        let repo = MockRepository::new()
            .with_tag("v1.0.0")
            .with_tag("nightly")
            .with_tag("v1.x");

        let history = tag_history(&repo, "v{new}").unwrap();
        assert_eq!(history.versions.len(), 1);
        assert_eq!(history.warnings.len(), 2);
        assert!(matches!(
            history.warnings[0],
            BoundaryWarning::TagMismatchPattern { .. }
        ));
        assert!(matches!(
            history.warnings[1],
            BoundaryWarning::UnparsableTag { .. }
        ));
    }

    #[test]
    fn test_tag_history_empty() {
        let history = tag_history(&MockRepository::new(), "v{new}").unwrap();
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_tag_history_invalid_template() {
        assert!(tag_history(&MockRepository::new(), "v{version}").is_err());
    }
}
