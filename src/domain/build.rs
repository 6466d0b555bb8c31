//! Build metadata (`+label.N`) attached to a semantic version.

use crate::error::SemverError;
use std::fmt;

/// Build metadata: a fixed label and a monotonically increasing counter
///
/// Ordered by label first, then by index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildMetadata {
    label: String,
    index: u32,
}

impl BuildMetadata {
    /// Create build metadata
    pub fn new(label: impl Into<String>, index: u32) -> Self {
        BuildMetadata {
            label: label.into(),
            index,
        }
    }

    /// Parse build metadata of the form `label.index`
    ///
    /// # Returns
    /// * `Ok(None)` - For an empty string
    /// * `Ok(Some(BuildMetadata))` - Parsed build metadata
    /// * `Err` - If the string is not exactly `label.index` with an alphanumeric label
    ///   and an integer index
    pub fn parse(s: &str) -> Result<Option<Self>, SemverError> {
        if s.is_empty() {
            return Ok(None);
        }

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 2 {
            return Err(SemverError::BuildFieldCount(s.to_string()));
        }
        if parts[1].is_empty() {
            return Err(SemverError::BuildMissingNumber(s.to_string()));
        }
        if !super::is_alphanumeric(parts[0]) {
            return Err(SemverError::BuildLabel(s.to_string()));
        }
        let index = parts[1]
            .parse::<u32>()
            .map_err(|_| SemverError::BuildNumber(s.to_string()))?;

        Ok(Some(BuildMetadata::new(parts[0], index)))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The build counter
    pub fn number(&self) -> u32 {
        self.index
    }

    /// Same label, next index
    pub fn bump(&self) -> Result<Self, SemverError> {
        let index = self
            .index
            .checked_add(1)
            .ok_or_else(|| SemverError::Overflow {
                field: "build".to_string(),
                value: self.index,
            })?;
        Ok(BuildMetadata::new(self.label.clone(), index))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index == 0
    }
}

impl fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index > 0 {
            write!(f, "{}.{}", self.label, self.index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_parse() {
        let build = BuildMetadata::parse("build.1").unwrap().unwrap();
        assert_eq!(build.label(), "build");
        assert_eq!(build.number(), 1);
    }

    #[test]
    fn test_build_parse_empty_is_none() {
        assert_eq!(BuildMetadata::parse("").unwrap(), None);
    }

    #[test]
    fn test_build_parse_alphanumeric_label() {
        let build = BuildMetadata::parse("ci42.7").unwrap().unwrap();
        assert_eq!(build.label(), "ci42");
        assert_eq!(build.number(), 7);
    }

    #[test]
    fn test_build_parse_errors() {
        assert_eq!(
            BuildMetadata::parse("build"),
            Err(SemverError::BuildFieldCount("build".to_string()))
        );
        assert_eq!(
            BuildMetadata::parse("build.1.2"),
            Err(SemverError::BuildFieldCount("build.1.2".to_string()))
        );
        assert_eq!(
            BuildMetadata::parse("build."),
            Err(SemverError::BuildMissingNumber("build.".to_string()))
        );
        assert_eq!(
            BuildMetadata::parse("bu-ild.1"),
            Err(SemverError::BuildLabel("bu-ild.1".to_string()))
        );
        assert_eq!(
            BuildMetadata::parse(".1"),
            Err(SemverError::BuildLabel(".1".to_string()))
        );
        assert_eq!(
            BuildMetadata::parse("build.one"),
            Err(SemverError::BuildNumber("build.one".to_string()))
        );
    }

    #[test]
    fn test_build_display() {
        assert_eq!(BuildMetadata::new("build", 3).to_string(), "build.3");
    }

    #[test]
    fn test_build_display_zero_index_is_empty() {
        assert_eq!(BuildMetadata::new("build", 0).to_string(), "");
    }

    #[test]
    fn test_build_bump() {
        let build = BuildMetadata::new("build", 1);
        assert_eq!(build.bump().unwrap(), BuildMetadata::new("build", 2));
        assert_eq!(build.number(), 1);
    }

    #[test]
    fn test_build_bump_overflow() {
        let build = BuildMetadata::new("build", u32::MAX);
        assert!(matches!(
            build.bump(),
            Err(SemverError::Overflow { ref field, .. }) if field == "build"
        ));
    }

    #[test]
    fn test_build_ordering() {
        assert!(BuildMetadata::new("build", 1) < BuildMetadata::new("build", 2));
        assert!(BuildMetadata::new("build", 9) < BuildMetadata::new("ci", 1));
        assert_eq!(
            BuildMetadata::new("build", 2).cmp(&BuildMetadata::new("build", 2)),
            std::cmp::Ordering::Equal
        );
    }

    #[test]
    fn test_build_numeric_ordering_not_lexicographic() {
        assert!(BuildMetadata::new("build", 2) < BuildMetadata::new("build", 10));
    }
}
