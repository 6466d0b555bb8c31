//! Pre-release version handling
//!
//! A pre-release is an optional label followed by a numeric triple, rendered in a
//! reduced form where trailing zero components are dropped:
//!
//! - `alpha` -> label "alpha", 0.0.0
//! - `alpha.1` -> label "alpha", 1.0.0
//! - `alpha.0.1` -> label "alpha", 0.1.0
//! - `alpha.0.0.1` -> label "alpha", 0.0.1

use super::version::{Field, RootVersion};
use crate::error::SemverError;
use std::fmt;
use std::str::FromStr;

/// Which part of a pre-release a bump advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreReleasePart {
    /// Advance to the next configured label
    Next,
    Major,
    Minor,
    Patch,
}

/// Pre-release version: label plus a reduced numeric triple
///
/// Ordered by label first, then major, minor and patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreReleaseVersion {
    label: String,
    version: RootVersion,
}

impl PreReleaseVersion {
    /// Create a new pre-release version
    pub fn new(label: impl Into<String>, major: u32, minor: u32, patch: u32) -> Self {
        PreReleaseVersion {
            label: label.into(),
            version: RootVersion::new(major, minor, patch),
        }
    }

    /// Parse a pre-release version from a string
    ///
    /// Accepts formats like "alpha", "alpha.1", "beta.0.1", "1.2" or "rc.1.2.3". Anything
    /// after a `+` is build metadata and is ignored here. Missing numeric components
    /// are zero-filled.
    ///
    /// # Returns
    /// * `Ok(PreReleaseVersion)` - Parsed pre-release version
    /// * `Err` - If a numeric component is not an integer, or there are more than three
    pub fn parse(s: &str) -> Result<Self, SemverError> {
        let version = s.split('+').next().unwrap_or_default();

        if version.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok(PreReleaseVersion::new(version, 0, 0, 0));
        }

        let mut vals: Vec<&str> = version.split('.').collect();
        let mut label = "";
        if !version.starts_with(|c: char| c.is_ascii_digit()) {
            label = vals.remove(0);
        }

        if vals.len() > 3 {
            return Err(SemverError::PreReleaseFieldCount(s.to_string()));
        }

        let mut numbers = [0u32; 3];
        let fields = [Field::Major, Field::Minor, Field::Patch];
        for ((slot, field), value) in numbers.iter_mut().zip(fields).zip(&vals) {
            *slot = value
                .parse::<u32>()
                .map_err(|_| SemverError::PreReleaseField {
                    field,
                    value: value.to_string(),
                })?;
        }

        Ok(PreReleaseVersion::new(
            label, numbers[0], numbers[1], numbers[2],
        ))
    }

    /// The pre-release label, empty when no pre-release has been entered
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The numeric triple
    pub fn version(&self) -> &RootVersion {
        &self.version
    }

    /// Bump the pre-release according to `part`, using the configured label progression
    ///
    /// Labels are sorted ascending before use. When no label is set yet, the first
    /// label is entered:
    /// - `Major` only sets the label (the numeric major is not incremented)
    /// - `Minor`/`Patch` bump under the first label
    /// - `Next` lands on the first label
    ///
    /// # Returns
    /// * `Err(EmptyLabels)` - If no labels are configured
    /// * `Err(LabelNotFound)` - If the current label is not configured
    /// * `Err(LastLabel)` - If `Next` is requested on the last label
    pub fn bump(&self, part: PreReleasePart, labels: &[String]) -> Result<Self, SemverError> {
        let labels = super::sorted_labels(labels)?;
        let entering = self.label.is_empty();
        let label = if entering {
            labels[0].as_str()
        } else {
            self.label.as_str()
        };

        let bumped = |field: Field| -> Result<Self, SemverError> {
            Ok(PreReleaseVersion {
                label: label.to_string(),
                version: self.version.bump(field)?,
            })
        };
        match part {
            PreReleasePart::Major if entering => Ok(PreReleaseVersion::new(
                label,
                self.version.major(),
                0,
                0,
            )),
            PreReleasePart::Major => bumped(Field::Major),
            PreReleasePart::Minor => bumped(Field::Minor),
            PreReleasePart::Patch => bumped(Field::Patch),
            PreReleasePart::Next => {
                let idx = labels.iter().position(|l| l == label).ok_or_else(|| {
                    SemverError::LabelNotFound {
                        label: label.to_string(),
                        labels: labels.clone(),
                    }
                })?;
                let offset = if entering { 0 } else { 1 };
                match labels.get(idx + offset) {
                    Some(next) => Ok(PreReleaseVersion::new(next.as_str(), 0, 0, 0)),
                    None => Err(SemverError::LastLabel(label.to_string())),
                }
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.label.is_empty() && self.version.is_zero()
    }
}

impl FromStr for PreReleaseVersion {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreReleaseVersion::parse(s)
    }
}

impl fmt::Display for PreReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.version;
        let numbers = if v.patch() != 0 {
            format!("{}.{}.{}", v.major(), v.minor(), v.patch())
        } else if v.minor() != 0 {
            format!("{}.{}", v.major(), v.minor())
        } else {
            v.major().to_string()
        };

        // alpha.0.0.0 -> alpha
        match (self.label.is_empty(), numbers.as_str()) {
            (_, "0") => write!(f, "{}", self.label),
            (true, _) => write!(f, "{}", numbers),
            (false, _) => write!(f, "{}.{}", self.label, numbers),
        }
    }
}
