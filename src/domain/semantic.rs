//! Composite semantic version: `root[-prerelease][+build]`

use super::build::BuildMetadata;
use super::prerelease::{PreReleasePart, PreReleaseVersion};
use super::strategy::BumpStrategy;
use super::version::{Field, RootVersion};
use crate::error::SemverError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A semantic version with optional pre-release and build metadata
///
/// A pre-release that renders empty and a build with index zero are stored as
/// absent, so rendering, ordering and equality always agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    root: RootVersion,
    pre_release: Option<PreReleaseVersion>,
    build: Option<BuildMetadata>,
}

impl SemanticVersion {
    /// Create a semantic version from its parts
    pub fn new(
        root: RootVersion,
        pre_release: Option<PreReleaseVersion>,
        build: Option<BuildMetadata>,
    ) -> Self {
        SemanticVersion {
            root,
            pre_release: pre_release.filter(|p| !p.is_empty()),
            build: build.filter(|b| !b.is_empty()),
        }
    }

    /// Parse a semantic version string
    ///
    /// The string is split once on `-` for the pre-release, and the remainder once
    /// on `+` for build metadata. Labels containing a literal `-` or `+` are
    /// therefore not supported.
    ///
    /// # Arguments
    /// * `s` - Version string (e.g., "1.2.3", "1.0.0-beta.1", "1.0.0-rc+build.4")
    ///
    /// # Returns
    /// * `Ok(SemanticVersion)` - Parsed version
    /// * `Err` - The first error reported by a component parser
    pub fn parse(s: &str) -> Result<Self, SemverError> {
        let (root, rest) = match s.split_once('-') {
            Some((root, pre)) => (root, Some(pre)),
            None => (s, None),
        };

        let (root, pre, build) = match rest {
            Some(pre) => match pre.split_once('+') {
                Some((pre, build)) => (root, Some(pre), Some(build)),
                None => (root, Some(pre), None),
            },
            None => match root.split_once('+') {
                Some((root, build)) => (root, None, Some(build)),
                None => (root, None, None),
            },
        };

        let root = RootVersion::parse(root)?;
        let pre_release = pre.map(PreReleaseVersion::parse).transpose()?;
        let build = match build {
            Some(build) => BuildMetadata::parse(build)?,
            None => None,
        };

        Ok(SemanticVersion::new(root, pre_release, build))
    }

    pub fn root(&self) -> &RootVersion {
        &self.root
    }

    pub fn pre_release(&self) -> Option<&PreReleaseVersion> {
        self.pre_release.as_ref()
    }

    pub fn build(&self) -> Option<&BuildMetadata> {
        self.build.as_ref()
    }

    pub fn major(&self) -> u32 {
        self.root.major()
    }

    pub fn minor(&self) -> u32 {
        self.root.minor()
    }

    pub fn patch(&self) -> u32 {
        self.root.patch()
    }

    /// Check if this is a pre-release version
    pub fn is_prerelease(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Produce the next version for `strategy`
    ///
    /// # Arguments
    /// * `strategy` - How to advance the version
    /// * `labels` - Pre-release label progression (sorted before use)
    /// * `build_label` - Label for newly created build metadata
    ///
    /// # Returns
    /// * `Ok(SemanticVersion)` - The bumped version; `self` is left untouched
    /// * `Err` - Pre-release errors are passed through unchanged
    pub fn bump(
        &self,
        strategy: BumpStrategy,
        labels: &[String],
        build_label: &str,
    ) -> Result<Self, SemverError> {
        match strategy {
            BumpStrategy::Major => Ok(self.with_root(self.root.bump(Field::Major)?)),
            BumpStrategy::Minor => Ok(self.with_root(self.root.bump(Field::Minor)?)),
            BumpStrategy::Patch => Ok(self.with_root(self.root.bump(Field::Patch)?)),
            BumpStrategy::PreNewMajor => self.new_pre_release(Field::Major, labels),
            BumpStrategy::PreNewMinor => self.new_pre_release(Field::Minor, labels),
            BumpStrategy::PreNewPatch => self.new_pre_release(Field::Patch, labels),
            BumpStrategy::Pre => self.bump_pre_release(PreReleasePart::Next, labels),
            BumpStrategy::PreMajor => self.bump_pre_release(PreReleasePart::Major, labels),
            BumpStrategy::PreMinor => self.bump_pre_release(PreReleasePart::Minor, labels),
            BumpStrategy::PrePatch => self.bump_pre_release(PreReleasePart::Patch, labels),
            BumpStrategy::PreBuild => {
                let build = match &self.build {
                    Some(build) => build.bump()?,
                    None => {
                        if !super::validate_build_label(build_label) {
                            return Err(SemverError::InvalidBuildLabel(build_label.to_string()));
                        }
                        BuildMetadata::new(build_label, 1)
                    }
                };
                Ok(SemanticVersion::new(
                    self.root,
                    self.pre_release.clone(),
                    Some(build),
                ))
            }
            BumpStrategy::Release => Ok(self.with_root(self.root)),
        }
    }

    fn with_root(&self, root: RootVersion) -> Self {
        SemanticVersion::new(root, None, None)
    }

    fn new_pre_release(&self, field: Field, labels: &[String]) -> Result<Self, SemverError> {
        let labels = super::sorted_labels(labels)?;
        Ok(SemanticVersion::new(
            self.root.bump(field)?,
            Some(PreReleaseVersion::new(labels[0].as_str(), 0, 0, 0)),
            None,
        ))
    }

    fn bump_pre_release(&self, part: PreReleasePart, labels: &[String]) -> Result<Self, SemverError> {
        let current = self.pre_release.clone().unwrap_or_default();
        let pre_release = current.bump(part, labels)?;
        Ok(SemanticVersion::new(self.root, Some(pre_release), None))
    }
}

impl FromStr for SemanticVersion {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.root
            .cmp(&other.root)
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
            // Option orders None below Some, which is what build metadata needs
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["alpha".to_string(), "beta".to_string(), "rc".to_string()]
    }

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    fn bump(s: &str, strategy: BumpStrategy) -> Result<String, SemverError> {
        v(s).bump(strategy, &labels(), "build").map(|v| v.to_string())
    }

    #[test]
    fn test_parse_root_only() {
        let version = v("1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert!(version.pre_release().is_none());
        assert!(version.build().is_none());
    }

    #[test]
    fn test_parse_with_prerelease_and_build() {
        let version = v("1.0.0-beta.2+ci.7");
        assert_eq!(version.pre_release().unwrap().label(), "beta");
        assert_eq!(version.pre_release().unwrap().version().major(), 2);
        assert_eq!(version.build().unwrap().label(), "ci");
        assert_eq!(version.build().unwrap().number(), 7);
    }

    #[test]
    fn test_parse_build_without_prerelease() {
        let version = v("1.0.0+build.3");
        assert!(version.pre_release().is_none());
        assert_eq!(version.build().unwrap().number(), 3);
    }

    #[test]
    fn test_parse_errors_propagate() {
        assert!(matches!(
            SemanticVersion::parse("1.2"),
            Err(SemverError::RootFieldCount(_))
        ));
        assert!(matches!(
            SemanticVersion::parse("1.2.3-alpha.x"),
            Err(SemverError::PreReleaseField { .. })
        ));
        assert!(matches!(
            SemanticVersion::parse("1.2.3+build"),
            Err(SemverError::BuildFieldCount(_))
        ));
        assert!(matches!(
            SemanticVersion::parse("1.2.3-alpha+build.x"),
            Err(SemverError::BuildNumber(_))
        ));
    }

    #[test]
    fn test_display_round_trip_canonical_forms() {
        for s in [
            "1.2.3",
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.0.1",
            "1.0.0-alpha.0.0.1",
            "1.0.0-1.2",
            "1.0.0-rc+build.2",
            "1.0.0+build.1",
        ] {
            assert_eq!(v(s).to_string(), s);
        }
    }

    #[test]
    fn test_display_omits_empty_parts() {
        assert_eq!(v("1.0.0-").to_string(), "1.0.0");
        assert_eq!(v("1.0.0+build.0").to_string(), "1.0.0");
        assert_eq!(v("1.0.0-alpha.0").to_string(), "1.0.0-alpha");
    }

    #[test]
    fn test_empty_parts_compare_equal_to_absent() {
        assert_eq!(v("1.0.0-"), v("1.0.0"));
        assert_eq!(v("1.0.0+build.0"), v("1.0.0"));
        assert_eq!(v("1.0.0-").cmp(&v("1.0.0")), Ordering::Equal);
    }

    #[test]
    fn test_bump_root_strategies() {
        assert_eq!(bump("1.2.3", BumpStrategy::Patch).unwrap(), "1.2.4");
        assert_eq!(bump("2.5.1", BumpStrategy::Major).unwrap(), "3.0.0");
        assert_eq!(bump("1.2.3", BumpStrategy::Minor).unwrap(), "1.3.0");
    }

    #[test]
    fn test_bump_root_clears_prerelease_and_build() {
        assert_eq!(
            bump("1.2.3-beta.1+build.4", BumpStrategy::Patch).unwrap(),
            "1.2.4"
        );
    }

    #[test]
    fn test_bump_pre_enters_first_label() {
        assert_eq!(bump("1.0.0", BumpStrategy::Pre).unwrap(), "1.0.0-alpha");
    }

    #[test]
    fn test_bump_pre_build_twice() {
        let first = v("1.0.0-alpha")
            .bump(BumpStrategy::PreBuild, &labels(), "build")
            .unwrap();
        assert_eq!(first.to_string(), "1.0.0-alpha+build.1");
        let second = first.bump(BumpStrategy::PreBuild, &labels(), "build").unwrap();
        assert_eq!(second.to_string(), "1.0.0-alpha+build.2");
    }

    #[test]
    fn test_bump_pre_build_keeps_existing_label() {
        assert_eq!(
            bump("1.0.0-beta.2+ci.4", BumpStrategy::PreBuild).unwrap(),
            "1.0.0-beta.2+ci.5"
        );
    }

    #[test]
    fn test_bump_pre_build_invalid_label() {
        assert_eq!(
            v("1.0.0").bump(BumpStrategy::PreBuild, &labels(), "my-build"),
            Err(SemverError::InvalidBuildLabel("my-build".to_string()))
        );
        assert_eq!(
            v("1.0.0").bump(BumpStrategy::PreBuild, &labels(), ""),
            Err(SemverError::InvalidBuildLabel(String::new()))
        );
    }

    #[test]
    fn test_bump_pre_clears_build() {
        assert_eq!(
            bump("1.0.0-alpha+build.1", BumpStrategy::Pre).unwrap(),
            "1.0.0-beta"
        );
        assert_eq!(bump("1.0.0-beta", BumpStrategy::Pre).unwrap(), "1.0.0-rc");
    }

    #[test]
    fn test_bump_pre_past_last_label() {
        let err = bump("1.0.0-rc", BumpStrategy::Pre).unwrap_err();
        assert_eq!(err, SemverError::LastLabel("rc".to_string()));
        assert!(err.to_string().contains("cannot bump beyond the last label"));
    }

    #[test]
    fn test_bump_pre_numeric_strategies() {
        assert_eq!(bump("1.0.0", BumpStrategy::PreMajor).unwrap(), "1.0.0-alpha");
        assert_eq!(
            bump("1.0.0-alpha", BumpStrategy::PreMajor).unwrap(),
            "1.0.0-alpha.1"
        );
        assert_eq!(
            bump("1.0.0-alpha.1", BumpStrategy::PreMinor).unwrap(),
            "1.0.0-alpha.1.1"
        );
        assert_eq!(
            bump("1.0.0-alpha.1.1", BumpStrategy::PrePatch).unwrap(),
            "1.0.0-alpha.1.1.1"
        );
        assert_eq!(bump("1.0.0", BumpStrategy::PrePatch).unwrap(), "1.0.0-alpha.0.0.1");
    }

    #[test]
    fn test_bump_pre_new_strategies() {
        assert_eq!(
            bump("1.2.3", BumpStrategy::PreNewMajor).unwrap(),
            "2.0.0-alpha"
        );
        assert_eq!(
            bump("1.2.3-rc+build.2", BumpStrategy::PreNewMinor).unwrap(),
            "1.3.0-alpha"
        );
        assert_eq!(
            bump("1.2.3", BumpStrategy::PreNewPatch).unwrap(),
            "1.2.4-alpha"
        );
    }

    #[test]
    fn test_bump_pre_new_uses_first_sorted_label() {
        let unsorted = vec!["rc".to_string(), "alpha".to_string()];
        let bumped = v("1.0.0")
            .bump(BumpStrategy::PreNewMinor, &unsorted, "build")
            .unwrap();
        assert_eq!(bumped.to_string(), "1.1.0-alpha");
    }

    #[test]
    fn test_bump_pre_with_empty_labels() {
        for strategy in [
            BumpStrategy::Pre,
            BumpStrategy::PreMajor,
            BumpStrategy::PreNewPatch,
        ] {
            assert_eq!(
                v("1.0.0").bump(strategy, &[], "build"),
                Err(SemverError::EmptyLabels)
            );
        }
    }

    #[test]
    fn test_bump_root_ignores_empty_labels() {
        let bumped = v("1.0.0").bump(BumpStrategy::Minor, &[], "build").unwrap();
        assert_eq!(bumped.to_string(), "1.1.0");
    }

    #[test]
    fn test_bump_release() {
        assert_eq!(bump("1.0.0-rc.2+build.3", BumpStrategy::Release).unwrap(), "1.0.0");
        assert_eq!(bump("1.0.0", BumpStrategy::Release).unwrap(), "1.0.0");
    }

    #[test]
    fn test_bump_leaves_receiver_untouched() {
        let version = v("1.0.0-alpha+build.1");
        let _ = version.bump(BumpStrategy::Pre, &labels(), "build").unwrap();
        assert_eq!(version.to_string(), "1.0.0-alpha+build.1");
    }

    #[test]
    fn test_compare_prerelease_below_release() {
        assert_eq!(v("1.0.0-alpha").cmp(&v("1.0.0")), Ordering::Less);
        assert_eq!(v("1.0.0").cmp(&v("1.0.0-rc.9")), Ordering::Greater);
    }

    #[test]
    fn test_compare_build_above_no_build() {
        assert_eq!(v("1.0.0+build.1").cmp(&v("1.0.0")), Ordering::Greater);
        assert_eq!(v("1.0.0-rc+build.1").cmp(&v("1.0.0-rc+build.2")), Ordering::Less);
    }

    #[test]
    fn test_compare_root_first() {
        assert!(v("1.0.1-alpha") > v("1.0.0+build.9"));
        assert!(v("2.0.0") > v("1.9.9"));
        assert_eq!(v("1.2.3").cmp(&v("1.2.3")), Ordering::Equal);
    }

    #[test]
    fn test_compare_prerelease_labels_then_numbers() {
        assert!(v("1.0.0-alpha.5") < v("1.0.0-beta"));
        assert!(v("1.0.0-beta.1") < v("1.0.0-beta.1.0.1"));
    }
}
