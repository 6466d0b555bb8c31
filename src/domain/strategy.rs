use crate::error::SemverError;
use std::fmt;
use std::str::FromStr;

/// A named way of advancing a semantic version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpStrategy {
    Major,
    Minor,
    Patch,
    /// Advance to the next pre-release label (`pre` or `pre-next`)
    Pre,
    PreMajor,
    PreMinor,
    PrePatch,
    PreBuild,
    PreNewMajor,
    PreNewMinor,
    PreNewPatch,
    Release,
}

impl BumpStrategy {
    /// Every strategy, in the order they are presented to users
    pub fn all() -> &'static [BumpStrategy] {
        &[
            BumpStrategy::Major,
            BumpStrategy::Minor,
            BumpStrategy::Patch,
            BumpStrategy::PreNewMajor,
            BumpStrategy::PreNewMinor,
            BumpStrategy::PreNewPatch,
            BumpStrategy::Pre,
            BumpStrategy::PreMajor,
            BumpStrategy::PreMinor,
            BumpStrategy::PrePatch,
            BumpStrategy::PreBuild,
            BumpStrategy::Release,
        ]
    }

    /// The canonical token for this strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpStrategy::Major => "major",
            BumpStrategy::Minor => "minor",
            BumpStrategy::Patch => "patch",
            BumpStrategy::Pre => "pre",
            BumpStrategy::PreMajor => "pre-major",
            BumpStrategy::PreMinor => "pre-minor",
            BumpStrategy::PrePatch => "pre-patch",
            BumpStrategy::PreBuild => "pre-build",
            BumpStrategy::PreNewMajor => "pre-new-major",
            BumpStrategy::PreNewMinor => "pre-new-minor",
            BumpStrategy::PreNewPatch => "pre-new-patch",
            BumpStrategy::Release => "release",
        }
    }
}

impl FromStr for BumpStrategy {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(BumpStrategy::Major),
            "minor" => Ok(BumpStrategy::Minor),
            "patch" => Ok(BumpStrategy::Patch),
            "pre" | "pre-next" => Ok(BumpStrategy::Pre),
            "pre-major" => Ok(BumpStrategy::PreMajor),
            "pre-minor" => Ok(BumpStrategy::PreMinor),
            "pre-patch" => Ok(BumpStrategy::PrePatch),
            "pre-build" => Ok(BumpStrategy::PreBuild),
            "pre-new-major" => Ok(BumpStrategy::PreNewMajor),
            "pre-new-minor" => Ok(BumpStrategy::PreNewMinor),
            "pre-new-patch" => Ok(BumpStrategy::PreNewPatch),
            "release" => Ok(BumpStrategy::Release),
            other => Err(SemverError::InvalidStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for BumpStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("major".parse::<BumpStrategy>().unwrap(), BumpStrategy::Major);
        assert_eq!(
            "pre-new-minor".parse::<BumpStrategy>().unwrap(),
            BumpStrategy::PreNewMinor
        );
        assert_eq!("release".parse::<BumpStrategy>().unwrap(), BumpStrategy::Release);
    }

    #[test]
    fn test_strategy_pre_next_alias() {
        assert_eq!("pre-next".parse::<BumpStrategy>().unwrap(), BumpStrategy::Pre);
        assert_eq!("pre".parse::<BumpStrategy>().unwrap(), BumpStrategy::Pre);
    }

    #[test]
    fn test_strategy_invalid_names_token() {
        let err = "mayor".parse::<BumpStrategy>().unwrap_err();
        assert_eq!(err, SemverError::InvalidStrategy("mayor".to_string()));
        assert_eq!(err.to_string(), "invalid bump strategy: mayor");
    }

    #[test]
    fn test_strategy_tokens_are_case_sensitive() {
        assert!("Major".parse::<BumpStrategy>().is_err());
    }

    #[test]
    fn test_strategy_display_parses_back() {
        for strategy in BumpStrategy::all() {
            assert_eq!(
                strategy.to_string().parse::<BumpStrategy>().unwrap(),
                *strategy
            );
        }
        assert_eq!(BumpStrategy::all().len(), 12);
    }
}
