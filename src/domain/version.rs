use crate::error::SemverError;
use std::fmt;
use std::str::FromStr;

/// Root `major.minor.patch` version, without pre-release or build metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RootVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl RootVersion {
    /// Create a new root version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        RootVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse a root version from exactly three dot-separated integers (e.g., "1.2.3")
    pub fn parse(s: &str) -> Result<Self, SemverError> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(SemverError::RootFieldCount(s.to_string()));
        }

        let field = |field: Field, value: &str| {
            value.parse::<u32>().map_err(|_| SemverError::RootField {
                field,
                value: value.to_string(),
                input: s.to_string(),
            })
        };

        Ok(RootVersion {
            major: field(Field::Major, parts[0])?,
            minor: field(Field::Minor, parts[1])?,
            patch: field(Field::Patch, parts[2])?,
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// Bump one field, resetting every lower field to zero
    ///
    /// # Returns
    /// * `Err(Overflow)` - If the field is already `u32::MAX`
    pub fn bump(&self, field: Field) -> Result<Self, SemverError> {
        let next = |value: u32| {
            value.checked_add(1).ok_or_else(|| SemverError::Overflow {
                field: field.to_string(),
                value,
            })
        };
        Ok(match field {
            Field::Major => RootVersion::new(next(self.major)?, 0, 0),
            Field::Minor => RootVersion::new(self.major, next(self.minor)?, 0),
            Field::Patch => RootVersion::new(self.major, self.minor, next(self.patch)?),
        })
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.patch == 0
    }
}

impl FromStr for RootVersion {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RootVersion::parse(s)
    }
}

impl fmt::Display for RootVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// One of the three numeric fields of a version triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Major => write!(f, "major"),
            Field::Minor => write!(f, "minor"),
            Field::Patch => write!(f, "patch"),
        }
    }
}
