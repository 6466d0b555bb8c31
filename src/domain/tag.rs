use crate::error::{Result, VersionBumpError};
use regex::Regex;

const PLACEHOLDER: &str = "{new}";

/// Tag naming pattern (e.g., "v{new}", "release-{new}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    matcher: Regex,
}

impl TagPattern {
    /// Create a new tag pattern
    ///
    /// # Returns
    /// * `Err` - If the pattern does not contain exactly one `{new}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.matches(PLACEHOLDER).count() != 1 {
            return Err(VersionBumpError::tag(format!(
                "Pattern '{}' must contain exactly one {} placeholder",
                pattern, PLACEHOLDER
            )));
        }

        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(&regex::escape(PLACEHOLDER), "(.+)");
        let matcher = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| VersionBumpError::tag(format!("Invalid pattern '{}': {}", pattern, e)))?;

        Ok(TagPattern { matcher })
    }

    /// Recover the version substring embedded in a tag name
    ///
    /// Returns `None` when the tag does not carry this pattern's prefix and suffix.
    pub fn extract<'a>(&self, tag: &'a str) -> Option<&'a str> {
        self.matcher
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}
