use crate::domain::{self, SemanticVersion};
use crate::error::{Result, VersionBumpError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "versionbump.yaml";

/// Pattern used to track the version inside the configuration file itself
pub const CONFIG_VERSION_PATTERN: &str = "version: \"{version}\"";

/// Placeholder expanded with the old and new version in tracked file patterns
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Represents the complete configuration for versionbump.
///
/// Holds the current version, the pre-release label progression, git behavior and the
/// files whose version strings are kept in sync.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub version: String,

    #[serde(default = "default_prerelease_labels")]
    pub prerelease_labels: Vec<String>,

    #[serde(default = "default_build_label")]
    pub build_label: String,

    #[serde(default)]
    pub git_commit: bool,

    #[serde(default = "default_git_commit_template")]
    pub git_commit_template: String,

    #[serde(default)]
    pub git_sign: bool,

    #[serde(default)]
    pub git_tag: bool,

    #[serde(default = "default_git_tag_template")]
    pub git_tag_template: String,

    #[serde(default = "default_git_tag_message_template")]
    pub git_tag_message_template: String,

    #[serde(default)]
    pub files: Vec<VersionedFile>,
}

/// A file whose version strings are rewritten on every bump.
///
/// Each `replace` entry is a pattern containing `{version}`, e.g. `"v{version}"`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct VersionedFile {
    pub path: String,
    #[serde(default)]
    pub replace: Vec<String>,
}

/// Returns the default pre-release label progression.
fn default_prerelease_labels() -> Vec<String> {
    vec!["alpha".to_string(), "beta".to_string(), "rc".to_string()]
}

fn default_build_label() -> String {
    "build".to_string()
}

fn default_git_commit_template() -> String {
    "Bump version {old} --> {new}".to_string()
}

fn default_git_tag_template() -> String {
    "v{new}".to_string()
}

fn default_git_tag_message_template() -> String {
    "Release version {new}".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: "0.0.0".to_string(),
            prerelease_labels: default_prerelease_labels(),
            build_label: default_build_label(),
            git_commit: false,
            git_commit_template: default_git_commit_template(),
            git_sign: false,
            git_tag: false,
            git_tag_template: default_git_tag_template(),
            git_tag_message_template: default_git_tag_message_template(),
            files: Vec::new(),
        }
    }
}

/// Commit and tag text rendered for one bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitMeta {
    pub old_version: String,
    pub new_version: String,
    pub commit_message: String,
    pub tag_name: String,
    pub tag_message: String,
}

impl fmt::Display for GitMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Commit Message: {}\nTag Message: {}\nTag Name: {}",
            self.commit_message, self.tag_message, self.tag_name
        )
    }
}

impl Config {
    /// Whether any git operation is enabled
    pub fn is_git_required(&self) -> bool {
        self.git_commit || self.git_tag
    }

    /// Returns a sorted copy of the pre-release labels
    pub fn sorted_labels(&self) -> Vec<String> {
        let mut labels = self.prerelease_labels.clone();
        labels.sort();
        labels
    }

    /// Parse the configured version
    pub fn current_version(&self) -> Result<SemanticVersion> {
        Ok(SemanticVersion::parse(&self.version)?)
    }

    /// Render the commit message, tag name and tag message for a bump
    ///
    /// `{old}` and `{new}` are replaced in every template.
    pub fn git_meta(&self, old: &str, new: &str) -> GitMeta {
        let render = |template: &str| template.replace("{old}", old).replace("{new}", new);
        GitMeta {
            old_version: old.to_string(),
            new_version: new.to_string(),
            commit_message: render(&self.git_commit_template),
            tag_name: render(&self.git_tag_template),
            tag_message: render(&self.git_tag_message_template),
        }
    }

    /// Serialize the configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the version, labels, build label and tracked file patterns
    pub fn validate(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(VersionBumpError::config("version string is required"));
        }
        if !domain::validate_sem_version(&self.version) {
            return Err(VersionBumpError::config(format!(
                "invalid version string: {}",
                self.version
            )));
        }
        if !domain::validate_pre_release_labels(&self.prerelease_labels) {
            return Err(VersionBumpError::config(format!(
                "pre-release labels must be alphabetic: {:?}",
                self.prerelease_labels
            )));
        }
        if !domain::validate_build_label(&self.build_label) {
            return Err(VersionBumpError::config(format!(
                "build label must be alphanumeric: '{}'",
                self.build_label
            )));
        }
        for file in &self.files {
            if let Some(pattern) = file
                .replace
                .iter()
                .find(|p| !p.contains(VERSION_PLACEHOLDER))
            {
                return Err(VersionBumpError::config(format!(
                    "replace pattern '{}' for {} must contain {}",
                    pattern, file.path, VERSION_PLACEHOLDER
                )));
            }
        }
        Ok(())
    }
}

/// Loads and validates the configuration file.
///
/// Tracked file paths are relative to the directory containing the configuration
/// file. The configuration file itself is appended as a tracked file so its
/// `version` key follows every bump.
///
/// # Arguments
/// * `path` - Path to the YAML configuration file
///
/// # Returns
/// * `Ok((Config, PathBuf))` - Validated configuration and the absolute project root
/// * `Err` - If the file cannot be read, parsed or fails validation
pub fn load_config(path: &Path) -> Result<(Config, PathBuf)> {
    let contents = fs::read_to_string(path).map_err(|e| {
        VersionBumpError::config(format!("error opening {}: {}", path.display(), e))
    })?;

    let mut config: Config = serde_yaml::from_str(&contents)
        .map_err(|e| VersionBumpError::config(format!("error parsing {}: {}", path.display(), e)))?;

    config.validate()?;

    let root = project_root(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| VersionBumpError::config(format!("invalid config path: {}", path.display())))?;

    config.files.push(VersionedFile {
        path: file_name,
        replace: vec![CONFIG_VERSION_PATTERN.to_string()],
    });

    Ok((config, root))
}

fn project_root(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| VersionBumpError::config(format!("no parent directory for {}", path.display())))
}
