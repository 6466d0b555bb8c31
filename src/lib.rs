pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod files;
pub mod git;
pub mod history;
pub mod ui;

pub use domain::{BumpStrategy, SemanticVersion};
pub use error::{Result, SemverError, VersionBumpError};
