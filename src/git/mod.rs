//! Git operations abstraction layer
//!
//! The [Repository] trait covers the git operations a version bump needs: checking the
//! working tree, staging tracked files, committing, tagging and reading tags.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! ```rust
//! # use versionbump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> versionbump::error::Result<()> {
//! if !repo.tag_exists("v1.0.0")? {
//!     repo.create_tag("v1.0.0", "Release version 1.0.0", false)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::{git_version, init_repository, is_repository, Git2Repository};

use crate::error::Result;
use std::path::PathBuf;

/// Common git operation trait for abstraction
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// Implementations map underlying failures (like `git2::Error` or a failing `git`
/// process) to [crate::error::VersionBumpError] variants.
pub trait Repository: Send + Sync {
    /// Whether tracked files have staged or unstaged modifications
    ///
    /// Untracked files are ignored.
    fn has_pending_changes(&self) -> Result<bool>;

    /// Short name of the branch HEAD points at, or `"HEAD"` when detached
    fn current_branch(&self) -> Result<String>;

    /// Stage the given files
    ///
    /// # Arguments
    /// * `paths` - Absolute paths inside the working tree
    fn add_files(&self, paths: &[PathBuf]) -> Result<()>;

    /// Commit the staged changes on the current branch
    ///
    /// # Arguments
    /// * `message` - Commit message
    /// * `sign` - Produce a GPG/SSH signed commit
    fn commit(&self, message: &str, sign: bool) -> Result<()>;

    /// Create an annotated tag at HEAD
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists or there's a Git error
    fn create_tag(&self, name: &str, message: &str, sign: bool) -> Result<()>;

    /// Get all tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Check whether a tag with this exact name exists
    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.list_tags()?.iter().any(|tag| tag == name))
    }

    /// The configured `user.signingkey`, if any
    fn signing_key(&self) -> Result<Option<String>>;

    /// Whether git signs commits or tags by default (`commit.gpgsign` / `tag.gpgsign`)
    fn is_signing_enabled(&self) -> Result<bool>;
}
