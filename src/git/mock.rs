use crate::error::{Result, VersionBumpError};
use crate::git::Repository;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// A commit recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCommit {
    pub message: String,
    pub signed: bool,
    pub files: Vec<PathBuf>,
}

/// A tag recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTag {
    pub name: String,
    pub message: String,
    pub signed: bool,
}

#[derive(Debug, Default)]
struct MockState {
    pending_changes: bool,
    branch: String,
    staged: Vec<PathBuf>,
    commits: Vec<MockCommit>,
    tags: Vec<MockTag>,
    signing_key: Option<String>,
    signing_enabled: bool,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a new clean mock repository on `main`
    pub fn new() -> Self {
        MockRepository {
            state: Mutex::new(MockState {
                branch: "main".to_string(),
                ..MockState::default()
            }),
        }
    }

    /// Add an existing tag
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.with_state(|state| {
            state.tags.push(MockTag {
                name: name.into(),
                message: String::new(),
                signed: false,
            })
        })
    }

    /// Mark the working tree as dirty or clean
    pub fn with_pending_changes(self, pending: bool) -> Self {
        self.with_state(|state| state.pending_changes = pending)
    }

    pub fn with_branch(self, branch: impl Into<String>) -> Self {
        self.with_state(|state| state.branch = branch.into())
    }

    pub fn with_signing_key(self, key: impl Into<String>) -> Self {
        self.with_state(|state| state.signing_key = Some(key.into()))
    }

    /// Pretend git signs by default (`commit.gpgsign = true`)
    pub fn with_signing_enabled(self, enabled: bool) -> Self {
        self.with_state(|state| state.signing_enabled = enabled)
    }

    /// Commits created so far, oldest first
    pub fn commits(&self) -> Vec<MockCommit> {
        self.state().commits.clone()
    }

    /// All tags, including the ones added with [MockRepository::with_tag]
    pub fn tags(&self) -> Vec<MockTag> {
        self.state().tags.clone()
    }

    /// Files staged since the last commit
    pub fn staged_files(&self) -> Vec<PathBuf> {
        self.state().staged.clone()
    }

    fn with_state(self, f: impl FnOnce(&mut MockState)) -> Self {
        f(&mut self.state());
        self
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panic while holding the lock only happens inside a failing test
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn has_pending_changes(&self) -> Result<bool> {
        Ok(self.state().pending_changes)
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.state().branch.clone())
    }

    fn add_files(&self, paths: &[PathBuf]) -> Result<()> {
        self.state().staged.extend(paths.iter().cloned());
        Ok(())
    }

    fn commit(&self, message: &str, sign: bool) -> Result<()> {
        let mut state = self.state();
        if sign && state.signing_key.is_none() {
            return Err(VersionBumpError::git("no signing key configured"));
        }
        let files = std::mem::take(&mut state.staged);
        state.commits.push(MockCommit {
            message: message.to_string(),
            signed: sign,
            files,
        });
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str, sign: bool) -> Result<()> {
        let mut state = self.state();
        if state.tags.iter().any(|tag| tag.name == name) {
            return Err(VersionBumpError::tag(format!("Tag '{}' already exists", name)));
        }
        state.tags.push(MockTag {
            name: name.to_string(),
            message: message.to_string(),
            signed: sign,
        });
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.state().tags.iter().map(|tag| tag.name.clone()).collect())
    }

    fn signing_key(&self) -> Result<Option<String>> {
        Ok(self.state().signing_key.clone())
    }

    fn is_signing_enabled(&self) -> Result<bool> {
        Ok(self.state().signing_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_basic() {
        let repo = MockRepository::new();
        assert!(!repo.has_pending_changes().unwrap());
        assert_eq!(repo.current_branch().unwrap(), "main");
        assert_eq!(repo.signing_key().unwrap(), None);
    }

    #[test]
    fn test_mock_repository_tags() {
        let repo = MockRepository::new().with_tag("v1.0.0");

        assert!(repo.tag_exists("v1.0.0").unwrap());
        assert!(!repo.tag_exists("v2.0.0").unwrap());

        repo.create_tag("v2.0.0", "Release version 2.0.0", false)
            .unwrap();
        let tags = repo.list_tags().unwrap();
        assert_eq!(tags, vec!["v1.0.0", "v2.0.0"]);
    }

    #[test]
    fn test_mock_repository_duplicate_tag() {
        let repo = MockRepository::new().with_tag("v1.0.0");
        assert!(repo.create_tag("v1.0.0", "again", false).is_err());
    }

    #[test]
    fn test_mock_repository_commit_takes_staged_files() {
        let repo = MockRepository::new();
        repo.add_files(&[PathBuf::from("/project/VERSION")]).unwrap();
        repo.commit("Bump version 1.0.0 --> 1.0.1", false).unwrap();

        let commits = repo.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].files, vec![PathBuf::from("/project/VERSION")]);
        assert!(repo.staged_files().is_empty());
    }

    #[test]
    fn test_mock_repository_signed_commit_needs_key() {
        let repo = MockRepository::new();
        assert!(repo.commit("msg", true).is_err());

        let repo = MockRepository::new().with_signing_key("ABCDEF");
        repo.commit("msg", true).unwrap();
        assert!(repo.commits()[0].signed);
    }
}
