use crate::error::{Result, VersionBumpError};
use git2::{ErrorCode, ObjectType, Repository as Git2Repo, Status, StatusOptions};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our trait interface
///
/// Unsigned commits and tags go through libgit2. Signed ones are delegated to the
/// `git` binary, which knows how to talk to gpg or ssh-agent.
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
    workdir: PathBuf,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    ///
    /// # Returns
    /// * `Err` - If the repository is bare
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| VersionBumpError::git("bare repositories are not supported"))?;
        Ok(Git2Repository {
            repo: Mutex::new(repo),
            workdir,
        })
    }

    /// Root of the working tree
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn lock(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| VersionBumpError::git("repository lock poisoned"))
    }

    fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = fs::canonicalize(&self.workdir)?;
        let absolute = fs::canonicalize(path)?;
        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                VersionBumpError::git(format!(
                    "{} is outside the repository at {}",
                    path.display(),
                    self.workdir.display()
                ))
            })
    }

    /// Run the `git` binary inside the working tree
    fn run_git(&self, args: &[&str]) -> Result<String> {
        debug!("running git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| VersionBumpError::git(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VersionBumpError::git(format!(
                "git {} failed: {}",
                args.first().unwrap_or(&""),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl super::Repository for Git2Repository {
    fn has_pending_changes(&self) -> Result<bool> {
        let repo = self.lock()?;
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = repo.statuses(Some(&mut options))?;
        let pending = statuses.iter().any(|entry| entry.status() != Status::CURRENT);
        debug!("pending changes: {}", pending);
        Ok(pending)
    }

    fn current_branch(&self) -> Result<String> {
        let repo = self.lock()?;
        let branch = match repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().unwrap_or("HEAD").to_string()),
            Ok(_) => Ok("HEAD".to_string()),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet: HEAD still names the branch it will create
                let head = repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                Ok(target.trim_start_matches("refs/heads/").to_string())
            }
            Err(e) => Err(e.into()),
        };
        branch
    }

    fn add_files(&self, paths: &[PathBuf]) -> Result<()> {
        let relative = paths
            .iter()
            .map(|p| self.relative_path(p))
            .collect::<Result<Vec<_>>>()?;

        let repo = self.lock()?;
        let mut index = repo.index()?;
        for path in &relative {
            debug!("staging {}", path.display());
            index.add_path(path)?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str, sign: bool) -> Result<()> {
        if sign {
            self.run_git(&["commit", "-S", "-m", message])?;
            return Ok(());
        }

        let repo = self.lock()?;
        let mut index = repo.index()?;
        let tree = repo.find_tree(index.write_tree()?)?;
        let signature = repo.signature()?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        debug!("created commit {}", oid);
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str, sign: bool) -> Result<()> {
        if sign {
            self.run_git(&["tag", "-s", name, "-m", message])
                .map_err(|e| VersionBumpError::tag(format!("Cannot create tag '{}': {}", name, e)))?;
            return Ok(());
        }

        let repo = self.lock()?;
        let target = repo
            .head()
            .and_then(|head| head.peel(ObjectType::Commit))
            .map_err(|e| VersionBumpError::tag(format!("Cannot resolve HEAD: {}", e)))?;
        let signature = repo.signature()?;

        let oid = repo
            .tag(name, &target, &signature, message, false)
            .map_err(|e| VersionBumpError::tag(format!("Cannot create tag '{}': {}", name, e)))?;
        debug!("created tag {} ({})", name, oid);
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let repo = self.lock()?;
        let tags = repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn signing_key(&self) -> Result<Option<String>> {
        let repo = self.lock()?;
        let config = repo.config()?;
        match config.get_string("user.signingkey") {
            Ok(key) if !key.trim().is_empty() => Ok(Some(key)),
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn is_signing_enabled(&self) -> Result<bool> {
        let repo = self.lock()?;
        let config = repo.config()?;
        for key in ["commit.gpgsign", "tag.gpgsign"] {
            match config.get_bool(key) {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(e) if e.code() == ErrorCode::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(false)
    }
}

/// Version string of the `git` binary, or `None` if it is not installed
pub fn git_version() -> Option<String> {
    let output = Command::new("git").arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Check whether `path` is inside a non-bare git working tree
pub fn is_repository<P: AsRef<Path>>(path: P) -> bool {
    Git2Repo::discover(path)
        .map(|repo| !repo.is_bare())
        .unwrap_or(false)
}

/// Initialize a new repository at `path`, creating the directory if needed
pub fn init_repository<P: AsRef<Path>>(path: P) -> Result<Git2Repository> {
    let path = path.as_ref();
    fs::create_dir_all(path)?;
    debug!("initializing repository at {}", path.display());
    Git2Repository::from_git2(Git2Repo::init(path)?)
}
