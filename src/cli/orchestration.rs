//! Bump workflow orchestration
//!
//! Separates the version bump workflow from CLI argument parsing so it can be driven
//! programmatically and tested against [MockRepository](crate::git::MockRepository).

use anyhow::{bail, Result as AnyResult};
use log::debug;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::config::{self, Config, GitMeta, VERSION_PLACEHOLDER};
use crate::domain::{BumpStrategy, SemanticVersion};
use crate::error::{Result, SemverError, VersionBumpError};
use crate::files;
use crate::git::{self, Git2Repository, Repository};
use crate::ui;

/// What the new version should be
#[derive(Debug, Clone, PartialEq)]
pub enum BumpTarget {
    /// Derive the new version from the current one
    Strategy(BumpStrategy),
    /// Set an explicit version; never commits or tags
    Reset(SemanticVersion),
}

/// One find/replace in one tracked file
#[derive(Debug, Clone, PartialEq)]
pub struct FileChange {
    /// Path as written in the configuration
    pub display_path: String,
    /// Resolved path on disk
    pub path: PathBuf,
    pub find: String,
    pub replace: String,
    /// Occurrences of `find` at planning time
    pub occurrences: usize,
}

/// Everything a bump will change, computed before touching any file
#[derive(Debug, Clone, PartialEq)]
pub struct BumpPlan {
    pub old_version: String,
    pub new_version: String,
    pub changes: Vec<FileChange>,
    pub is_reset: bool,
}

impl BumpPlan {
    /// Distinct tracked files, in configuration order
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = Vec::new();
        for change in &self.changes {
            if !files.contains(&change.path) {
                files.push(change.path.clone());
            }
        }
        files
    }
}

/// Arguments for the bump workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,

    pub target: BumpTarget,

    /// Skip confirmation prompts
    pub no_prompt: bool,

    /// Skip all git operations
    pub no_git: bool,

    /// Preview mode - report the plan without changing anything
    pub dry_run: bool,

    /// Only print errors and warnings
    pub quiet: bool,
}

/// Outcome of a bump workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowResult {
    pub old_version: String,
    pub new_version: String,

    /// Whether tracked files were rewritten
    pub applied: bool,

    pub committed: bool,

    /// The tag that was created, if any
    pub tag: Option<String>,

    pub warnings: Vec<BoundaryWarning>,
}

/// Compute the new version and every file replacement it requires
///
/// # Arguments
/// * `config` - Loaded configuration, including the config file as a tracked file
/// * `root` - Project root; relative tracked paths are resolved against it
/// * `target` - Strategy or explicit version
///
/// # Returns
/// * `Ok(BumpPlan)` - The plan, with occurrence counts per replacement
/// * `Err` - If the bump fails, or a tracked file has no occurrence of its pattern
pub fn plan_bump(config: &Config, root: &Path, target: &BumpTarget) -> Result<BumpPlan> {
    let current = config.current_version()?;
    let (new_version, is_reset) = match target {
        BumpTarget::Strategy(strategy) => (
            current.bump(*strategy, &config.prerelease_labels, &config.build_label)?,
            false,
        ),
        BumpTarget::Reset(version) => (version.clone(), true),
    };

    let old_version = config.version.clone();
    let new_version = new_version.to_string();
    debug!("planning {} --> {}", old_version, new_version);

    let mut changes = Vec::new();
    for file in &config.files {
        let path = if Path::new(&file.path).is_absolute() {
            PathBuf::from(&file.path)
        } else {
            root.join(&file.path)
        };

        for pattern in &file.replace {
            let find = pattern.replace(VERSION_PLACEHOLDER, &old_version);
            let replace = pattern.replace(VERSION_PLACEHOLDER, &new_version);
            let occurrences = files::count_in_file(&path, &find)?;
            if occurrences == 0 {
                return Err(VersionBumpError::file(format!(
                    "No replacements found in file: {} (looking for \"{}\")",
                    file.path, find
                )));
            }
            changes.push(FileChange {
                display_path: file.path.clone(),
                path: path.clone(),
                find,
                replace,
                occurrences,
            });
        }
    }

    Ok(BumpPlan {
        old_version,
        new_version,
        changes,
        is_reset,
    })
}

/// Check that the repository is ready for the commit and tag a bump will create
///
/// # Returns
/// * `Ok(Vec<BoundaryWarning>)` - Non-fatal findings
/// * `Err` - Pending changes, an existing tag, or signing without a key
pub fn git_preflight<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    plan: &BumpPlan,
) -> Result<Vec<BoundaryWarning>> {
    let mut warnings = Vec::new();

    let branch = repo.current_branch()?;
    debug!("current branch: {}", branch);
    if branch == "HEAD" {
        warnings.push(BoundaryWarning::DetachedHead);
    }

    if config.git_tag {
        let meta = config.git_meta(&plan.old_version, &plan.new_version);
        if repo.tag_exists(&meta.tag_name)? {
            return Err(VersionBumpError::tag(format!(
                "Tag '{}' already exists in the git repository. Bump to a different version or remove the existing tag",
                meta.tag_name
            )));
        }
    }

    if repo.has_pending_changes()? {
        return Err(VersionBumpError::git(
            "The repository has pending changes. Commit or stash them before proceeding",
        ));
    }

    let signing_key = repo.signing_key()?;
    let sign_by_default = repo.is_signing_enabled()?;
    if (sign_by_default || config.git_sign) && signing_key.is_none() {
        return Err(VersionBumpError::git(
            "Signing is enabled but no signing key is configured (user.signingkey)",
        ));
    }
    if sign_by_default && !config.git_sign {
        warnings.push(BoundaryWarning::SigningEnabledByDefault);
    }
    if let Some(key) = signing_key.filter(|_| config.git_sign) {
        debug!("commits and tags will be signed with key {}", key);
    }

    Ok(warnings)
}

/// Rewrite every tracked file according to the plan
///
/// Files are rewritten one by one. When a write fails, the error names the files
/// that already carry the new version so they can be reverted by hand.
pub fn apply_plan(plan: &BumpPlan) -> Result<()> {
    let mut rewritten: Vec<&str> = Vec::new();
    for change in &plan.changes {
        let replaced = files::replace_in_file(&change.path, &change.find, &change.replace)
            .map_err(|e| {
                if rewritten.is_empty() {
                    return e;
                }
                let msg = match e {
                    VersionBumpError::File(msg) => msg,
                    other => other.to_string(),
                };
                VersionBumpError::file(format!(
                    "{} (already rewritten: {})",
                    msg,
                    rewritten.join(", ")
                ))
            })?;
        debug!(
            "{}: replaced {} occurrence(s) of \"{}\"",
            change.display_path, replaced, change.find
        );
        if !rewritten.contains(&change.display_path.as_str()) {
            rewritten.push(&change.display_path);
        }
    }
    Ok(())
}

/// Commit the tracked files and create the tag, as enabled in the configuration
///
/// # Returns
/// * `Ok(GitMeta)` - The rendered commit message and tag
pub fn commit_and_tag<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    plan: &BumpPlan,
) -> Result<GitMeta> {
    let meta = config.git_meta(&plan.old_version, &plan.new_version);

    if config.git_commit {
        repo.add_files(&plan.files())?;
        repo.commit(&meta.commit_message, config.git_sign)?;
        debug!("committed: {}", meta.commit_message);
    }
    if config.git_tag {
        repo.create_tag(&meta.tag_name, &meta.tag_message, config.git_sign)?;
        debug!("tagged: {}", meta.tag_name);
    }

    Ok(meta)
}

/// The version every strategy would produce from `version`
pub fn preview_bumps(
    version: &SemanticVersion,
    config: &Config,
) -> Vec<(BumpStrategy, std::result::Result<SemanticVersion, SemverError>)> {
    BumpStrategy::all()
        .iter()
        .map(|strategy| {
            (
                *strategy,
                version.bump(*strategy, &config.prerelease_labels, &config.build_label),
            )
        })
        .collect()
}

/// Main bump workflow
///
/// 1. Load the configuration and plan the bump
/// 2. Open the git repository if the configuration commits or tags (offering to
///    initialize one)
/// 3. Run the git preflight checks
/// 4. Confirm, rewrite tracked files, then commit and tag
///
/// # Arguments
/// * `args` - Workflow arguments
/// * `confirm` - Asks the user a yes/no question
pub fn run_bump_workflow<F>(args: &BumpWorkflowArgs, mut confirm: F) -> AnyResult<WorkflowResult>
where
    F: FnMut(&str) -> AnyResult<bool>,
{
    let (config, root) = config::load_config(&args.config_path)?;
    if !args.quiet {
        ui::display_status(&format!("Project root: {}", root.display()));
    }

    let plan = plan_bump(&config, &root, &args.target)?;

    let uses_git = !args.no_git && !plan.is_reset && config.is_git_required();
    let repo = if !uses_git {
        None
    } else if args.dry_run {
        // Preflight an existing repository, but never create one
        if git::is_repository(&root) {
            Some(Git2Repository::open(&root)?)
        } else {
            None
        }
    } else {
        match open_repository(&root, &config, &plan, args, &mut confirm)? {
            Some(repo) => Some(repo),
            None => return Ok(cancelled(&plan)),
        }
    };

    execute_bump(
        args,
        &config,
        &plan,
        repo.as_ref().map(|r| r as &dyn Repository),
        confirm,
    )
}

/// Run a planned bump against an optional repository
///
/// `repo` is `None` when git is disabled, the bump is a reset, or the configuration
/// neither commits nor tags.
pub fn execute_bump<F>(
    args: &BumpWorkflowArgs,
    config: &Config,
    plan: &BumpPlan,
    repo: Option<&dyn Repository>,
    mut confirm: F,
) -> AnyResult<WorkflowResult>
where
    F: FnMut(&str) -> AnyResult<bool>,
{
    let mut result = cancelled(plan);

    if let Some(repo) = repo {
        result.warnings = git_preflight(repo, config, plan)?;
        for warning in &result.warnings {
            ui::display_boundary_warning(warning);
        }
    }

    if !args.quiet {
        ui::display_plan(plan);
    }

    if args.dry_run {
        if !args.quiet {
            ui::display_status("Dry run: no files were changed");
        }
        return Ok(result);
    }

    if !args.no_prompt && !confirm("Proceed with the changes?")? {
        ui::display_status("Operation cancelled by user.");
        return Ok(result);
    }

    apply_plan(plan)?;
    result.applied = true;
    if !args.quiet {
        for file in plan.files() {
            ui::display_success(&format!("Updated {}", file.display()));
        }
    }

    let Some(repo) = repo else {
        return Ok(result);
    };

    let meta = config.git_meta(&plan.old_version, &plan.new_version);
    if !args.no_prompt {
        if !args.quiet {
            println!("{}", meta);
        }
        if !confirm("Do you want to commit the changes to the git repository?")? {
            ui::display_status("Files were updated but not committed.");
            return Ok(result);
        }
    }

    commit_and_tag(repo, config, plan)?;
    result.committed = config.git_commit;
    if config.git_tag {
        result.tag = Some(meta.tag_name.clone());
    }

    if !args.quiet {
        if config.git_commit {
            ui::display_success(&format!("Committed: {}", meta.commit_message));
        }
        if let Some(tag) = &result.tag {
            ui::display_success(&format!("Created tag: {}", tag));
        }
    }

    Ok(result)
}

fn cancelled(plan: &BumpPlan) -> WorkflowResult {
    WorkflowResult {
        old_version: plan.old_version.clone(),
        new_version: plan.new_version.clone(),
        ..WorkflowResult::default()
    }
}

/// Open the repository at `root`, offering to initialize one when it is missing
///
/// Returns `Ok(None)` when the user declines initialization.
fn open_repository<F>(
    root: &Path,
    config: &Config,
    plan: &BumpPlan,
    args: &BumpWorkflowArgs,
    confirm: &mut F,
) -> AnyResult<Option<Git2Repository>>
where
    F: FnMut(&str) -> AnyResult<bool>,
{
    match git::git_version() {
        Some(version) => debug!("{}", version),
        None => bail!(
            "Git is required by the configuration but the git command is not available on PATH"
        ),
    }

    if git::is_repository(root) {
        return Ok(Some(Git2Repository::open(root)?));
    }

    if args.no_prompt {
        bail!("The project root is not a git repository, but git options are enabled in the configuration");
    }
    if !confirm("The project directory is not a git repository. Initialize one?")? {
        return Ok(None);
    }

    let repo = git::init_repository(root)?;
    repo.add_files(&plan.files())?;
    repo.commit("Initial commit", config.git_sign)?;
    if !args.quiet {
        ui::display_success("Initialized git repository with an initial commit");
    }
    Ok(Some(repo))
}
