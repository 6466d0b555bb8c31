use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use versionbump::cli::orchestration::{self, BumpTarget, BumpWorkflowArgs};
use versionbump::config::{self, DEFAULT_CONFIG_FILE};
use versionbump::git::Git2Repository;
use versionbump::{history, ui, BumpStrategy, SemanticVersion};

#[derive(Parser)]
#[command(
    name = "versionbump",
    version,
    about = "Bump semantic versions across project files, with optional git commit and tag"
)]
struct Args {
    #[arg(
        short,
        long,
        global = true,
        default_value = DEFAULT_CONFIG_FILE,
        help = "Configuration file path"
    )]
    config: PathBuf,

    #[arg(short, long, global = true, help = "Only print errors and warnings")]
    quiet: bool,

    #[arg(long, global = true, help = "Never ask for confirmation")]
    no_prompt: bool,

    #[arg(long, global = true, help = "Skip all git operations")]
    no_git: bool,

    #[arg(long, global = true, help = "Disable colored output")]
    no_color: bool,

    #[arg(long, global = true, help = "Report what would change without changing anything")]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bump the project version (major, minor, patch, pre, pre-major, pre-minor,
    /// pre-patch, pre-build, pre-new-major, pre-new-minor, pre-new-patch, release)
    Bump { strategy: String },
    /// Set the project version to an explicit value (no git operations)
    Reset { version: String },
    /// Show the version each strategy would produce
    Show { version: Option<String> },
    /// Print the effective configuration as YAML
    Config,
    /// Print the latest version found in git tags
    Latest,
    /// Print all versions found in git tags, newest first
    History,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match &args.command {
        Command::Bump { strategy } => {
            let strategy: BumpStrategy = strategy.parse()?;
            bump(&args, BumpTarget::Strategy(strategy))
        }
        Command::Reset { version } => {
            let version = SemanticVersion::parse(version)?;
            bump(&args, BumpTarget::Reset(version))
        }
        Command::Show { version } => show(&args.config, version.as_deref()),
        Command::Config => {
            let (config, root) = config::load_config(&args.config)?;
            if !args.quiet {
                ui::display_status(&format!("Project root: {}", root.display()));
            }
            print!("{}", config.to_yaml()?);
            Ok(())
        }
        Command::Latest => {
            let history = read_history(&args.config)?;
            let latest = history
                .latest()
                .ok_or_else(|| anyhow!("No version tags found"))?;
            println!("{}", latest);
            Ok(())
        }
        Command::History => {
            let history = read_history(&args.config)?;
            if history.versions.is_empty() {
                return Err(anyhow!("No version tags found"));
            }
            ui::display_history(&history.versions);
            Ok(())
        }
    }
}

fn bump(args: &Args, target: BumpTarget) -> Result<()> {
    let workflow_args = BumpWorkflowArgs {
        config_path: args.config.clone(),
        target,
        no_prompt: args.no_prompt,
        no_git: args.no_git,
        dry_run: args.dry_run,
        quiet: args.quiet,
    };

    let result = orchestration::run_bump_workflow(&workflow_args, ui::confirm_action)?;
    if result.applied && !args.quiet {
        ui::display_success(&format!(
            "Bumped version {} --> {}",
            result.old_version, result.new_version
        ));
    }
    Ok(())
}

/// Without an explicit version, the project version is shown
fn show(config_path: &Path, version: Option<&str>) -> Result<()> {
    let (config, version) = match version {
        Some(version) => {
            // Labels and build label still come from the project when there is one
            let config = if config_path.exists() {
                config::load_config(config_path)?.0
            } else {
                config::Config::default()
            };
            (config, SemanticVersion::parse(version)?)
        }
        None => {
            let (config, _) = config::load_config(config_path)?;
            let version = config.current_version()?;
            (config, version)
        }
    };

    let entries = orchestration::preview_bumps(&version, &config);
    ui::display_strategy_tree(&version, &entries);
    Ok(())
}

fn read_history(config_path: &Path) -> Result<history::TagHistory> {
    let (config, root) = config::load_config(config_path)?;
    let repo = Git2Repository::open(&root)?;
    let history = history::tag_history(&repo, &config.git_tag_template)?;
    for warning in &history.warnings {
        log::warn!("{}", warning);
    }
    Ok(history)
}
