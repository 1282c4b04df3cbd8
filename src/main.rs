//! gitfleet - drive git across many working trees
//!
//! Binary entry point: bulk status and pull from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gitfleet::config::GitConfig;
use gitfleet::coordinator::Coordinator;
use gitfleet::git::GitExecutor;
use gitfleet::model::{RepoId, Repository, RepositoryStatus};

#[derive(Parser, Debug)]
#[command(name = "gitfleet", version, about = "Drive git across many working trees")]
struct Args {
    /// Path to the git executable
    #[arg(long, env = "GITFLEET_GIT", default_value = "git")]
    git: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Refresh and print the status of every given working tree
    Status {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Pull the current branch of one working tree
    Pull { path: PathBuf },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "starting");

    let executor = GitExecutor::new(GitConfig::with_executable(args.git));
    let coordinator = Coordinator::new(executor);

    match args.command {
        Command::Status { paths } => status(&coordinator, paths),
        Command::Pull { path } => pull(&coordinator, path),
    }
}

fn status(coordinator: &Coordinator<GitExecutor>, paths: Vec<PathBuf>) -> color_eyre::Result<()> {
    let repositories: Vec<Repository> = paths
        .into_iter()
        .map(|path| Repository::new(path.display().to_string(), path))
        .collect();
    let ids: Vec<RepoId> = repositories.iter().map(|r| r.id.clone()).collect();
    coordinator.register(repositories);

    let mut failed = 0;
    for outcome in coordinator.refresh_all(&ids) {
        match outcome.result {
            Ok(status) => println!("{}", format_status(outcome.id.as_str(), &status)),
            Err(e) => {
                failed += 1;
                println!("{}  error: {e}", outcome.id);
            }
        }
    }

    if failed > 0 {
        return Err(eyre!("{failed} of {} repositories failed", ids.len()));
    }
    Ok(())
}

fn pull(coordinator: &Coordinator<GitExecutor>, path: PathBuf) -> color_eyre::Result<()> {
    let repo = Repository::new(path.display().to_string(), path);
    let id = repo.id.clone();
    coordinator.register([repo]);

    let summary = coordinator.pull(&id)?;
    if summary.is_already_up_to_date {
        println!("{id}  already up to date");
        return Ok(());
    }

    let mut line = format!("{id}  updated");
    if let Some(range) = &summary.commit_range {
        line.push_str(&format!(" {range}"));
    }
    if let Some(files) = summary.changed_files {
        line.push_str(&format!(
            ", {files} files changed, +{} -{}",
            summary.insertions.unwrap_or(0),
            summary.deletions.unwrap_or(0)
        ));
    }
    println!("{line}");
    Ok(())
}

/// One line per repository: `<id>  <branch> [<upstream> +a -b]  S staged, M modified, U untracked`
fn format_status(id: &str, status: &RepositoryStatus) -> String {
    let tracking = match &status.upstream {
        Some(upstream) => format!(" [{upstream} +{} -{}]", status.ahead, status.behind),
        None => String::new(),
    };
    let mut line = format!(
        "{id}  {}{tracking}  {} staged, {} modified, {} untracked",
        status.current_branch,
        status.staged_files.len(),
        status.modified_files.len(),
        status.untracked_files.len()
    );
    if status.has_conflicts() {
        line.push_str(&format!(", {} conflicted", status.conflicted_files.len()));
    }
    line
}
