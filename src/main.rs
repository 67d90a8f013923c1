use std::error::Error;
use std::io;
use std::process;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use comet::tui::app::SuggestionSources;
use comet::{git, session, tui, Config, Git, RuntimeTracker, Stats, Vcs};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "comet")]
#[command(author, version, about = "Compose a conventional commit message, then commit it")]
struct Cli {
    /// Search term for suggesting messages from the commit history
    #[arg(short = 'm', long = "message", value_name = "TERM")]
    message: Option<String>,

    /// Print runtime statistics and exit
    #[arg(long)]
    stats: bool,

    /// Remove statistics older than DAYS and exit
    #[arg(long, value_name = "DAYS")]
    cleanup_stats: Option<u32>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    completion: Option<Shell>,

    /// Extra arguments passed through to `git commit`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "GIT_ARGS")]
    git_args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    // Stats and completion commands never need a repository
    if let Some(shell) = cli.completion {
        clap_complete::generate(shell, &mut Cli::command(), "comet", &mut io::stdout());
        return;
    }

    if cli.stats {
        match RuntimeTracker::open_default() {
            Ok(tracker) => print_stats(tracker.stats()),
            Err(e) => fail(&e),
        }
        return;
    }

    if let Some(days) = cli.cleanup_stats {
        let removed = RuntimeTracker::open_default().and_then(|mut t| t.cleanup_old_data(days));
        match removed {
            Ok(n) => println!("{} {} stale entries", "Removed".green(), n),
            Err(e) => fail(&e),
        }
        return;
    }

    if let Err(e) = run(cli) {
        fail(&*e);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    git::ensure_installed()?;
    let vcs: Arc<dyn Vcs> = Arc::new(Git);
    let root = vcs.repository_root()?;
    std::env::set_current_dir(&root)?;
    let staged_files = vcs.staged_files()?;
    let config = Config::load()?;

    // Stats that cannot be read stop the session before the wizard opens
    let mut tracker = if config.track_runtime {
        let mut tracker = RuntimeTracker::open_default()?;
        tracker.start();
        Some(tracker)
    } else {
        None
    };

    let sources = SuggestionSources {
        staged_files,
        scope_order: config.scope_completion_order,
        search_term: cli.message.unwrap_or_default(),
        find_all: config.find_all_commit_messages,
        vcs: Arc::clone(&vcs),
    };
    let model = tui::run(config.prefixes(), config.budget(), sources)?;

    let request = session::dispatch(
        model.composed(),
        vcs.as_ref(),
        config.sign_off_commits,
        &cli.git_args,
    )?;
    tracing::debug!(message = %request.message, "committed");

    if let Some(tracker) = tracker.as_mut() {
        finish_tracking(tracker, &config);
    }
    Ok(())
}

/// Record the session; failures here never undo a successful commit
fn finish_tracking(tracker: &mut RuntimeTracker, config: &Config) {
    match tracker.stop() {
        Ok(seconds) if config.show_stats => {
            println!("Program ran for {seconds:.2} seconds");
            print_stats(tracker.stats());
        }
        Ok(_) => {}
        Err(e) => warn(&format!("failed to record runtime: {e}")),
    }

    if let Some(days) = config.stats_retention_days {
        if let Err(e) = tracker.cleanup_old_data(days) {
            warn(&format!("failed to clean up stats: {e}"));
        }
    }
}

fn print_stats(stats: &Stats) {
    println!("{}", "Runtime statistics".bold());
    for (label, seconds) in stats.summary() {
        println!("  {:<12} {}", label, format_seconds(seconds).cyan());
    }
    if !stats.last_update.is_empty() {
        println!("  {:<12} {}", "Last update", stats.last_update.dimmed());
    }
}

fn format_seconds(seconds: f64) -> String {
    let whole = seconds.max(0.0).round() as u64;
    let (hours, minutes, secs) = (whole / 3600, (whole % 3600) / 60, whole % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {secs:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs:02}s")
    } else {
        format!("{seconds:.1}s")
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("COMET_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn warn(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

fn fail(err: &dyn Error) -> ! {
    eprintln!("{}", err.to_string().red());
    process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_passthrough_args() {
        let cli = Cli::parse_from(["comet", "-m", "health", "--", "--amend", "--no-verify"]);
        assert_eq!(cli.message.as_deref(), Some("health"));
        assert_eq!(cli.git_args, vec!["--amend", "--no-verify"]);
    }

    #[test]
    fn test_passthrough_without_separator() {
        let cli = Cli::try_parse_from(["comet", "--amend"]).unwrap();
        assert_eq!(cli.message, None);
        assert_eq!(cli.git_args, vec!["--amend"]);

        let cli = Cli::try_parse_from(["comet", "-m", "term", "--no-verify"]).unwrap();
        assert_eq!(cli.message.as_deref(), Some("term"));
        assert_eq!(cli.git_args, vec!["--no-verify"]);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(4.0), "4.0s");
        assert_eq!(format_seconds(65.0), "1m 05s");
        assert_eq!(format_seconds(3725.0), "1h 02m 05s");
    }
}
