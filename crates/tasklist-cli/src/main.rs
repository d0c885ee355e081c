#![forbid(unsafe_code)]

mod agent;
mod cmd;
mod output;
mod validate;

use clap::{CommandFactory, Parser, Subcommand};
use output::CliError;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_core::config::{self, Overrides};
use tasklist_core::{ErrorCode, TaskError};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use validate::ValidationError;

#[derive(Parser, Debug)]
#[command(
    name = "tl",
    author,
    version,
    about = "tl: tasks with ordered to-do checklists",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Task store to operate on (overrides TASKLIST_FILE and config).
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Record new tasks as created by this name.
    #[arg(long = "as", global = true, value_name = "NAME")]
    as_user: Option<String>,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Create a new task",
        long_about = "Create a new task. Without --position it is appended at the end of the list; a requested position that is already taken lands just after the existing task.",
        after_help = "EXAMPLES:\n    # Create a task due on a date\n    tl create --title \"Write report\" --deadline 2025-05-10\n\n    # Request a position, then pin it to the top\n    tl create --title \"Urgent\" --deadline 2025-05-02 --position 1\n    tl move <guid> 1\n\n    # Emit machine-readable output\n    tl create --title \"Write report\" --deadline 2025-05-10 --json"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Read",
        about = "List tasks",
        long_about = "List tasks with optional filters and sort order. Filters combine.",
        after_help = "EXAMPLES:\n    # List every task in position order\n    tl list\n\n    # Tasks due in the next 7 days, by deadline\n    tl list --due-soon 7 --sort-by deadline\n\n    # Paused tasks whose title mentions \"report\"\n    tl list --state paused --title report"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one task",
        long_about = "Show full details for a single task, including its to-do items.",
        after_help = "EXAMPLES:\n    # Show a task\n    tl view <guid>\n\n    # Emit machine-readable output\n    tl view <guid> --json"
    )]
    View(cmd::view::ViewArgs),

    #[command(
        next_help_heading = "Read",
        about = "Count tasks",
        after_help = "EXAMPLES:\n    tl count"
    )]
    Count,

    #[command(
        next_help_heading = "Lifecycle",
        about = "Edit task fields",
        long_about = "Edit one or more fields of a task. Nothing is written if any value is rejected.",
        after_help = "EXAMPLES:\n    # Rename and reassign\n    tl update <guid> --title \"Write Q2 report\" --responsible ana\n\n    # Push the deadline back\n    tl update <guid> --deadline 2025-06-01"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Mark a task complete",
        long_about = "Mark a task COMPLETED and record when. Completing a completed task is a no-op.",
        after_help = "EXAMPLES:\n    tl complete <guid>"
    )]
    Complete(cmd::complete::CompleteArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Set a task's state",
        after_help = "EXAMPLES:\n    # Pause a task\n    tl set-state <guid> paused\n\n    # Resume it\n    tl set-state <guid> in_progress"
    )]
    SetState(cmd::set_state::SetStateArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Move a task within the list",
        long_about = "Move a task to a new position. Out-of-range positions are clamped.",
        after_help = "EXAMPLES:\n    # Move to the top\n    tl move <guid> 1\n\n    # Move to the end\n    tl move <guid> 999"
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Delete a task",
        after_help = "EXAMPLES:\n    tl delete <guid>"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Checklist",
        about = "Manage a task's to-do items",
        long_about = "Add, edit, complete, remove, reorder and count a task's to-do items.",
        after_help = "EXAMPLES:\n    # Add an item\n    tl todo add <guid> --text \"Collect numbers\"\n\n    # Tick it off\n    tl todo complete <guid> 1"
    )]
    Todo(cmd::todo::TodoArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    tl completions bash\n\n    # Generate zsh completions\n    tl completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("TASKLIST_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "tasklist=debug,info"
        } else if quiet {
            "warn"
        } else {
            "tasklist=info,warn"
        })
    });

    let format = env::var("TASKLIST_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Store path from `--file`, then `TASKLIST_FILE`.
fn store_override(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| {
        env::var_os("TASKLIST_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Map a failed command to the structured error shown to the user.
fn to_cli_error(err: &anyhow::Error) -> CliError {
    if let Some(task_err) = err.downcast_ref::<TaskError>() {
        return CliError::from(task_err);
    }
    if let Some(invalid) = err.downcast_ref::<ValidationError>() {
        return invalid.to_cli_error();
    }
    CliError::new(format!("{err:#}"))
}

fn config_error(err: &anyhow::Error) -> CliError {
    let code = ErrorCode::ConfigParseError;
    CliError::with_details(
        format!("{err:#}"),
        code.hint().unwrap_or("Fix the config file and retry."),
        code.code(),
    )
}

fn dispatch(command: &Commands, session: &cmd::Session) -> anyhow::Result<()> {
    match command {
        Commands::Create(args) => cmd::create::run_create(args, session),
        Commands::List(args) => cmd::list::run_list(args, session),
        Commands::View(args) => cmd::view::run_view(args, session),
        Commands::Count => cmd::count::run_count(session),
        Commands::Update(args) => cmd::update::run_update(args, session),
        Commands::Complete(args) => cmd::complete::run_complete(args, session),
        Commands::SetState(args) => cmd::set_state::run_set_state(args, session),
        Commands::Move(args) => cmd::move_cmd::run_move(args, session),
        Commands::Delete(args) => cmd::delete::run_delete(args, session),
        Commands::Todo(args) => cmd::todo::run_todo(args, session),
        Commands::Completions(args) => {
            let mut cli_command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut cli_command)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = output::resolve_output_mode(cli.json);

    let project_root = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            let _ = output::render_error(
                output,
                &CliError::new(format!("cannot determine working directory: {err}")),
            );
            return ExitCode::FAILURE;
        }
    };

    let overrides = Overrides {
        store: store_override(cli.file),
    };
    let config = match config::resolve_config(&project_root, &overrides) {
        Ok(config) => config,
        Err(err) => {
            let _ = output::render_error(output, &config_error(&err));
            return ExitCode::FAILURE;
        }
    };
    debug!(store = %config.store.display(), "resolved config");

    let creator = agent::resolve_creator(cli.as_user.as_deref(), config.created_by.as_deref());
    let session = cmd::Session {
        output,
        quiet: cli.quiet,
        config,
        creator,
    };

    match dispatch(&cli.command, &session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = %format!("{err:#}"), "command failed");
            let _ = output::render_error(output, &to_cli_error(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["tl", "list", "--json", "--file", "/tmp/t.json", "--as", "ana"]);
        assert!(cli.json);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/t.json")));
        assert_eq!(cli.as_user.as_deref(), Some("ana"));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn flag_store_beats_env() {
        assert_eq!(
            store_override(Some(PathBuf::from("a.json"))),
            Some(PathBuf::from("a.json"))
        );
    }

    #[test]
    fn completions_subcommand_parses_shell() {
        let cli = Cli::parse_from(["tl", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["tl", "create", "--title", "x", "--deadline", "2025-01-01"],
            vec!["tl", "list"],
            vec!["tl", "list", "--due-soon"],
            vec!["tl", "view", "g"],
            vec!["tl", "count"],
            vec!["tl", "update", "g", "--title", "y"],
            vec!["tl", "complete", "g"],
            vec!["tl", "set-state", "g", "paused"],
            vec!["tl", "move", "g", "-2"],
            vec!["tl", "delete", "g"],
            vec!["tl", "todo", "add", "g", "--text", "t"],
            vec!["tl", "todo", "update", "g", "1", "--text", "t"],
            vec!["tl", "todo", "complete", "g", "1"],
            vec!["tl", "todo", "remove", "g", "1"],
            vec!["tl", "todo", "move", "g", "1", "2"],
            vec!["tl", "todo", "count", "g"],
        ];
        for argv in subcommands {
            assert!(Cli::try_parse_from(&argv).is_ok(), "failed to parse {argv:?}");
        }
    }

    #[test]
    fn task_errors_keep_their_code() {
        let err = anyhow::Error::new(TaskError::TaskNotFound("g".to_string()));
        let cli_err = to_cli_error(&err);
        assert_eq!(cli_err.error_code.as_deref(), Some("E2002"));
        assert!(cli_err.suggestion.is_some());
    }

    #[test]
    fn validation_errors_map_to_invalid_field() {
        let err = anyhow::Error::new(ValidationError::new("state", "x", "unknown", "use pending"));
        assert_eq!(to_cli_error(&err).error_code.as_deref(), Some("E2001"));
    }

    #[test]
    fn other_errors_have_no_code() {
        let err = anyhow::anyhow!("boom");
        let cli_err = to_cli_error(&err);
        assert_eq!(cli_err.message, "boom");
        assert!(cli_err.error_code.is_none());
    }
}
