//! Argument definitions and command dispatch.

use crate::config::resolve_db_path;
use crate::render;
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use todo_core::{DbHandle, SqliteTaskRepository, TaskId, TaskRepository, TaskState};

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "A local to-do list")]
#[command(version)]
pub struct Cli {
    /// Task database file
    #[arg(long, env = "TODO_DB_PATH", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, env = "TODO_LOG_DIR", value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TODO_LOG_LEVEL", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show all tasks with the summary footer (default)
    List {
        /// Print tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip a task between open and completed
    Toggle { id: TaskId },
    /// Replace a task's text
    Rename {
        id: TaskId,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a task
    Remove { id: TaskId },
    /// Delete every task
    Clear,
    /// Show only the summary counts
    Stats,
}

impl Cli {
    fn selected_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::List { json: false })
    }
}

/// Opens the configured database, runs the command and prints the result.
///
/// Returns `false` when the command recorded a task error.
pub fn run(args: &Cli) -> Result<bool, Box<dyn Error>> {
    let db_path = resolve_db_path(args.db.as_deref());
    if let Some(parent) = db_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let handle = DbHandle::file(&db_path);
    let command = args.selected_command();
    info!("event=cli_run module=cli status=start command={}", command.name());

    let ok = {
        let mut state = TaskState::new(SqliteTaskRepository::new(&handle));
        execute(&command, &mut state, &mut io::stdout().lock(), &mut io::stderr().lock())?
    };
    handle.close()?;

    Ok(ok)
}

/// Runs `command` against `state` and renders the outcome.
///
/// Returns `false` when the container recorded an error.
pub fn execute<R: TaskRepository>(
    command: &Command,
    state: &mut TaskState<R>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    state.refresh();
    if state.error().is_none() {
        apply(command, state);
    }

    match command {
        Command::List { json: true } => render::write_json(out, state.tasks())?,
        Command::Stats => render::write_summary(out, &state.summary())?,
        _ => render::write_list(out, state.tasks(), &state.summary())?,
    }

    if let Some(error) = state.error() {
        writeln!(err, "error: {error}")?;
        return Ok(false);
    }
    Ok(true)
}

fn apply<R: TaskRepository>(command: &Command, state: &mut TaskState<R>) {
    match command {
        Command::List { .. } | Command::Stats => {}
        Command::Add { text } => state.create(&text.join(" ")),
        Command::Toggle { id } => state.toggle_completion(*id),
        Command::Rename { id, text } => state.rename(*id, &text.join(" ")),
        Command::Remove { id } => state.remove(*id),
        Command::Clear => state.clear_all(),
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Add { .. } => "add",
            Self::Toggle { .. } => "toggle",
            Self::Rename { .. } => "rename",
            Self::Remove { .. } => "remove",
            Self::Clear => "clear",
            Self::Stats => "stats",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, run, Cli, Command};
    use clap::Parser;
    use std::path::Path;
    use todo_core::{DbHandle, SqliteTaskRepository, TaskRepository, TaskState};

    fn run_command(
        state: &mut TaskState<SqliteTaskRepository<'_>>,
        command: Command,
    ) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = execute(&command, state, &mut out, &mut err).unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn parses_multi_word_text_and_defaults_to_list() {
        let cli = Cli::try_parse_from(["todo", "add", "visit", "the", "museum"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Add {
                text: vec!["visit".into(), "the".into(), "museum".into()]
            })
        );

        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert_eq!(cli.selected_command(), Command::List { json: false });

        assert!(Cli::try_parse_from(["todo", "toggle", "abc"]).is_err());
    }

    #[test]
    fn add_then_toggle_prints_list_and_footer() {
        let handle = DbHandle::in_memory();
        let mut state = TaskState::new(SqliteTaskRepository::new(&handle));

        let (ok, out, _) = run_command(
            &mut state,
            Command::Add {
                text: vec!["catch".into(), "bugs".into()],
            },
        );
        assert!(ok);
        assert!(out.contains("[ ] 1  catch bugs"));

        let (ok, out, _) = run_command(&mut state, Command::Toggle { id: 1 });
        assert!(ok);
        assert!(out.contains("[x] 1  catch bugs"));
        assert!(out.contains("Total 1 · Completed 1 · Remaining 0"));
    }

    #[test]
    fn blank_add_reports_error_and_fails() {
        let handle = DbHandle::in_memory();
        let mut state = TaskState::new(SqliteTaskRepository::new(&handle));

        let (ok, out, err) = run_command(
            &mut state,
            Command::Add {
                text: vec!["   ".into()],
            },
        );
        assert!(!ok);
        assert_eq!(err, "error: Todo text cannot be empty\n");
        assert!(out.contains("No todos yet."));
    }

    #[test]
    fn toggle_unknown_id_fails_with_not_found() {
        let handle = DbHandle::in_memory();
        let mut state = TaskState::new(SqliteTaskRepository::new(&handle));

        let (ok, _, err) = run_command(&mut state, Command::Toggle { id: 12 });
        assert!(!ok);
        assert!(err.contains("Todo not found"));
    }

    #[test]
    fn list_json_prints_camel_case_records() {
        let handle = DbHandle::in_memory();
        let mut state = TaskState::new(SqliteTaskRepository::new(&handle));
        state.create("ship it");

        let (ok, out, _) = run_command(&mut state, Command::List { json: true });
        assert!(ok);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["text"], "ship it");
        assert_eq!(parsed[0]["completed"], false);
        assert!(parsed[0]["createdAt"].is_i64());
    }

    #[test]
    fn stats_and_clear() {
        let handle = DbHandle::in_memory();
        let mut state = TaskState::new(SqliteTaskRepository::new(&handle));
        state.create("a");
        state.create("b");

        let (_, out, _) = run_command(&mut state, Command::Stats);
        assert_eq!(out, "Total 2 · Completed 0 · Remaining 2\n");

        let (ok, out, _) = run_command(&mut state, Command::Clear);
        assert!(ok);
        assert!(out.contains("Total 0 · Completed 0 · Remaining 0"));
    }

    #[test]
    fn run_persists_changes_in_nested_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("data").join("todo.sqlite3");
        let db_arg = db_path.to_str().unwrap();
        let run_with = |args: &[&str]| {
            let mut argv = vec!["todo", "--db", db_arg];
            argv.extend_from_slice(args);
            run(&Cli::try_parse_from(argv).unwrap()).unwrap()
        };

        assert!(run_with(&["add", "plant", "bells"]));
        assert!(db_path.is_file());
        assert_eq!(stored_texts(&db_path), ["plant bells"]);

        assert!(run_with(&["rename", "1", "water", "flowers"]));
        assert_eq!(stored_texts(&db_path), ["water flowers"]);

        assert!(!run_with(&["rename", "1", "   "]));
        assert_eq!(stored_texts(&db_path), ["water flowers"]);

        assert!(run_with(&["remove", "1"]));
        assert!(stored_texts(&db_path).is_empty());
    }

    fn stored_texts(path: &Path) -> Vec<String> {
        let handle = DbHandle::file(path);
        let texts = SqliteTaskRepository::new(&handle)
            .list_all()
            .unwrap()
            .into_iter()
            .map(|task| task.text)
            .collect();
        handle.close().unwrap();
        texts
    }
}
