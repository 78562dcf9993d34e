//! Path and logging configuration resolved from flags and environment.

use crate::cli::Cli;
use std::io;
use std::path::{Path, PathBuf};
use todo_core::default_log_level;

const APP_DIR_NAME: &str = "todo";
const DB_FILE_NAME: &str = "todo.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Database file from `--db`/`TODO_DB_PATH`, else the per-user data dir.
pub fn resolve_db_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => app_data_dir().join(DB_FILE_NAME),
    }
}

/// Absolute log directory from `--log-dir`/`TODO_LOG_DIR`, else the data dir.
pub fn resolve_log_dir(explicit: Option<&Path>) -> io::Result<PathBuf> {
    match explicit {
        Some(path) if path.is_absolute() => Ok(path.to_path_buf()),
        Some(path) => Ok(std::env::current_dir()?.join(path)),
        None => Ok(app_data_dir().join(LOG_DIR_NAME)),
    }
}

pub fn init_logging_from(args: &Cli) -> Result<(), String> {
    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = resolve_log_dir(args.log_dir.as_deref())
        .map_err(|err| format!("cannot resolve log directory: {err}"))?;
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log directory `{}` is not valid UTF-8", log_dir.display()))?;
    todo_core::init_logging(level, log_dir)
}

fn app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
