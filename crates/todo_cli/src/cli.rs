//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_core::TaskId;

pub const DEFAULT_DB_FILE: &str = "todo_cli.sqlite3";

/// Smoke driver for the to-do core.
#[derive(Debug, Parser)]
#[command(name = "todo_cli", about = "Drive the to-do core against a local database file")]
pub struct Cli {
    /// SQLite file holding the task snapshot
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Absolute directory for rolling log files; logging stays off when omitted
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print all tasks in display order
    List,
    /// Print favourite tasks in display order
    Favourites,
    /// Add a task
    Add { title: String, description: String },
    /// Replace title and description of a task
    Edit {
        id: TaskId,
        title: String,
        description: String,
    },
    /// Toggle completion
    Done { id: TaskId },
    /// Toggle favourite
    Fav { id: TaskId },
    /// Delete a task
    Rm { id: TaskId },
    /// Drop the stored snapshot
    Reset,
    /// Print the core version
    Version,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DEFAULT_DB_FILE};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn db_defaults_when_omitted() {
        let cli = Cli::try_parse_from(["todo_cli", "list"]).unwrap();
        assert_eq!(cli.db, PathBuf::from(DEFAULT_DB_FILE));
        assert_eq!(cli.log_dir, None);
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn db_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["todo_cli", "rm", "3", "--db", "/tmp/t.db"]).unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/t.db"));
        assert_eq!(cli.command, Command::Rm { id: 3 });
    }

    #[test]
    fn edit_takes_id_title_and_description() {
        let cli = Cli::try_parse_from([
            "todo_cli",
            "--log-dir",
            "/tmp/logs",
            "edit",
            "2",
            "Title",
            "line 1\nline 2",
        ])
        .unwrap();
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(
            cli.command,
            Command::Edit {
                id: 2,
                title: "Title".to_string(),
                description: "line 1\nline 2".to_string(),
            }
        );
    }

    #[test]
    fn rejects_missing_path_and_bad_id() {
        assert!(Cli::try_parse_from(["todo_cli", "list", "--db"]).is_err());
        assert!(Cli::try_parse_from(["todo_cli", "done", "three"]).is_err());
        assert!(Cli::try_parse_from(["todo_cli"]).is_err());
    }
}
