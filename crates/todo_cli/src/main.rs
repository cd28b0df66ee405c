//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive `todo_core` against a real database file without the Flutter runtime.
//! - Keep output deterministic for quick local sanity checks.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::process::ExitCode;
use todo_core::{
    default_log_level, init_logging, MissingTaskPolicy, SqliteKeyValueStore, Task, TaskId,
    TaskInput, TaskRepository, TaskStore, TaskStoreConfig,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = &cli.log_dir {
        start_logging(log_dir)?;
    }

    if cli.command == Command::Version {
        println!("todo_core version={}", todo_core::core_version());
        return Ok(());
    }

    let kv = SqliteKeyValueStore::open(&cli.db)
        .map_err(|err| format!("failed to open `{}`: {err}", cli.db.display()))?;

    if cli.command == Command::Reset {
        let mut repo = TaskRepository::new(kv);
        repo.clear().map_err(|err| err.to_string())?;
        println!("cleared tasks in {}", cli.db.display());
        return Ok(());
    }

    let config = TaskStoreConfig {
        missing_task_policy: MissingTaskPolicy::Report,
        ..TaskStoreConfig::default()
    };
    let mut store = TaskStore::open(kv, config);

    match cli.command {
        Command::List => print_tasks(store.tasks()),
        Command::Favourites => print_tasks(&store.favourite_tasks()),
        Command::Add { title, description } => {
            let input = TaskInput::new(title, description);
            input.validate().map_err(|err| err.to_string())?;
            let task = store
                .add_task(input.title, input.description)
                .map_err(|err| err.to_string())?;
            print_tasks(std::slice::from_ref(&task));
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            let input = TaskInput::new(title, description);
            input.validate().map_err(|err| err.to_string())?;
            let edited = find(&store, id)?.with_content(input.title, input.description);
            store
                .update_task(edited.clone())
                .map_err(|err| err.to_string())?;
            print_tasks(std::slice::from_ref(&edited));
        }
        Command::Done { id } => {
            let task = find(&store, id)?;
            store
                .toggle_task_completion(&task)
                .map_err(|err| err.to_string())?;
        }
        Command::Fav { id } => {
            let task = find(&store, id)?;
            store
                .toggle_favourite_task(&task)
                .map_err(|err| err.to_string())?;
        }
        Command::Rm { id } => {
            let task = find(&store, id)?;
            store.delete_task(&task).map_err(|err| err.to_string())?;
        }
        Command::Reset | Command::Version => {}
    }

    match store.last_save_error() {
        Some(err) => Err(format!("changes kept in memory but not saved: {err}")),
        None => Ok(()),
    }
}

fn start_logging(log_dir: &Path) -> Result<(), String> {
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", log_dir.display()))?;
    init_logging(default_log_level(), log_dir).map_err(|err| format!("logging init failed: {err}"))
}

fn find(store: &TaskStore<SqliteKeyValueStore>, id: TaskId) -> Result<Task, String> {
    store
        .get_task(id)
        .cloned()
        .ok_or_else(|| format!("task not found: {id}"))
}

fn print_tasks(tasks: &[Task]) {
    for task in tasks {
        println!(
            "{:>4} [{}]{} {}",
            task.id,
            if task.is_completed { "x" } else { " " },
            if task.is_favourite { "*" } else { " " },
            task.title
        );
    }
}
