//! Terminal adapter for the tasker core.
//!
//! # Responsibility
//! - Parse command-line input and hand validated values to the core.
//! - Render core results and errors as user-facing text.
//!
//! # Invariants
//! - All reads/writes go through `TaskService`/`export_csv`; this crate
//!   issues no SQL of its own.
//! - A missing task id is reported as a normal outcome, not a failure exit.

use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tasker_core::db::open_db;
use tasker_core::{
    default_log_level, export_csv, init_logging, CompletionOutcome, SqliteTaskRepository, Task,
    TaskService,
};

/// A simple CLI task manager.
#[derive(Debug, Parser)]
#[command(name = "tasker", version)]
#[command(about = "A simple CLI task manager")]
#[command(long_about = "Tasker is a command-line task management tool:
- Add new tasks
- List all tasks
- Mark tasks as done
- Export tasks to CSV

Tasks are stored locally in a SQLite database file.")]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, default_value = "tasker.db")]
    db: PathBuf,

    /// Directory for log files; file logging is disabled when omitted
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List all tasks
    List,
    /// Mark a task as done
    Done {
        /// Id of the task to complete
        id: i64,
    },
    /// Export tasks to CSV
    Export {
        /// Output CSV file path
        #[arg(short, long, default_value = "tasks.csv")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        let dir = absolutize(dir);
        match init_logging(default_log_level(), &dir.to_string_lossy()) {
            Ok(()) => info!("event=cli_start module=cli status=ok"),
            // Logging is ambient; a broken log setup must not block commands.
            Err(err) => eprintln!("Warning: logging disabled: {err}"),
        }
    }

    // Single connection for the process lifetime, released on every exit
    // path when it drops at the end of main.
    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Error initializing database: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    match cli.command {
        Commands::Add { title, description } => match service.add_task(title.as_str(), description)
        {
            Ok(_) => {
                println!("✓ Task added: {title}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error adding task: {err}");
                ExitCode::FAILURE
            }
        },
        Commands::List => match service.list_tasks() {
            Ok(tasks) => {
                for task in &tasks {
                    print_task_summary(task);
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error listing tasks: {err}");
                ExitCode::FAILURE
            }
        },
        Commands::Done { id } => match service.complete_task(id) {
            Ok(CompletionOutcome::Completed(task)) => {
                println!("✓ Task marked as done: {}", task.title);
                print_task_detail(&task);
                ExitCode::SUCCESS
            }
            Ok(CompletionOutcome::AlreadyDone(task)) => {
                println!("✅ Task already done!");
                print_task_detail(&task);
                ExitCode::SUCCESS
            }
            Err(tasker_core::RepoError::NotFound(_)) => {
                println!("❌ Task not found: {id}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error marking task as done: {err}");
                ExitCode::FAILURE
            }
        },
        Commands::Export { output } => {
            let repo = SqliteTaskRepository::new(&conn);
            match export_csv(&repo, &output) {
                Ok(count) => {
                    println!(
                        "Tasks exported successfully to {} ({count} tasks)",
                        output.display()
                    );
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error exporting tasks: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn print_task_summary(task: &Task) {
    let icon = if task.done { "✅" } else { "❌" };
    println!("{icon} {} - {}", task.id, task.title);
    println!("Description: {}", placeholder_if_empty(&task.description));
    println!(
        "Created At: {}",
        task.created_at.format(DISPLAY_TIMESTAMP_FORMAT)
    );
    println!("Completed At: {}", completed_at_text(task));
    println!("--------------------------------");
}

fn print_task_detail(task: &Task) {
    println!("--------------------------------");
    println!("Title: {}", task.title);
    println!("Description: {}", placeholder_if_empty(&task.description));
    println!(
        "Created At: {}",
        task.created_at.format(DISPLAY_TIMESTAMP_FORMAT)
    );
    println!("Completed At: {}", completed_at_text(task));
    println!("--------------------------------");
}

fn completed_at_text(task: &Task) -> String {
    task.completed_at
        .map(|instant| instant.format(DISPLAY_TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn placeholder_if_empty(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}
