//! Command-line shell for Pro To-Do
//!
//! Thin presentation layer over `pt-core`: each subcommand maps to one store
//! operation. Input validation, rendering and ratio math live here, not in
//! the core.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pt_core::task::{FileTaskStore, FilterMode, Priority, Task, TaskStore};

#[derive(Debug, Parser)]
#[command(name = "pt", version, about = "Single-user task list manager")]
struct Cli {
    /// Path to the task file (defaults to $PT_TASKS_FILE, then tasks.json)
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a new task
    Add {
        /// Task description
        text: String,

        /// Task priority
        #[arg(long, short, value_enum, default_value = "medium")]
        priority: PriorityArg,
    },
    /// List tasks with their positions
    List {
        /// Which tasks to show
        #[arg(long, short, value_enum, default_value = "all")]
        filter: FilterArg,
    },
    /// Mark the task at POSITION as completed
    Done { position: usize },
    /// Mark the task at POSITION as not completed
    Undo { position: usize },
    /// Delete the task at POSITION
    Rm { position: usize },
    /// Remove all completed tasks
    Clear,
    /// Show completion progress
    Progress,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Active,
    Completed,
}

impl FilterArg {
    fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl From<FilterArg> for FilterMode {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => FilterMode::All,
            FilterArg::Active => FilterMode::Active,
            FilterArg::Completed => FilterMode::Completed,
        }
    }
}

fn render_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{}] {:<8} {}", mark, task.priority, task.text)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pt_cli=info,pt_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Determine the backing file
    let file = cli.file.unwrap_or_else(|| {
        std::env::var("PT_TASKS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("tasks.json"))
    });
    tracing::debug!("Using task file: {:?}", file);

    let mut store = TaskStore::new(FileTaskStore::new(file));

    match cli.command {
        Command::Add { text, priority } => {
            // The store treats empty text as a no-op; reject it here with
            // feedback instead of silently doing nothing.
            if text.trim().is_empty() {
                anyhow::bail!("task text must not be empty");
            }
            if let Some(task) = store.add(text, priority.into())? {
                println!("Added {}", render_task(&task));
            }
        }
        Command::List { filter } => {
            let mode = FilterMode::from(filter);
            // Positions shown are positions in the full collection, so they
            // stay valid as arguments to done/undo/rm.
            let mut shown = 0;
            for (position, task) in store.tasks().iter().enumerate() {
                if mode.matches(task) {
                    println!("{:>3}  {}", position, render_task(task));
                    shown += 1;
                }
            }
            if shown == 0 {
                println!("No tasks found for the {} filter", filter.label());
            }
        }
        Command::Done { position } => {
            store.set_completed(position, true)?;
            println!("Completed task {}", position);
        }
        Command::Undo { position } => {
            store.set_completed(position, false)?;
            println!("Reopened task {}", position);
        }
        Command::Rm { position } => {
            let task = store.delete_at(position)?;
            println!("Deleted {}", render_task(&task));
        }
        Command::Clear => {
            let removed = store.clear_completed()?;
            println!("Cleared {} completed task(s)", removed);
        }
        Command::Progress => {
            let progress = store.progress();
            if progress.total == 0 {
                println!("Your to-do list is empty. Add a task to get started!");
            } else {
                let percent = progress.completed * 100 / progress.total;
                println!(
                    "{} of {} tasks completed ({}%)",
                    progress.completed, progress.total, percent
                );
            }
        }
    }

    Ok(())
}
