//! Task management commands for CLI.

use clap::Subcommand;
use pomokit_core::AppConfig;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task at the top of the list
    Add {
        /// Task title
        title: String,
        /// Category for the session log (default from config)
        #[arg(long)]
        category: Option<String>,
        /// Estimated pomodoros (default: 1)
        #[arg(long, default_value_t = 1)]
        est: u32,
    },
    /// List tasks
    List {
        /// Only tasks not yet completed
        #[arg(long)]
        pending: bool,
    },
    /// Flip a task's completed flag
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, config: &AppConfig) -> CliResult {
    let mut app = open_app(config)?;

    match action {
        TaskAction::Add {
            title,
            category,
            est,
        } => {
            let task = app.add_task(&title, category.as_deref(), est)?;
            print_json(task)?;
            eprintln!("Task created");
        }
        TaskAction::List { pending } => {
            let tasks: Vec<_> = app
                .tasks()
                .iter()
                .filter(|t| !pending || !t.completed)
                .collect();
            print_json(&tasks)?;
        }
        TaskAction::Toggle { id } => {
            let completed = app.toggle_task(&id)?;
            let state = if completed { "completed" } else { "open" };
            println!("{id}: {state}");
        }
        TaskAction::Delete { id } => {
            let task = app.delete_task(&id)?;
            println!("Task deleted: {}", task.title);
        }
    }
    Ok(())
}
