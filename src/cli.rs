use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::models::{Credentials, Task};
use crate::utils::{deadline_status, parse_date, today, today_string, DeadlineStatus};

#[derive(Parser)]
#[command(name = "taskdue")]
#[command(about = "Terminal client for a remote todo service")]
#[command(version)]
pub struct Cli {
    /// Override the configured server URL
    #[arg(short, long)]
    pub server: Option<String>,

    /// Use development mode (uses a separate dev config)
    #[arg(long)]
    pub dev: bool,

    /// Use a specific config file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Register a new account
    Register {
        /// Account username
        username: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Log in and print the session token
    Login {
        /// Account username
        username: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Quickly add a new task
    AddTask {
        /// Task description
        description: String,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
        /// Session token from `taskdue login`
        #[arg(long)]
        token: String,
    },
    /// List open tasks with their deadline status
    ListTasks {
        /// Session token from `taskdue login`
        #[arg(long)]
        token: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Request failed: {0}")]
    Api(#[from] ApiError),
    #[error("Failed to parse date: {0}")]
    DateParse(String),
}

/// Handle the register command
pub fn handle_register(username: String, password: String, client: &ApiClient) -> Result<(), CliError> {
    client.register(&Credentials::new(username, password))?;
    println!("Registered. Log in with `taskdue login` to get a session token.");
    Ok(())
}

/// Handle the login command. Prints the token so it can be passed to the
/// one-shot task commands.
pub fn handle_login(username: String, password: String, client: &ApiClient) -> Result<(), CliError> {
    let token = client.login(&Credentials::new(username, password))?;
    println!("{}", token);
    Ok(())
}

/// Handle the add-task command
pub fn handle_add_task(
    description: String,
    start: Option<String>,
    deadline: String,
    token: &str,
    client: &ApiClient,
) -> Result<(), CliError> {
    let start_date = start.unwrap_or_else(today_string);
    for date_str in [&start_date, &deadline] {
        parse_date(date_str).map_err(|e| {
            CliError::DateParse(format!("Invalid date format '{}': {}", date_str, e))
        })?;
    }

    let task = Task::new(description, start_date, deadline);
    let created = client.create_task(token, &task)?;
    match created.id {
        Some(id) => println!("Task created successfully (ID: {})", id),
        None => println!("Task created successfully"),
    }

    Ok(())
}

/// Handle the list-tasks command
pub fn handle_list_tasks(token: &str, client: &ApiClient) -> Result<(), CliError> {
    let tasks = client.list_tasks(token)?;
    let today = today();

    let mut shown = 0;
    for task in tasks.iter().filter(|t| !t.done) {
        let marker = match parse_date(&task.deadline) {
            Ok(deadline) => match deadline_status(deadline, today) {
                DeadlineStatus::Urgent => "!",
                DeadlineStatus::Warning => "~",
                DeadlineStatus::Normal => " ",
            },
            Err(_) => "?",
        };
        println!(
            "{} {}  (start {}, due {})",
            marker, task.description, task.start_date, task.deadline
        );
        shown += 1;
    }

    if shown == 0 {
        println!("No open tasks.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn config_flag_is_accepted() {
        let cli = Cli::try_parse_from(["taskdue", "--config", "/tmp/custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/custom.toml")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_combine_with_subcommands() {
        let cli = Cli::try_parse_from([
            "taskdue",
            "--dev",
            "--config",
            "/tmp/custom.toml",
            "--server",
            "http://localhost:3000",
            "list-tasks",
            "--token",
            "t",
        ])
        .unwrap();
        assert!(cli.dev);
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/custom.toml")));
        assert_eq!(cli.server.as_deref(), Some("http://localhost:3000"));
        assert!(matches!(cli.command, Some(Commands::ListTasks { .. })));
    }
}
