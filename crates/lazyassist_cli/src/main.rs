//! Command-line front end for the assistant core.
//!
//! # Responsibility
//! - Wire config, logging, storage and feeds into `CommandService`.
//! - Print every result as one JSON document on stdout.

use clap::{Parser, Subcommand};
use lazyassist_core::db::open_db;
use lazyassist_core::{
    classify, init_from_config, AssistantConfig, CommandService, CuratedNewsProvider,
    GNewsProvider, NewsProvider, ReminderListQuery, ReminderRepository, SqliteReminderRepository,
    SqliteTaskRepository, TaskListQuery, TaskRepository, WttrWeatherProvider,
};
use log::error;
use serde_json::{json, Value};
use std::process::ExitCode;

/// Rule-based personal assistant: tasks, reminders, weather and news.
#[derive(Parser, Debug)]
#[command(name = "lazyassist")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a natural-language command
    Run {
        /// Command words, e.g. `add task buy milk by friday`
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Print the classification of a command without acting on it
    Classify {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// List stored tasks
    Tasks,
    /// List stored reminders
    Reminders,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(output) => {
            println!("{output}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Value, Value> {
    let config = AssistantConfig::from_env().map_err(|err| failure(err.to_string()))?;
    if let Err(err) = init_from_config(&config) {
        eprintln!("lazyassist: file logging disabled: {err}");
    }

    match &cli.command {
        Command::Run { words } => process_command(&config, &words.join(" ")),
        Command::Classify { words } => {
            let classification = classify(&words.join(" "));
            serde_json::to_value(classification).map_err(|err| failure(err.to_string()))
        }
        Command::Tasks => list_tasks(&config),
        Command::Reminders => list_reminders(&config),
    }
}

fn process_command(config: &AssistantConfig, command: &str) -> Result<Value, Value> {
    let conn = open_db(&config.db_path).map_err(|err| failure(err.to_string()))?;
    let news: Box<dyn NewsProvider> = match &config.news_api_key {
        Some(api_key) => Box::new(GNewsProvider::new(api_key.clone(), config.http_timeout)),
        None => Box::new(CuratedNewsProvider),
    };
    let service = CommandService::new(
        SqliteTaskRepository::new(&conn),
        SqliteReminderRepository::new(&conn),
        WttrWeatherProvider::new(config.http_timeout),
        news,
        config.default_location.clone(),
    );

    let now = chrono::Local::now().naive_local();
    match service.process(command, now) {
        Ok(outcome) => Ok(json!({
            "success": outcome.is_success(),
            "message": outcome.message(),
            "result": outcome,
        })),
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            Err(failure(err.to_string()))
        }
    }
}

fn list_tasks(config: &AssistantConfig) -> Result<Value, Value> {
    let conn = open_db(&config.db_path).map_err(|err| failure(err.to_string()))?;
    let tasks = SqliteTaskRepository::new(&conn)
        .list_tasks(&TaskListQuery::default())
        .map_err(|err| failure(err.to_string()))?;
    Ok(json!({ "success": true, "tasks": tasks }))
}

fn list_reminders(config: &AssistantConfig) -> Result<Value, Value> {
    let conn = open_db(&config.db_path).map_err(|err| failure(err.to_string()))?;
    let reminders = SqliteReminderRepository::new(&conn)
        .list_reminders(&ReminderListQuery::default())
        .map_err(|err| failure(err.to_string()))?;
    Ok(json!({ "success": true, "reminders": reminders }))
}

fn failure(message: impl Into<String>) -> Value {
    json!({ "success": false, "error": message.into() })
}
