//! To-do list command-line tool.
//!
//! One-shot subcommands for scripting plus the interactive numbered menu.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use todo_organizer::cli::commands::{self, CommandContext};
use todo_organizer::cli::menu::Menu;
use todo_organizer::cli::{Cli, Command};
use todo_organizer::config::Config;
use todo_organizer::db::Database;
use todo_organizer::format::format_error;
use todo_organizer::logging::{self, LogTarget};
use todo_organizer::types::parse_due_date;
use tracing::{debug, warn};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = Config::discover(cli.config.as_deref().map(Path::new))?;
    if let Some(db_path) = &cli.database {
        config.store.db_path = db_path.into();
    }
    debug!(?config, "Resolved configuration");

    let today = match &cli.today {
        Some(s) => parse_due_date(s).context("Invalid --today")?,
        None => Local::now().date_naive(),
    };

    config.ensure_db_dir()?;
    let db = Database::open_with_timeout(&config.store.db_path, config.store.busy_timeout_ms)
        .with_context(|| format!("Failed to open database {}", config.store.db_path.display()))?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            run_menu(&db, &config, today)?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let ctx = CommandContext {
                db: &db,
                view: &config.view,
                format: cli.format,
                today,
            };
            match commands::run(&ctx, &command) {
                Ok(output) => {
                    println!("{}", output.trim_end());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    warn!(error = %e, code = ?e.code(), "Command failed");
                    eprintln!("{}", format_error(&e, cli.format));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn run_menu(db: &Database, config: &Config, today: NaiveDate) -> Result<()> {
    Menu::new(db, &config.view, today, io::stdin().lock(), io::stdout().lock()).run()
}
