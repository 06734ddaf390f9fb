//! CLI command definitions for the to-do tool.
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod commands;
pub mod menu;

use crate::format::OutputFormat;
use crate::organizer::{FilterOption, SortOption};
use crate::types::TaskId;
use clap::{Args, Parser, Subcommand};

/// Personal to-do list with short-term and long-term views
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Reference date (YYYY-MM-DD) for classification and entry checks; defaults to today
    #[arg(long, global = true, value_name = "DATE")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a pending task
    Add(AddArgs),

    /// Show tasks, filtered and sorted
    List(ListArgs),

    /// Mark a task complete
    Complete { id: TaskId },

    /// Mark a task pending again
    Reopen { id: TaskId },

    /// Flip a task between pending and complete
    Toggle { id: TaskId },

    /// Replace a task's description and due date
    Edit(EditArgs),

    /// Delete a task (no error if it is already gone)
    Delete { id: TaskId },

    /// Interactive numbered menu (default if no subcommand given)
    Menu,
}

/// Arguments for the add subcommand
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    /// Task description, optionally prefixed with an order like "1 -"
    pub description: String,

    /// Due date (YYYY-MM-DD), today or later
    #[arg(long, value_name = "DATE")]
    pub due: String,
}

/// Arguments for the list subcommand
#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct ListArgs {
    /// Which tasks to show (default from config)
    #[arg(long, value_enum)]
    pub filter: Option<FilterOption>,

    /// Display order (default from config)
    #[arg(long, value_enum)]
    pub sort: Option<SortOption>,
}

/// Arguments for the edit subcommand
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: TaskId,

    /// New description
    #[arg(long)]
    pub description: String,

    /// New due date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub due: String,
}
