//! Execution of one-shot subcommands against the store.

use super::{AddArgs, Command, EditArgs, ListArgs};
use crate::config::ViewConfig;
use crate::db::Database;
use crate::error::{Result, TodoError};
use crate::format::{OutputFormat, format_view};
use crate::organizer::load_view;
use crate::types::{TaskId, TaskStatus, parse_due_date};
use chrono::NaiveDate;
use serde_json::json;
use tracing::debug;

/// Shared state for running a command.
pub struct CommandContext<'a> {
    pub db: &'a Database,
    pub view: &'a ViewConfig,
    pub format: OutputFormat,
    pub today: NaiveDate,
}

/// Check a due date typed in for a new task: well-formed and not in the past.
pub fn validate_entry_due_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = parse_due_date(input)?;
    if date < today {
        return Err(TodoError::invalid_value(
            "due_date",
            format!("Due date {} is in the past (today is {}).", date, today),
        ));
    }
    Ok(date)
}

/// Run a one-shot command and return its rendered output.
///
/// `Command::Menu` is interactive and must be run through `Menu`; passing it
/// here is rejected.
pub fn run(ctx: &CommandContext<'_>, command: &Command) -> Result<String> {
    match command {
        Command::Add(args) => add(ctx, args),
        Command::List(args) => list(ctx, args),
        Command::Complete { id } => set_status(ctx, *id, TaskStatus::Complete),
        Command::Reopen { id } => set_status(ctx, *id, TaskStatus::Pending),
        Command::Toggle { id } => toggle(ctx, *id),
        Command::Edit(args) => edit(ctx, args),
        Command::Delete { id } => delete(ctx, *id),
        Command::Menu => Err(TodoError::invalid_value(
            "command",
            "The menu is interactive and cannot run as a one-shot command.",
        )),
    }
}

fn add(ctx: &CommandContext<'_>, args: &AddArgs) -> Result<String> {
    validate_entry_due_date(&args.due, ctx.today)?;
    let id = ctx.db.add_task(&args.description, &args.due)?;
    debug!(task_id = id, "Task added via CLI");

    Ok(match ctx.format {
        OutputFormat::Json => json!({ "id": id, "status": TaskStatus::Pending }).to_string(),
        _ => format!("Task {} added.", id),
    })
}

fn list(ctx: &CommandContext<'_>, args: &ListArgs) -> Result<String> {
    let filter = args.filter.unwrap_or(ctx.view.default_filter);
    let sort = args.sort.unwrap_or(ctx.view.default_sort);
    let view = load_view(ctx.db, filter, sort, ctx.today)?;
    Ok(format_view(&view, ctx.format))
}

fn set_status(ctx: &CommandContext<'_>, id: TaskId, status: TaskStatus) -> Result<String> {
    ctx.db.set_task_status(id, status)?;
    Ok(status_message(ctx.format, id, status))
}

fn toggle(ctx: &CommandContext<'_>, id: TaskId) -> Result<String> {
    let status = ctx.db.toggle_task_status(id)?;
    Ok(status_message(ctx.format, id, status))
}

fn status_message(format: OutputFormat, id: TaskId, status: TaskStatus) -> String {
    match format {
        OutputFormat::Json => json!({ "id": id, "status": status }).to_string(),
        _ => format!("Task {} is now {}.", id, status),
    }
}

fn edit(ctx: &CommandContext<'_>, args: &EditArgs) -> Result<String> {
    ctx.db.update_task(args.id, &args.description, &args.due)?;

    match ctx.format {
        OutputFormat::Json => {
            let task = ctx.db.get_task(args.id)?.ok_or(TodoError::NotFound(args.id))?;
            Ok(json!(task).to_string())
        }
        _ => Ok(format!("Task {} updated.", args.id)),
    }
}

fn delete(ctx: &CommandContext<'_>, id: TaskId) -> Result<String> {
    ctx.db.delete_task(id)?;
    Ok(match ctx.format {
        OutputFormat::Json => json!({ "id": id, "deleted": true }).to_string(),
        _ => format!("Task {} deleted.", id),
    })
}
