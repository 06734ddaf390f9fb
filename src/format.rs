//! Output formatting for task views: plain text, markdown and JSON.

use crate::error::TodoError;
use crate::organizer::{OrganizedTask, Summary, View};
use crate::types::Task;
use clap::ValueEnum;
use serde_json::{Value, json};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

/// Render a view in the requested format.
pub fn format_view(view: &View, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_view_text(view),
        OutputFormat::Markdown => format_view_markdown(view),
        OutputFormat::Json => view_to_json(view).to_string(),
    }
}

/// One line per task, in the classic `ID: .., Description: ..` layout.
pub fn format_task_line(task: &Task) -> String {
    format!(
        "ID: {}, Description: {}, Status: {}, Due Date: {}",
        task.id,
        task.description,
        task.status,
        task.due_date_str().unwrap_or_else(|| "None".to_string())
    )
}

fn format_view_text(view: &View) -> String {
    if view.tasks.is_empty() {
        return format!("No tasks found ({}).\n", view.filter);
    }

    let mut out = format!("Tasks ({}, sorted by {}):\n", view.filter, view.sort);
    for entry in &view.tasks {
        out.push_str(&format!(
            "[{:>2}] {}{}\n",
            entry.class.tag(),
            format_task_line(&entry.task),
            due_hint(entry)
        ));
    }
    out.push_str(&format_summary(&view.summary));
    out.push('\n');
    out
}

fn format_view_markdown(view: &View) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Tasks: {} ({})\n\n", view.filter, view.tasks.len()));

    if view.tasks.is_empty() {
        md.push_str("_No tasks yet._\n");
        return md;
    }

    md.push_str("| ID | Class | Done | Description | Due |\n");
    md.push_str("|---:|:---:|:---:|---|---|\n");
    for entry in &view.tasks {
        let task = &entry.task;
        md.push_str(&format!(
            "| {} | {} | {} | **{}** | {}{} |\n",
            task.id,
            entry.class.tag(),
            if task.is_complete() { "x" } else { " " },
            escape_cell(&task.description),
            task.due_date_str().unwrap_or_default(),
            due_hint(entry),
        ));
    }

    md.push('\n');
    md.push_str(&format!("_{}_\n", format_summary(&view.summary)));
    md
}

/// JSON form of a view.
pub fn view_to_json(view: &View) -> Value {
    json!({
        "filter": view.filter,
        "sort": view.sort,
        "today": view.today,
        "tasks": view.tasks,
        "summary": view.summary,
    })
}

/// Render an error for the given output format.
pub fn format_error(err: &TodoError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(&err.report())
            .unwrap_or_else(|_| json!({ "error": err.to_string() }).to_string()),
        OutputFormat::Text | OutputFormat::Markdown => format!("Error: {}", err),
    }
}

fn format_summary(summary: &Summary) -> String {
    format!(
        "{} total, {} short-term pending ({} overdue), {} long-term pending, {} complete",
        summary.total,
        summary.short_term_pending,
        summary.overdue,
        summary.long_term_pending,
        summary.complete
    )
}

fn due_hint(entry: &OrganizedTask) -> String {
    if entry.task.is_complete() {
        return String::new();
    }
    match entry.days_until_due {
        Some(0) => " (today)".to_string(),
        Some(1) => " (tomorrow)".to_string(),
        Some(d) if d < 0 => format!(" ({} overdue)", plural_days(-d)),
        Some(d) => format!(" (in {})", plural_days(d)),
        None => String::new(),
    }
}

fn plural_days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
