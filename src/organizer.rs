//! Classification, filtering and ordering of tasks for display.
//!
//! Everything here is a pure function of the task list and a reference date,
//! so views can be recomputed (and tested) without a store or a UI.

use crate::db::Database;
use crate::error::Result;
use crate::types::{Task, TaskStatus};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pending tasks due within this many days (inclusive) are short-term.
pub const SHORT_TERM_HORIZON_DAYS: i64 = 7;

/// Urgency class of a task relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskClass {
    /// Pending and due within the horizon, overdue included.
    ShortTerm,
    /// Pending and due beyond the horizon.
    LongTerm,
    /// Complete, or without a due date.
    Other,
}

impl TaskClass {
    /// Short tag for list output.
    pub fn tag(&self) -> &'static str {
        match self {
            TaskClass::ShortTerm => "ST",
            TaskClass::LongTerm => "LT",
            TaskClass::Other => "-",
        }
    }

    fn sort_rank(&self) -> u8 {
        match self {
            TaskClass::ShortTerm => 0,
            TaskClass::LongTerm | TaskClass::Other => 1,
        }
    }
}

/// Days from `today` until the task is due. Negative when overdue.
pub fn days_until_due(task: &Task, today: NaiveDate) -> Option<i64> {
    task.due_date.map(|due| (due - today).num_days())
}

/// Classify a task against the reference date.
pub fn classify(task: &Task, today: NaiveDate) -> TaskClass {
    if task.status == TaskStatus::Complete {
        return TaskClass::Other;
    }
    match days_until_due(task, today) {
        None => TaskClass::Other,
        Some(days) if days <= SHORT_TERM_HORIZON_DAYS => TaskClass::ShortTerm,
        Some(_) => TaskClass::LongTerm,
    }
}

/// Which tasks a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum FilterOption {
    #[default]
    #[serde(rename = "All", alias = "all")]
    All,
    #[serde(rename = "Complete", alias = "complete")]
    Complete,
    #[serde(rename = "ST Pending", alias = "st-pending")]
    StPending,
    #[serde(rename = "LT Pending", alias = "lt-pending")]
    LtPending,
}

impl FilterOption {
    /// Every filter option.
    pub const ALL: [FilterOption; 4] = [
        FilterOption::All,
        FilterOption::Complete,
        FilterOption::StPending,
        FilterOption::LtPending,
    ];

    /// Name shown in views and accepted in config files.
    pub fn label(&self) -> &'static str {
        match self {
            FilterOption::All => "All",
            FilterOption::Complete => "Complete",
            FilterOption::StPending => "ST Pending",
            FilterOption::LtPending => "LT Pending",
        }
    }

    /// Whether a task with the given class belongs in this view.
    pub fn matches(&self, task: &Task, class: TaskClass) -> bool {
        match self {
            FilterOption::All => true,
            FilterOption::Complete => task.status == TaskStatus::Complete,
            FilterOption::StPending => {
                task.status == TaskStatus::Pending && class == TaskClass::ShortTerm
            }
            FilterOption::LtPending => {
                task.status == TaskStatus::Pending && class == TaskClass::LongTerm
            }
        }
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterOption {
    type Err = String;

    /// Accepts display labels ("ST Pending") and CLI values ("st-pending").
    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let wanted = normalize_option(s);
        Self::ALL
            .into_iter()
            .find(|o| normalize_option(o.label()) == wanted)
            .ok_or_else(|| format!("Unknown filter '{}'", s))
    }
}

/// Display order of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum SortOption {
    #[serde(rename = "ID", alias = "id")]
    Id,
    #[default]
    #[serde(rename = "Due Date", alias = "due-date")]
    DueDate,
}

impl SortOption {
    /// Every sort order.
    pub const ALL: [SortOption; 2] = [SortOption::Id, SortOption::DueDate];

    /// Name shown in views and accepted in config files.
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Id => "ID",
            SortOption::DueDate => "Due Date",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let wanted = normalize_option(s);
        Self::ALL
            .into_iter()
            .find(|o| normalize_option(o.label()) == wanted)
            .ok_or_else(|| format!("Unknown sort '{}'", s))
    }
}

fn normalize_option(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A task tagged with its class for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizedTask {
    #[serde(flatten)]
    pub task: Task,
    pub class: TaskClass,
    pub days_until_due: Option<i64>,
}

/// Filter, classify and order tasks for display.
///
/// Sorting by due date puts dated tasks first, short-term ahead of the rest,
/// then by date ascending. Undated tasks follow in their incoming order. The
/// sort is stable, so ties keep their incoming order too.
pub fn organize(
    tasks: Vec<Task>,
    filter: FilterOption,
    sort: SortOption,
    today: NaiveDate,
) -> Vec<OrganizedTask> {
    let mut view: Vec<OrganizedTask> = tasks
        .into_iter()
        .filter_map(|task| {
            let class = classify(&task, today);
            filter.matches(&task, class).then(|| OrganizedTask {
                days_until_due: days_until_due(&task, today),
                task,
                class,
            })
        })
        .collect();

    match sort {
        SortOption::Id => view.sort_by_key(|t| t.task.id),
        SortOption::DueDate => {
            let (mut dated, undated): (Vec<_>, Vec<_>) =
                view.into_iter().partition(|t| t.task.due_date.is_some());
            dated.sort_by_key(|t| (t.class.sort_rank(), t.task.due_date));
            dated.extend(undated);
            view = dated;
        }
    }

    view
}

/// An organized task list plus the counts over the whole store.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub filter: FilterOption,
    pub sort: SortOption,
    pub today: NaiveDate,
    pub tasks: Vec<OrganizedTask>,
    pub summary: Summary,
}

/// Load every task from the store once and organize it.
pub fn load_view(
    db: &Database,
    filter: FilterOption,
    sort: SortOption,
    today: NaiveDate,
) -> Result<View> {
    let tasks = db.list_tasks(None)?;
    let summary = Summary::of(&tasks, today);
    Ok(View {
        filter,
        sort,
        today,
        tasks: organize(tasks, filter, sort, today),
        summary,
    })
}

/// Counts shown under a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub complete: usize,
    pub short_term_pending: usize,
    pub long_term_pending: usize,
    pub overdue: usize,
    pub undated: usize,
}

impl Summary {
    pub fn of(tasks: &[Task], today: NaiveDate) -> Self {
        let mut summary = Summary {
            total: tasks.len(),
            ..Default::default()
        };
        for task in tasks {
            match classify(task, today) {
                TaskClass::ShortTerm => summary.short_term_pending += 1,
                TaskClass::LongTerm => summary.long_term_pending += 1,
                TaskClass::Other => {}
            }
            if task.is_complete() {
                summary.complete += 1;
            } else if days_until_due(task, today).is_some_and(|d| d < 0) {
                summary.overdue += 1;
            }
            if task.due_date.is_none() {
                summary.undated += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn task(id: i64, status: TaskStatus, offset: Option<i64>) -> Task {
        Task {
            id,
            description: format!("task {}", id),
            status,
            due_date: offset.map(|d| {
                if d >= 0 {
                    today() + Days::new(d as u64)
                } else {
                    today() - Days::new(d.unsigned_abs())
                }
            }),
        }
    }

    fn ids(view: &[OrganizedTask]) -> Vec<i64> {
        view.iter().map(|t| t.task.id).collect()
    }

    #[test]
    fn test_classify_boundaries() {
        let t = today();
        assert_eq!(classify(&task(1, TaskStatus::Pending, Some(0)), t), TaskClass::ShortTerm);
        assert_eq!(classify(&task(1, TaskStatus::Pending, Some(7)), t), TaskClass::ShortTerm);
        assert_eq!(classify(&task(1, TaskStatus::Pending, Some(8)), t), TaskClass::LongTerm);
        assert_eq!(classify(&task(1, TaskStatus::Pending, Some(-1)), t), TaskClass::ShortTerm);
        assert_eq!(classify(&task(1, TaskStatus::Pending, Some(-90)), t), TaskClass::ShortTerm);
    }

    #[test]
    fn test_classify_complete_and_undated_are_other() {
        let t = today();
        assert_eq!(classify(&task(1, TaskStatus::Complete, Some(1)), t), TaskClass::Other);
        assert_eq!(classify(&task(1, TaskStatus::Complete, Some(30)), t), TaskClass::Other);
        assert_eq!(classify(&task(1, TaskStatus::Pending, None), t), TaskClass::Other);
    }

    #[test]
    fn test_due_date_sort_puts_undated_last() {
        let tasks = vec![
            task(1, TaskStatus::Pending, Some(10)),
            task(2, TaskStatus::Pending, Some(2)),
            task(3, TaskStatus::Complete, None),
        ];
        let view = organize(tasks, FilterOption::All, SortOption::DueDate, today());
        assert_eq!(ids(&view), vec![2, 1, 3]);
        assert_eq!(view[0].class, TaskClass::ShortTerm);
        assert_eq!(view[1].class, TaskClass::LongTerm);
        assert_eq!(view[2].days_until_due, None);
    }

    #[test]
    fn test_due_date_sort_ranks_short_term_before_earlier_other() {
        // A completed task due yesterday is OTHER, so it follows short-term work.
        let tasks = vec![
            task(1, TaskStatus::Complete, Some(-1)),
            task(2, TaskStatus::Pending, Some(5)),
            task(3, TaskStatus::Pending, Some(20)),
            task(4, TaskStatus::Pending, Some(-3)),
        ];
        let view = organize(tasks, FilterOption::All, SortOption::DueDate, today());
        assert_eq!(ids(&view), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_due_date_sort_is_stable_for_ties() {
        let tasks = vec![
            task(5, TaskStatus::Pending, Some(3)),
            task(2, TaskStatus::Pending, Some(3)),
            task(9, TaskStatus::Pending, None),
            task(7, TaskStatus::Pending, Some(3)),
            task(1, TaskStatus::Pending, None),
        ];
        let view = organize(tasks, FilterOption::All, SortOption::DueDate, today());
        assert_eq!(ids(&view), vec![5, 2, 7, 9, 1]);
    }

    #[test]
    fn test_id_sort() {
        let tasks = vec![
            task(3, TaskStatus::Pending, Some(1)),
            task(1, TaskStatus::Complete, None),
            task(2, TaskStatus::Pending, Some(40)),
        ];
        let view = organize(tasks, FilterOption::All, SortOption::Id, today());
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[test]
    fn test_filters() {
        let tasks = vec![
            task(1, TaskStatus::Pending, Some(1)),
            task(2, TaskStatus::Pending, Some(30)),
            task(3, TaskStatus::Complete, Some(1)),
            task(4, TaskStatus::Pending, None),
        ];
        let run = |f| ids(&organize(tasks.clone(), f, SortOption::Id, today()));
        assert_eq!(run(FilterOption::StPending), vec![1]);
        assert_eq!(run(FilterOption::LtPending), vec![2]);
        assert_eq!(run(FilterOption::Complete), vec![3]);
        assert_eq!(run(FilterOption::All), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let tasks = vec![task(1, TaskStatus::Complete, Some(1))];
        assert!(organize(tasks, FilterOption::StPending, SortOption::DueDate, today()).is_empty());
        assert!(organize(vec![], FilterOption::All, SortOption::Id, today()).is_empty());
    }

    #[test]
    fn test_option_parsing_accepts_labels_and_cli_values() {
        assert_eq!("ST Pending".parse::<FilterOption>().unwrap(), FilterOption::StPending);
        assert_eq!("lt-pending".parse::<FilterOption>().unwrap(), FilterOption::LtPending);
        assert_eq!("all".parse::<FilterOption>().unwrap(), FilterOption::All);
        assert!("pending".parse::<FilterOption>().is_err());
        assert_eq!("Due Date".parse::<SortOption>().unwrap(), SortOption::DueDate);
        assert_eq!("id".parse::<SortOption>().unwrap(), SortOption::Id);
    }

    #[test]
    fn test_summary_counts() {
        let tasks = vec![
            task(1, TaskStatus::Pending, Some(-2)),
            task(2, TaskStatus::Pending, Some(3)),
            task(3, TaskStatus::Pending, Some(12)),
            task(4, TaskStatus::Complete, Some(-5)),
            task(5, TaskStatus::Pending, None),
        ];
        let summary = Summary::of(&tasks, today());
        assert_eq!(
            summary,
            Summary {
                total: 5,
                complete: 1,
                short_term_pending: 2,
                long_term_pending: 1,
                overdue: 1,
                undated: 1,
            }
        );
    }
}
