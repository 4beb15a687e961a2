//! tbx task commands

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::app::App;
use crate::confirm::Confirm;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::Task;

use super::TaskCommands;

#[derive(serde::Serialize)]
struct TaskReport<'a> {
    sort: String,
    tasks: &'a [Task],
}

pub fn run(
    app: &mut App,
    command: TaskCommands,
    options: OutputOptions,
    confirm: &mut dyn Confirm,
) -> Result<()> {
    match command {
        TaskCommands::Add {
            name,
            difficulty,
            deadline,
            implementation,
        } => {
            let deadline = parse_deadline(&deadline)?;
            let now = Utc::now();
            let task = app.add_task(&name, difficulty, deadline, implementation, now)?;

            let mut human = HumanOutput::new("tbx task add: task created");
            human.push_summary("id", task.id.to_string());
            human.push_summary("name", task.name.clone());
            human.push_summary("deadline", task.deadline.to_rfc3339());
            if task.deadline < now {
                human.push_warning("deadline is already in the past".to_string());
            }
            let task = task.clone();
            emit_success(options, "task add", &task, Some(&human))
        }

        TaskCommands::List { sort } => {
            if let Some(mode) = sort {
                app.set_sort(mode)?;
            }
            let now = Utc::now();
            let tasks = app.sorted_tasks(now);
            let report = TaskReport {
                sort: app.store().current_sort.to_string(),
                tasks: &tasks,
            };

            let mut human = HumanOutput::new(format!(
                "tbx task list: {} task(s), sorted by {}",
                tasks.len(),
                report.sort
            ));
            for task in &tasks {
                human.push_detail(format_task_line(task, now));
            }
            emit_success(options, "task list", &report, Some(&human))
        }

        TaskCommands::Toggle { id } => {
            let completed = app.toggle_task(id)?;
            let header = if completed {
                "tbx task toggle: marked complete"
            } else {
                "tbx task toggle: marked incomplete"
            };
            let mut human = HumanOutput::new(header);
            human.push_summary("id", id.to_string());
            emit_success(
                options,
                "task toggle",
                &serde_json::json!({ "id": id, "completed": completed }),
                Some(&human),
            )
        }

        TaskCommands::Rm { id } => {
            let removed = app.remove_task(id, confirm)?;
            let header = if removed {
                "tbx task rm: task deleted"
            } else {
                "tbx task rm: cancelled"
            };
            let mut human = HumanOutput::new(header);
            human.push_summary("id", id.to_string());
            emit_success(
                options,
                "task rm",
                &serde_json::json!({ "id": id, "removed": removed }),
                Some(&human),
            )
        }

        TaskCommands::Sort { mode } => {
            app.set_sort(mode)?;
            let mut human = HumanOutput::new("tbx task sort: sort mode saved");
            human.push_summary("mode", mode.to_string());
            emit_success(
                options,
                "task sort",
                &serde_json::json!({ "sort": mode }),
                Some(&human),
            )
        }
    }
}

fn format_task_line(task: &Task, now: DateTime<Utc>) -> String {
    let marker = if task.completed { "x" } else { " " };
    let urgent = if !task.completed && task.deadline <= now + chrono::Duration::hours(24) {
        " (urgent)"
    } else {
        ""
    };
    format!(
        "[{marker}] {} {} - due {} (difficulty {}, implementation {}){urgent}",
        task.id,
        task.name,
        task.deadline.format("%Y-%m-%d %H:%M"),
        task.difficulty,
        task.implementation,
    )
}

/// Accept RFC 3339, "YYYY-MM-DD HH:MM" or a bare date (midnight UTC)
pub fn parse_deadline(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(stamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error::InvalidArgument(format!("invalid deadline: {value}")))?;
        return Ok(naive.and_utc());
    }
    Err(Error::InvalidArgument(format!(
        "invalid deadline: {value} (expected RFC 3339, \"YYYY-MM-DD HH:MM\" or \"YYYY-MM-DD\")"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_formats() {
        assert!(parse_deadline("2026-09-01T10:00:00Z").is_ok());
        assert!(parse_deadline("2026-09-01 10:00").is_ok());
        assert!(parse_deadline("2026-09-01").is_ok());
        assert!(parse_deadline("next tuesday").is_err());
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let stamp = parse_deadline("2026-09-01").unwrap();
        assert_eq!(stamp.to_rfc3339(), "2026-09-01T00:00:00+00:00");
    }
}
