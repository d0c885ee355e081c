//! `tl view` — display full details of a single task.

use super::Session;
use super::list::{item_line, progress};
use crate::output::{pretty_kv, pretty_rule, pretty_section, render_mode};
use crate::validate;
use clap::Args;
use std::io::Write;
use tasklist_core::Task;

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// GUID of the task to view.
    pub guid: String,
}

pub fn run_view(args: &ViewArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_guid(&args.guid)?;
    let task = session.service()?.get_task(&args.guid)?;
    render_mode(
        session.output,
        &task,
        |task, w| render_view_text(task, w),
        |task, w| render_view_human(task, w),
    )
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn render_view_human(task: &Task, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Task {}", task.guid()))?;
    writeln!(w, "{}", task.title())?;
    pretty_rule(w)?;
    pretty_kv(w, "position", task.position().to_string())?;
    pretty_kv(w, "state", task.state().as_str())?;
    pretty_kv(w, "deadline", task.deadline().to_rfc3339())?;
    pretty_kv(w, "created", task.created_at().to_rfc3339())?;
    if let Some(done) = task.completed_at() {
        pretty_kv(w, "completed", done.to_rfc3339())?;
    }
    pretty_kv(w, "created by", or_dash(task.created_by()))?;
    pretty_kv(w, "responsible", or_dash(task.responsible()))?;

    if let Some(desc) = task.description() {
        writeln!(w)?;
        pretty_section(w, "Description")?;
        for line in desc.lines() {
            writeln!(w, "{line}")?;
        }
    }

    if task.todo_count() > 0 {
        writeln!(w)?;
        pretty_section(w, &format!("To-do ({})", progress(task)))?;
        for item in task.items() {
            writeln!(w, "{}", item_line(item))?;
        }
    }
    Ok(())
}

fn render_view_text(task: &Task, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "guid\t{}", task.guid())?;
    writeln!(w, "title\t{}", task.title())?;
    writeln!(w, "position\t{}", task.position())?;
    writeln!(w, "state\t{}", task.state())?;
    writeln!(w, "deadline\t{}", task.deadline().to_rfc3339())?;
    writeln!(w, "created_at\t{}", task.created_at().to_rfc3339())?;
    writeln!(
        w,
        "completed_at\t{}",
        task.completed_at().map_or_else(|| "-".to_string(), |t| t.to_rfc3339())
    )?;
    writeln!(w, "created_by\t{}", or_dash(task.created_by()))?;
    writeln!(w, "responsible\t{}", or_dash(task.responsible()))?;
    writeln!(w, "description\t{}", or_dash(task.description()))?;
    for item in task.items() {
        writeln!(
            w,
            "todo\t{}\t{}\t{}",
            item.position(),
            if item.is_completed() { "done" } else { "open" },
            item.text()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tasklist_core::clock::FixedClock;
    use tasklist_core::{NewTask, ToDoItem};

    fn sample() -> Task {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
        Task::create(
            NewTask::new("Write report", Utc.with_ymd_and_hms(2025, 5, 10, 0, 0, 0).unwrap())
                .description("Quarterly\nnumbers")
                .with_items([ToDoItem::create("Draft", &clock).unwrap()]),
            &clock,
        )
        .unwrap()
    }

    #[test]
    fn human_view_lists_sections() {
        let mut buf = Vec::new();
        render_view_human(&sample(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Write report"));
        assert!(out.contains("Description"));
        assert!(out.contains("To-do (0/1)"));
        assert!(out.contains("  1. [ ] Draft"));
        assert!(out.contains("responsible:  -"));
    }

    #[test]
    fn text_view_is_key_tab_value() {
        let mut buf = Vec::new();
        render_view_text(&sample(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("state\tPENDING\n"));
        assert!(out.contains("deadline\t2025-05-10T00:00:00+00:00\n"));
        assert!(out.contains("todo\t1\topen\tDraft\n"));
    }
}
