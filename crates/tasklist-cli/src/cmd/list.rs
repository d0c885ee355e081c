//! `tl list` — list tasks with optional filters and sort order.

use super::Session;
use crate::output::{OutputMode, Renderable, render_list};
use crate::validate;
use clap::Args;
use std::io::{self, Write};
use tasklist_core::{Task, ToDoItem};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only tasks in this state.
    #[arg(short, long)]
    pub state: Option<String>,

    /// Only tasks whose title contains this text (case-insensitive).
    #[arg(short, long)]
    pub title: Option<String>,

    /// Only tasks due within N days from now (default from config, 3).
    #[arg(long, value_name = "DAYS", num_args = 0..=1)]
    pub due_soon: Option<Option<u32>>,

    /// Sort by `position` or `deadline` (default from config).
    #[arg(long, value_name = "KEY")]
    pub sort_by: Option<String>,
}

/// Completed/total items, e.g. `2/5`.
pub fn progress(task: &Task) -> String {
    let done = task.items().iter().filter(|i| i.is_completed()).count();
    format!("{done}/{}", task.todo_count())
}

impl Renderable for Task {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:>3}. {:<11} {}  (due {}, todo {})",
            self.position(),
            self.state().as_str(),
            self.title(),
            self.deadline().format("%Y-%m-%d"),
            progress(self)
        )?;
        writeln!(w, "     {}", self.guid())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.position(),
            self.state(),
            self.deadline().to_rfc3339(),
            progress(self),
            self.guid(),
            self.title()
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["POSITION", "STATE", "DEADLINE", "TODO", "GUID", "TITLE"]
    }
}

pub fn run_list(args: &ListArgs, session: &Session) -> anyhow::Result<()> {
    let state = args.state.as_deref().map(validate::parse_state).transpose()?;
    let sort = match args.sort_by.as_deref() {
        Some(raw) => validate::parse_sort_key(raw)?,
        None => session.config.default_sort,
    };

    let service = session.service()?;
    let mut tasks = service.get_all()?;
    if let Some(days) = args.due_soon {
        let days = days.unwrap_or(session.config.due_soon_days);
        tasks = service.filter_due_soon(days, Some(tasks))?;
    }
    if let Some(state) = state {
        tasks = service.filter_by_state(state, Some(tasks))?;
    }
    if let Some(keyword) = args.title.as_deref() {
        tasks = service.filter_by_title(keyword, Some(tasks))?;
    }
    let tasks = service.sort_tasks(tasks, sort);
    tracing::debug!(count = tasks.len(), %sort, "listing tasks");

    if tasks.is_empty() && session.output == OutputMode::Pretty {
        println!("No tasks found.");
        return Ok(());
    }
    render_list(&tasks, session.output)?;
    Ok(())
}

/// Items as shown under a task, e.g. `  2. [x] Tag release`.
pub fn item_line(item: &ToDoItem) -> String {
    format!(
        "{:>3}. [{}] {}",
        item.position(),
        if item.is_completed() { "x" } else { " " },
        item.text()
    )
}
