//! `tl create` — add a task to the list.

use super::Session;
use crate::validate;
use clap::Args;
use tasklist_core::NewTask;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Title of the new task.
    #[arg(short, long)]
    pub title: String,

    /// Deadline: YYYY-MM-DD (midnight UTC) or an RFC 3339 timestamp.
    #[arg(long)]
    pub deadline: String,

    /// Description text.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Person responsible for the task.
    #[arg(short, long)]
    pub responsible: Option<String>,

    /// Initial state.
    #[arg(short, long, default_value = "pending")]
    pub state: String,

    /// Requested position (default: append at the end). Ties sort after
    /// the task already there.
    #[arg(short, long, allow_negative_numbers = true)]
    pub position: Option<i64>,
}

pub fn run_create(args: &CreateArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_title(&args.title)?;
    let deadline = validate::parse_deadline(&args.deadline)?;
    let state = validate::parse_state(&args.state)?;
    let requested = args
        .position
        .map(validate::validate_task_position)
        .transpose()?;

    let mut service = session.service()?;
    let position = match requested {
        Some(position) => position,
        None => u32::try_from(service.count()? + 1)?,
    };

    let mut new = NewTask::new(args.title.clone(), deadline)
        .at_position(position)
        .with_state(state)
        .created_by(session.creator.clone());
    new.description.clone_from(&args.description);
    new.responsible.clone_from(&args.responsible);

    let task = service.create_task(new)?;
    session.report(
        &task,
        &format!("Created task: {} (GUID: {})", task.title(), task.guid()),
    )
}
