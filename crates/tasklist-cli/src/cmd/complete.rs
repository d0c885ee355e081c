//! `tl complete` — mark a task and all of its items complete.

use super::Session;
use crate::validate;
use clap::Args;

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// GUID of the task to complete.
    pub guid: String,
}

pub fn run_complete(args: &CompleteArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_guid(&args.guid)?;
    let task = session.service()?.mark_task_complete(&args.guid)?;
    session.report(&task, &format!("Task {} marked as complete.", task.guid()))
}
