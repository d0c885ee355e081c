//! `tl set-state` — relabel a task's state.
//!
//! Any state may follow any other; leaving COMPLETED clears the completion
//! timestamp but leaves items as they are.

use super::Session;
use crate::validate;
use clap::Args;

#[derive(Args, Debug)]
pub struct SetStateArgs {
    /// GUID of the task.
    pub guid: String,

    /// New state (pending, in_progress, completed, failed, cancelled, paused).
    pub state: String,
}

pub fn run_set_state(args: &SetStateArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_guid(&args.guid)?;
    let state = validate::parse_state(&args.state)?;
    let task = session.service()?.set_state(&args.guid, state)?;
    session.report(
        &task,
        &format!("Task {} state set to {}.", task.guid(), task.state()),
    )
}
