//! `tl move` — move a task to a new position in the list.
//!
//! Positions past either end are clamped; the list is renumbered `1..=M`.

use super::Session;
use crate::validate;
use clap::Args;

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// GUID of the task to move.
    pub guid: String,

    /// Target position (1 = top).
    #[arg(allow_negative_numbers = true)]
    pub new_position: i64,
}

pub fn run_move(args: &MoveArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_guid(&args.guid)?;
    let task = session.service()?.move_task(&args.guid, args.new_position)?;
    session.report(
        &task,
        &format!("Task {} moved to position {}.", task.guid(), task.position()),
    )
}
