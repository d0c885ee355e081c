//! `tl delete` — remove a task and renumber the rest.

use super::Session;
use crate::validate;
use clap::Args;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// GUID of the task to delete.
    pub guid: String,
}

pub fn run_delete(args: &DeleteArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_guid(&args.guid)?;
    let removed = session.service()?.delete(&args.guid)?;
    session.report(&removed, &format!("Task {} deleted.", removed.guid()))
}
