//! `tl update` — edit task fields.
//!
//! All given fields are validated together; if any is rejected nothing is
//! written. `--position` moves the task within the list like `tl move`.

use super::Session;
use crate::validate::{self, ValidationError};
use clap::Args;
use tasklist_core::TaskPatch;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// GUID of the task to update.
    pub guid: String,

    /// New title.
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description.
    #[arg(short, long)]
    pub description: Option<String>,

    /// New responsible person.
    #[arg(short, long)]
    pub responsible: Option<String>,

    /// Move to exactly this rank in the list (clamped), like `tl move`.
    #[arg(short, long, allow_negative_numbers = true)]
    pub position: Option<i64>,

    /// New state.
    #[arg(short, long)]
    pub state: Option<String>,

    /// New deadline: YYYY-MM-DD or an RFC 3339 timestamp.
    #[arg(long)]
    pub deadline: Option<String>,

    /// New creator name.
    #[arg(long)]
    pub created_by: Option<String>,
}

fn build_patch(args: &UpdateArgs) -> Result<TaskPatch, ValidationError> {
    if let Some(title) = &args.title {
        validate::validate_title(title)?;
    }
    let patch = TaskPatch {
        title: args.title.clone(),
        description: args.description.clone(),
        responsible: args.responsible.clone(),
        created_by: args.created_by.clone(),
        position: args.position,
        state: args.state.as_deref().map(validate::parse_state).transpose()?,
        deadline: args
            .deadline
            .as_deref()
            .map(validate::parse_deadline)
            .transpose()?,
        completed_at: None,
    };
    if patch.is_empty() {
        return Err(ValidationError::new(
            "update",
            &args.guid,
            "no fields to change",
            "pass at least one of --title, --description, --responsible, --position, --state, --deadline, --created-by",
        ));
    }
    Ok(patch)
}

pub fn run_update(args: &UpdateArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_guid(&args.guid)?;
    let patch = build_patch(args)?;
    tracing::debug!(guid = %args.guid, fields = ?patch.field_names(), "updating task");

    let task = session.service()?.update_task(&args.guid, &patch)?;
    session.report(&task, &format!("Task {} updated.", task.guid()))
}
