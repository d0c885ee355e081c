//! `tl todo` — manage a task's checklist.
//!
//! Items are addressed by their current 1-based position within the task,
//! as shown by `tl view`.

use super::Session;
use crate::validate::{self, ValidationError};
use clap::{Args, Subcommand};
use serde::Serialize;
use tasklist_core::TodoPatch;

#[derive(Args, Debug)]
pub struct TodoArgs {
    #[command(subcommand)]
    pub command: TodoCommand,
}

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    #[command(
        about = "Append an item to a task",
        after_help = "EXAMPLES:\n    # Add a step\n    tl todo add <guid> --text \"Call the doctor\""
    )]
    Add(TodoAddArgs),

    #[command(
        about = "Edit an item's text or position",
        after_help = "EXAMPLES:\n    # Reword item 2 and move it to the top\n    tl todo update <guid> 2 --text \"Call the dentist\" --position 1"
    )]
    Update(TodoUpdateArgs),

    #[command(
        about = "Mark an item complete",
        after_help = "EXAMPLES:\n    # Tick off item 3\n    tl todo complete <guid> 3"
    )]
    Complete(TodoTargetArgs),

    #[command(
        about = "Remove an item",
        after_help = "EXAMPLES:\n    # Drop item 1; the rest move up\n    tl todo remove <guid> 1"
    )]
    Remove(TodoTargetArgs),

    #[command(
        about = "Move an item to a new position",
        after_help = "EXAMPLES:\n    # Move item 4 to the top\n    tl todo move <guid> 4 1"
    )]
    Move(TodoMoveArgs),

    #[command(
        about = "Count a task's items",
        after_help = "EXAMPLES:\n    tl todo count <guid>"
    )]
    Count(TodoCountArgs),
}

#[derive(Args, Debug)]
pub struct TodoAddArgs {
    /// GUID of the task.
    pub guid: String,

    /// Item text.
    #[arg(short, long)]
    pub text: String,
}

#[derive(Args, Debug)]
pub struct TodoUpdateArgs {
    /// GUID of the task.
    pub guid: String,

    /// Current position of the item.
    pub position: u32,

    /// New text.
    #[arg(short, long)]
    pub text: Option<String>,

    /// New position within the task.
    #[arg(short = 'p', long = "position", allow_negative_numbers = true)]
    pub new_position: Option<i64>,
}

#[derive(Args, Debug)]
pub struct TodoTargetArgs {
    /// GUID of the task.
    pub guid: String,

    /// Position of the item.
    pub position: u32,
}

#[derive(Args, Debug)]
pub struct TodoMoveArgs {
    /// GUID of the task.
    pub guid: String,

    /// Current position of the item.
    pub position: u32,

    /// Target position (clamped to the list).
    #[arg(allow_negative_numbers = true)]
    pub new_position: i64,
}

#[derive(Args, Debug)]
pub struct TodoCountArgs {
    /// GUID of the task.
    pub guid: String,
}

#[derive(Debug, Serialize)]
struct TodoCountOutput<'a> {
    guid: &'a str,
    count: usize,
}

pub fn run_todo(args: &TodoArgs, session: &Session) -> anyhow::Result<()> {
    match &args.command {
        TodoCommand::Add(a) => run_todo_add(a, session),
        TodoCommand::Update(a) => run_todo_update(a, session),
        TodoCommand::Complete(a) => run_todo_complete(a, session),
        TodoCommand::Remove(a) => run_todo_remove(a, session),
        TodoCommand::Move(a) => run_todo_move(a, session),
        TodoCommand::Count(a) => run_todo_count(a, session),
    }
}

fn target(guid: &str, position: u32) -> Result<(), ValidationError> {
    validate::validate_guid(guid)?;
    validate::validate_item_position(position)
}

fn run_todo_add(args: &TodoAddArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_guid(&args.guid)?;
    let item = session.service()?.add_todo_text(&args.guid, &args.text)?;
    session.report(
        &item,
        &format!(
            "Added to-do {} to task {}",
            item.position(),
            args.guid
        ),
    )
}

fn run_todo_update(args: &TodoUpdateArgs, session: &Session) -> anyhow::Result<()> {
    target(&args.guid, args.position)?;
    let patch = TodoPatch {
        text: args.text.clone(),
        position: args.new_position,
    };
    if patch == TodoPatch::default() {
        return Err(ValidationError::new(
            "update",
            args.position.to_string(),
            "no fields to change",
            "pass --text and/or --position",
        )
        .into());
    }

    let item = session
        .service()?
        .update_todo(&args.guid, args.position, &patch)?;
    session.report(
        &item,
        &format!("Updated to-do at position {}", args.position),
    )
}

fn run_todo_complete(args: &TodoTargetArgs, session: &Session) -> anyhow::Result<()> {
    target(&args.guid, args.position)?;
    let item = session
        .service()?
        .mark_todo_complete(&args.guid, args.position)?;
    session.report(
        &item,
        &format!("Marked to-do {} as complete.", args.position),
    )
}

fn run_todo_remove(args: &TodoTargetArgs, session: &Session) -> anyhow::Result<()> {
    target(&args.guid, args.position)?;
    let item = session.service()?.remove_todo(&args.guid, args.position)?;
    session.report(
        &item,
        &format!("Removed to-do {} from task {}", args.position, args.guid),
    )
}

fn run_todo_move(args: &TodoMoveArgs, session: &Session) -> anyhow::Result<()> {
    target(&args.guid, args.position)?;
    let task = session
        .service()?
        .reorder_todo(&args.guid, args.position, args.new_position)?;
    session.report(
        &task,
        &format!("Moved to-do {} to position {}", args.position, args.new_position),
    )
}

fn run_todo_count(args: &TodoCountArgs, session: &Session) -> anyhow::Result<()> {
    validate::validate_guid(&args.guid)?;
    let count = session.service()?.get_todo_count(&args.guid)?;
    crate::output::render_mode(
        session.output,
        &TodoCountOutput {
            guid: &args.guid,
            count,
        },
        |c, w| writeln!(w, "{}", c.count),
        |c, w| writeln!(w, "Task {} has {} to-do items", c.guid, c.count),
    )
}
