//! Task aggregate and its to-do ordering engine.

use super::{State, ToDoItem, move_to_rank, renumber, timestamp};
use crate::clock::Clock;
use crate::error::{Result, TaskError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parameter object for [`Task::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub position: u32,
    pub state: State,
    pub deadline: DateTime<Utc>,
    pub created_by: Option<String>,
    pub responsible: Option<String>,
    pub description: Option<String>,
    pub todo: Vec<ToDoItem>,
}

impl NewTask {
    /// A pending task at position 1 with no items.
    #[must_use]
    pub fn new(title: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            position: 1,
            state: State::Pending,
            deadline,
            created_by: None,
            responsible: None,
            description: None,
            todo: Vec::new(),
        }
    }

    #[must_use]
    pub const fn at_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn with_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn created_by(mut self, who: impl Into<String>) -> Self {
        self.created_by = Some(who.into());
        self
    }

    #[must_use]
    pub fn responsible(mut self, who: impl Into<String>) -> Self {
        self.responsible = Some(who.into());
        self
    }

    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = ToDoItem>) -> Self {
        self.todo.extend(items);
        self
    }
}

/// A unit of work with a state, a deadline and an ordered checklist.
///
/// Field order matches the persisted record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    guid: String,
    title: String,
    position: u32,
    state: State,
    #[serde(deserialize_with = "timestamp::deserialize")]
    deadline: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    created_by: Option<String>,
    #[serde(default)]
    responsible: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    todo: Vec<ToDoItem>,
}

impl Task {
    /// Validates `new` and builds a task with a fresh GUID.
    ///
    /// Items passed in `new.todo` are appended in order, so they receive
    /// positions `1..=n` whatever their incoming positions were.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for an empty title or a zero
    /// position.
    pub fn create(new: NewTask, clock: &impl Clock) -> Result<Self> {
        let title = validate_title(new.title)?;
        validate_position(new.position)?;

        let mut task = Self {
            guid: Uuid::new_v4().to_string(),
            title,
            position: new.position,
            state: new.state,
            deadline: new.deadline,
            created_at: clock.now(),
            completed_at: None,
            created_by: new.created_by,
            responsible: new.responsible,
            description: new.description,
            todo: Vec::with_capacity(new.todo.len()),
        };
        for item in new.todo {
            task.add_item(item);
        }
        Ok(task)
    }

    #[must_use]
    pub fn guid(&self) -> &str {
        &self.guid
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    #[must_use]
    pub fn responsible(&self) -> Option<&str> {
        self.responsible.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Items in their stored (= positional) order.
    #[must_use]
    pub fn items(&self) -> &[ToDoItem] {
        &self.todo
    }

    #[must_use]
    pub fn todo_count(&self) -> usize {
        self.todo.len()
    }

    /// Returns `true` if the state is `COMPLETED`, or independently if every
    /// item is completed (vacuously so for a task without items).
    ///
    /// The two criteria are not reconciled: finishing every item does not
    /// change the state.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == State::Completed || self.todo.iter().all(ToDoItem::is_completed)
    }

    /// Sets the state to `COMPLETED` and completes every item.
    ///
    /// Idempotent: a task that is already completed keeps its original
    /// `completed_at`.
    pub fn mark_complete(&mut self, clock: &impl Clock) {
        if self.state != State::Completed || self.completed_at.is_none() {
            self.completed_at = Some(clock.now());
        }
        self.state = State::Completed;
        for item in &mut self.todo {
            item.mark_complete(clock);
        }
    }

    /// Sets the state with no transition checks.
    ///
    /// Leaving `COMPLETED` clears `completed_at`.
    pub fn set_state(&mut self, state: State) {
        if state != State::Completed {
            self.completed_at = None;
        }
        self.state = state;
    }

    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for an empty title.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.title = validate_title(title.into())?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_responsible(&mut self, responsible: Option<String>) {
        self.responsible = responsible;
    }

    pub fn set_created_by(&mut self, created_by: Option<String>) {
        self.created_by = created_by;
    }

    pub const fn set_deadline(&mut self, deadline: DateTime<Utc>) {
        self.deadline = deadline;
    }

    pub(crate) const fn set_completed_at(&mut self, completed_at: Option<DateTime<Utc>>) {
        self.completed_at = completed_at;
    }

    pub(crate) const fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    /// Checks the cross-field rule that `completed_at` requires `COMPLETED`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] when the rule is violated.
    pub fn check_completion_consistency(&self) -> Result<()> {
        if self.completed_at.is_some() && self.state != State::Completed {
            return Err(TaskError::validation(
                "completed_at",
                "cannot be set unless the task state is COMPLETED",
            ));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // To-do ordering
    // ------------------------------------------------------------------

    /// Appends `item` and returns the position it was given (`len + 1`).
    pub fn add_item(&mut self, mut item: ToDoItem) -> u32 {
        let position = next_rank(self.todo.len());
        item.set_position(position);
        self.todo.push(item);
        position
    }

    /// Removes the item with `item_guid` and renumbers the rest.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::ItemNotFound`] if the task owns no such item.
    pub fn remove_item(&mut self, item_guid: &str) -> Result<ToDoItem> {
        let index = self.index_of(item_guid)?;
        let removed = self.todo.remove(index);
        renumber(&mut self.todo);
        Ok(removed)
    }

    /// Moves the item with `item_guid` to `new_position` and renumbers.
    ///
    /// Ranks at or below 1 move the item to the front, ranks past the end
    /// move it to the back. Allowed whatever the task state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::ItemNotFound`] if the task owns no such item.
    pub fn reorder_item(&mut self, item_guid: &str, new_position: i64) -> Result<()> {
        let index = self.index_of(item_guid)?;
        move_to_rank(&mut self.todo, index, new_position);
        Ok(())
    }

    #[must_use]
    pub fn item(&self, item_guid: &str) -> Option<&ToDoItem> {
        self.todo.iter().find(|item| item.guid() == item_guid)
    }

    /// # Errors
    ///
    /// Returns [`TaskError::ItemNotFound`] when no item has `position`.
    pub fn item_at(&self, position: u32) -> Result<&ToDoItem> {
        self.todo
            .iter()
            .find(|item| item.position() == position)
            .ok_or_else(|| TaskError::item_not_found(&self.guid, format!("at position {position}")))
    }

    /// # Errors
    ///
    /// Returns [`TaskError::ItemNotFound`] when no item has `position`.
    pub fn item_at_mut(&mut self, position: u32) -> Result<&mut ToDoItem> {
        let guid = &self.guid;
        self.todo
            .iter_mut()
            .find(|item| item.position() == position)
            .ok_or_else(|| TaskError::item_not_found(guid, format!("at position {position}")))
    }

    fn index_of(&self, item_guid: &str) -> Result<usize> {
        self.todo
            .iter()
            .position(|item| item.guid() == item_guid)
            .ok_or_else(|| TaskError::item_not_found(&self.guid, item_guid))
    }
}

fn next_rank(len: usize) -> u32 {
    u32::try_from(len).map_or(u32::MAX, |n| n.saturating_add(1))
}

pub(crate) fn validate_title(title: String) -> Result<String> {
    if title.trim().is_empty() {
        return Err(TaskError::validation("title", "must not be empty"));
    }
    Ok(title)
}

pub(crate) fn validate_position(position: u32) -> Result<()> {
    if position == 0 {
        return Err(TaskError::validation("position", "must be >= 1"));
    }
    Ok(())
}
