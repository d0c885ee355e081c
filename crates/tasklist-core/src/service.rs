//! Task service: collection-wide ordering and the operations behind every
//! CLI command.
//!
//! Each mutating call is one linear cycle: load the collection, mutate in
//! memory, validate, write back. Validation always happens before the write,
//! so a rejected call leaves the store untouched.
//!
//! # Collection ordering
//!
//! - `create`/`delete` stable-sort the collection by current position and
//!   renumber `1..=M`, so a new task's requested position is advisory.
//! - `move_task` (and a patched `position`) removes the task and reinserts it
//!   at the requested rank, clamped to the ends, then renumbers.

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TaskError};
use crate::model::{
    NewTask, State, Task, TaskPatch, ToDoItem, TodoPatch, move_to_rank, renumber,
};
use crate::query::{self, SortKey};
use crate::repo::{TaskRepository, ensure_unique};
use tracing::{debug, info};

/// Orchestrates tasks stored in `R`, stamping time from `C`.
#[derive(Debug, Clone)]
pub struct TaskService<R, C = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: TaskRepository> TaskService<R> {
    /// Service on the system clock.
    pub const fn new(repo: R) -> Self {
        Self {
            repo,
            clock: SystemClock,
        }
    }
}

impl<R: TaskRepository, C: Clock> TaskService<R, C> {
    pub const fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub const fn repository(&self) -> &R {
        &self.repo
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns a storage error.
    pub fn get_all(&self) -> Result<Vec<Task>> {
        self.repo.list_all()
    }

    /// # Errors
    ///
    /// Returns a storage error.
    pub fn get_by_guid(&self, guid: &str) -> Result<Option<Task>> {
        self.repo.get_by_guid(guid)
    }

    /// Like [`get_by_guid`](Self::get_by_guid) but absence is an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] or a storage error.
    pub fn get_task(&self, guid: &str) -> Result<Task> {
        self.repo
            .get_by_guid(guid)?
            .ok_or_else(|| TaskError::TaskNotFound(guid.to_string()))
    }

    /// # Errors
    ///
    /// Returns a storage error.
    pub fn count(&self) -> Result<usize> {
        self.repo.count()
    }

    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] or a storage error.
    pub fn get_todo_count(&self, guid: &str) -> Result<usize> {
        Ok(self.get_task(guid)?.todo_count())
    }

    // ------------------------------------------------------------------
    // Collection operations
    // ------------------------------------------------------------------

    /// Builds a task from `new` on this service's clock and stores it.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`Task::create`] or any error from
    /// [`create`](Self::create).
    pub fn create_task(&mut self, new: NewTask) -> Result<Task> {
        let task = Task::create(new, &self.clock)?;
        self.create(task)
    }

    /// Stores `task` and renumbers the collection; returns the task as
    /// stored, with its final position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::DuplicateTask`] if the GUID is taken, or a
    /// storage error.
    pub fn create(&mut self, task: Task) -> Result<Task> {
        let mut tasks = self.repo.list_all()?;
        ensure_unique(&tasks, task.guid())?;
        let guid = task.guid().to_string();
        tasks.push(task);
        normalize_positions(&mut tasks);

        let stored = find(&tasks, &guid)?.clone();
        self.repo.replace_all(tasks)?;
        info!(guid = %guid, position = stored.position(), "created task");
        Ok(stored)
    }

    /// Persists a task the caller already modified.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] or a storage error.
    pub fn update(&mut self, task: &Task) -> Result<()> {
        self.repo.update(task)
    }

    /// Removes the task and renumbers the rest; returns the removed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] or a storage error.
    pub fn delete(&mut self, guid: &str) -> Result<Task> {
        let mut tasks = self.repo.list_all()?;
        let index = index_of(&tasks, guid)?;
        let removed = tasks.remove(index);
        normalize_positions(&mut tasks);
        self.repo.replace_all(tasks)?;
        info!(guid = %guid, "deleted task");
        Ok(removed)
    }

    /// Moves the task to `new_position` (clamped to `1..=M`) and renumbers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] or a storage error.
    pub fn move_task(&mut self, guid: &str, new_position: i64) -> Result<Task> {
        let mut tasks = self.repo.list_all()?;
        let index = index_of(&tasks, guid)?;
        move_to_rank(&mut tasks, index, new_position);

        let moved = find(&tasks, guid)?.clone();
        self.repo.replace_all(tasks)?;
        info!(guid = %guid, position = moved.position(), "moved task");
        Ok(moved)
    }

    /// Applies `patch` to the task.
    ///
    /// The patch is applied to a copy and validated as a whole; nothing is
    /// written if any field or the `completed_at`/state rule is rejected.
    ///
    /// A patched position is a move, not a renormalization: the task is
    /// taken out and reinserted at exactly that rank (clamped), like
    /// [`move_task`](Self::move_task). Updating C to 1 in `[A1, B2, C3]`
    /// gives `[C1, A2, B3]`, whereas [`create`](Self::create) with a taken
    /// position sorts the newcomer after the existing holder.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`], [`TaskError::TaskNotFound`] or a
    /// storage error.
    pub fn update_task(&mut self, guid: &str, patch: &TaskPatch) -> Result<Task> {
        if let Some(position) = patch.position {
            if position < 1 {
                return Err(TaskError::validation("position", "must be >= 1"));
            }
        }

        let mut tasks = self.repo.list_all()?;
        let index = index_of(&tasks, guid)?;
        let mut patched = tasks[index].clone();
        patched.apply_patch(patch)?;
        debug!(guid = %guid, fields = ?patch.field_names(), "applied task patch");

        let updated = if let Some(position) = patch.position {
            tasks[index] = patched;
            move_to_rank(&mut tasks, index, position);
            let updated = find(&tasks, guid)?.clone();
            self.repo.replace_all(tasks)?;
            updated
        } else {
            self.repo.update(&patched)?;
            patched
        };
        info!(guid = %guid, "updated task");
        Ok(updated)
    }

    /// Sets the state label with no transition checks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] or a storage error.
    pub fn set_state(&mut self, guid: &str, state: State) -> Result<Task> {
        self.modify(guid, |task, _| {
            task.set_state(state);
            Ok(())
        })
        .map(|(task, ())| task)
    }

    /// Completes the task and every item on it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] or a storage error.
    pub fn mark_task_complete(&mut self, guid: &str) -> Result<Task> {
        self.modify(guid, |task, clock| {
            task.mark_complete(clock);
            Ok(())
        })
        .map(|(task, ())| task)
    }

    // ------------------------------------------------------------------
    // To-do operations (items addressed by current position)
    // ------------------------------------------------------------------

    /// Appends `item` to the task; returns its assigned position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] or a storage error.
    pub fn add_todo(&mut self, guid: &str, item: ToDoItem) -> Result<u32> {
        self.modify(guid, |task, _| Ok(task.add_item(item)))
            .map(|(_, position)| position)
    }

    /// Creates an item from `text` on this service's clock and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for empty text,
    /// [`TaskError::TaskNotFound`] or a storage error.
    pub fn add_todo_text(&mut self, guid: &str, text: &str) -> Result<ToDoItem> {
        let item = ToDoItem::create(text, &self.clock)?;
        let item_guid = item.guid().to_string();
        let (task, _) = self.modify(guid, |task, _| Ok(task.add_item(item)))?;
        task.item(&item_guid)
            .cloned()
            .ok_or_else(|| TaskError::item_not_found(guid, item_guid))
    }

    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`], [`TaskError::ItemNotFound`] or a
    /// storage error.
    pub fn remove_todo(&mut self, guid: &str, position: u32) -> Result<ToDoItem> {
        self.modify(guid, |task, _| {
            let item_guid = task.item_at(position)?.guid().to_string();
            task.remove_item(&item_guid)
        })
        .map(|(_, removed)| removed)
    }

    /// Moves the item at `position` to `new_position` (clamped).
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`], [`TaskError::ItemNotFound`] or a
    /// storage error.
    pub fn reorder_todo(&mut self, guid: &str, position: u32, new_position: i64) -> Result<Task> {
        self.modify(guid, |task, _| {
            let item_guid = task.item_at(position)?.guid().to_string();
            task.reorder_item(&item_guid, new_position)
        })
        .map(|(task, ())| task)
    }

    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`], [`TaskError::ItemNotFound`] or a
    /// storage error.
    pub fn mark_todo_complete(&mut self, guid: &str, position: u32) -> Result<ToDoItem> {
        self.modify(guid, |task, clock| {
            let item = task.item_at_mut(position)?;
            item.mark_complete(clock);
            Ok(item.clone())
        })
        .map(|(_, item)| item)
    }

    /// Edits the text and/or rank of the item at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for empty text,
    /// [`TaskError::TaskNotFound`], [`TaskError::ItemNotFound`] or a storage
    /// error.
    pub fn update_todo(&mut self, guid: &str, position: u32, patch: &TodoPatch) -> Result<ToDoItem> {
        self.modify(guid, |task, _| {
            let item = task.item_at_mut(position)?;
            if let Some(text) = &patch.text {
                item.set_text(text.clone())?;
            }
            let item_guid = item.guid().to_string();
            if let Some(new_position) = patch.position {
                task.reorder_item(&item_guid, new_position)?;
            }
            task.item(&item_guid)
                .cloned()
                .ok_or_else(|| TaskError::item_not_found(task.guid(), &item_guid))
        })
        .map(|(_, item)| item)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns a storage error when `tasks` is `None` and loading fails.
    pub fn filter_by_state(&self, state: State, tasks: Option<Vec<Task>>) -> Result<Vec<Task>> {
        Ok(query::filter_by_state(&self.or_load(tasks)?, state))
    }

    /// # Errors
    ///
    /// Returns a storage error when `tasks` is `None` and loading fails.
    pub fn filter_by_title(&self, keyword: &str, tasks: Option<Vec<Task>>) -> Result<Vec<Task>> {
        Ok(query::filter_by_title(&self.or_load(tasks)?, keyword))
    }

    /// Tasks due within `days` of the service clock's "now".
    ///
    /// # Errors
    ///
    /// Returns a storage error when `tasks` is `None` and loading fails.
    pub fn filter_due_soon(&self, days: u32, tasks: Option<Vec<Task>>) -> Result<Vec<Task>> {
        Ok(query::filter_due_soon(
            &self.or_load(tasks)?,
            days,
            self.clock.now(),
        ))
    }

    #[must_use]
    pub fn sort_tasks(&self, tasks: Vec<Task>, key: SortKey) -> Vec<Task> {
        query::sort_tasks(tasks, key)
    }

    fn or_load(&self, tasks: Option<Vec<Task>>) -> Result<Vec<Task>> {
        match tasks {
            Some(tasks) => Ok(tasks),
            None => self.repo.list_all(),
        }
    }

    /// Load one task, run `f` on it, and write it back if `f` succeeds.
    fn modify<T>(
        &mut self,
        guid: &str,
        f: impl FnOnce(&mut Task, &C) -> Result<T>,
    ) -> Result<(Task, T)> {
        let mut task = self.get_task(guid)?;
        let out = f(&mut task, &self.clock)?;
        self.repo.update(&task)?;
        debug!(guid = %guid, "persisted task");
        Ok((task, out))
    }
}

/// Stable sort by current position, then renumber `1..=M`.
fn normalize_positions(tasks: &mut [Task]) {
    tasks.sort_by_key(Task::position);
    renumber(tasks);
}

fn index_of(tasks: &[Task], guid: &str) -> Result<usize> {
    tasks
        .iter()
        .position(|t| t.guid() == guid)
        .ok_or_else(|| TaskError::TaskNotFound(guid.to_string()))
}

fn find<'a>(tasks: &'a [Task], guid: &str) -> Result<&'a Task> {
    tasks
        .iter()
        .find(|t| t.guid() == guid)
        .ok_or_else(|| TaskError::TaskNotFound(guid.to_string()))
}
