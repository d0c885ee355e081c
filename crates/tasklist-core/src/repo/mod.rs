//! Task storage port and its adapters.
//!
//! - [`json::JsonFileRepository`] keeps the whole collection in one JSON file.
//! - [`memory::MemoryRepository`] keeps it in a `Vec`, for tests and embedding.
//!
//! Repositories store records as given. Collection-wide position bookkeeping
//! is the service's job.

pub mod json;
pub mod memory;

pub use json::JsonFileRepository;
pub use memory::MemoryRepository;

use crate::error::Result;
use crate::model::Task;

/// Durable store of tasks keyed by GUID.
pub trait TaskRepository {
    /// Every stored task, in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or decoded.
    fn list_all(&self) -> Result<Vec<Task>>;

    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or decoded.
    fn get_by_guid(&self, guid: &str) -> Result<Option<Task>> {
        Ok(self.list_all()?.into_iter().find(|t| t.guid() == guid))
    }

    /// Appends a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::DuplicateTask`](crate::error::TaskError::DuplicateTask)
    /// if the GUID is already stored, or a storage error.
    fn add(&mut self, task: Task) -> Result<()>;

    /// Replaces the stored task that has the same GUID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`](crate::error::TaskError::TaskNotFound)
    /// if no such task is stored, or a storage error.
    fn update(&mut self, task: &Task) -> Result<()>;

    /// Removes the task with `guid`; returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    fn delete(&mut self, guid: &str) -> Result<bool>;

    /// Overwrites the whole collection in one write.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    fn replace_all(&mut self, tasks: Vec<Task>) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or decoded.
    fn count(&self) -> Result<usize> {
        Ok(self.list_all()?.len())
    }
}

pub(crate) fn ensure_unique(tasks: &[Task], guid: &str) -> Result<()> {
    if tasks.iter().any(|t| t.guid() == guid) {
        return Err(crate::error::TaskError::DuplicateTask(guid.to_string()));
    }
    Ok(())
}

pub(crate) fn replace_existing(tasks: &mut [Task], task: &Task) -> Result<()> {
    let slot = tasks
        .iter_mut()
        .find(|t| t.guid() == task.guid())
        .ok_or_else(|| crate::error::TaskError::TaskNotFound(task.guid().to_string()))?;
    *slot = task.clone();
    Ok(())
}
