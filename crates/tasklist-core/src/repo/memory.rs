use super::{TaskRepository, ensure_unique, replace_existing};
use crate::error::Result;
use crate::model::Task;

/// In-memory repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    tasks: Vec<Task>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with `tasks` as given, positions included.
    #[must_use]
    pub const fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl TaskRepository for MemoryRepository {
    fn list_all(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn get_by_guid(&self, guid: &str) -> Result<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.guid() == guid).cloned())
    }

    fn add(&mut self, task: Task) -> Result<()> {
        ensure_unique(&self.tasks, task.guid())?;
        self.tasks.push(task);
        Ok(())
    }

    fn update(&mut self, task: &Task) -> Result<()> {
        replace_existing(&mut self.tasks, task)
    }

    fn delete(&mut self, guid: &str) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.guid() != guid);
        Ok(self.tasks.len() != before)
    }

    fn replace_all(&mut self, tasks: Vec<Task>) -> Result<()> {
        self.tasks = tasks;
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.tasks.len())
    }
}
