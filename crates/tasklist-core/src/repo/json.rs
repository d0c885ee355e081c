//! Flat-file JSON repository.
//!
//! The store is a single pretty-printed JSON array of task records. Every
//! operation reads the whole file; every mutation rewrites it.
//!
//! # Invariants
//!
//! - The file exists once the repository has been opened (seeded with `[]`).
//! - Writes go to a sibling `<name>.tmp` file (`tasks.json.tmp`) which is
//!   renamed over the store, so
//!   an interrupted write leaves the previous contents in place.
//! - No locking: concurrent writers race and the last rename wins.

use super::{TaskRepository, ensure_unique, replace_existing};
use crate::error::{Result, TaskError};
use crate::model::Task;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Repository backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Opens the store at `path`, creating it (and its parent directories)
    /// as an empty collection if missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Write`] if the file cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let repo = Self { path: path.into() };
        if !repo.path.exists() {
            if let Some(parent) = repo.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| TaskError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            debug!(path = %repo.path.display(), "initializing empty task store");
            repo.write_all(&[])?;
        }
        Ok(repo)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Task>> {
        let raw = fs::read_to_string(&self.path).map_err(|source| TaskError::Read {
            path: self.path.clone(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tasks: Vec<Task> = serde_json::from_str(&raw).map_err(|source| TaskError::Codec {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded task store");
        Ok(tasks)
    }

    /// Sibling scratch file: the store's full file name plus `.tmp`.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let mut encoded =
            serde_json::to_string_pretty(tasks).map_err(|source| TaskError::Codec {
                path: self.path.clone(),
                source,
            })?;
        encoded.push('\n');

        let tmp = self.temp_path();
        fs::write(&tmp, encoded.as_bytes()).map_err(|source| TaskError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| TaskError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "wrote task store");
        Ok(())
    }
}

impl TaskRepository for JsonFileRepository {
    fn list_all(&self) -> Result<Vec<Task>> {
        self.read_all()
    }

    fn add(&mut self, task: Task) -> Result<()> {
        let mut tasks = self.read_all()?;
        ensure_unique(&tasks, task.guid())?;
        tasks.push(task);
        self.write_all(&tasks)
    }

    fn update(&mut self, task: &Task) -> Result<()> {
        let mut tasks = self.read_all()?;
        replace_existing(&mut tasks, task)?;
        self.write_all(&tasks)
    }

    fn delete(&mut self, guid: &str) -> Result<bool> {
        let mut tasks = self.read_all()?;
        let before = tasks.len();
        tasks.retain(|t| t.guid() != guid);
        if tasks.len() == before {
            return Ok(false);
        }
        self.write_all(&tasks)?;
        Ok(true)
    }

    fn replace_all(&mut self, tasks: Vec<Task>) -> Result<()> {
        self.write_all(&tasks)
    }
}
