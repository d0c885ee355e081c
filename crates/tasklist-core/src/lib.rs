//! tasklist-core library.
//!
//! Tasks with ordered to-do checklists, kept in a flat JSON file.
//!
//! - [`model`]: `Task`, `ToDoItem`, `State` and typed patches.
//! - [`repo`]: the `TaskRepository` port with JSON-file and in-memory adapters.
//! - [`service`]: `TaskService`, which owns collection ordering.
//! - [`query`]: pure filters and sorts.
//! - [`config`]: layered `tasklist.toml` settings.
//!
//! # Conventions
//!
//! - **Errors**: library calls return [`error::Result`]; config loading uses
//!   `anyhow` with file context.
//! - **Logging**: `tracing` macros; `debug!` for store I/O, `info!` for
//!   mutations.
//! - **Time**: anything that stamps a timestamp takes a [`clock::Clock`].

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use clock::{Clock, SystemClock};
pub use error::{ErrorCode, TaskError};
pub use model::{NewTask, State, Task, TaskPatch, ToDoItem, TodoPatch};
pub use query::SortKey;
pub use repo::{JsonFileRepository, MemoryRepository, TaskRepository};
pub use service::TaskService;
