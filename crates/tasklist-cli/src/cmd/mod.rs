pub mod complete;
pub mod completions;
pub mod count;
pub mod create;
pub mod delete;
pub mod list;
pub mod move_cmd;
pub mod set_state;
pub mod todo;
pub mod update;
pub mod view;

use crate::output::{OutputMode, render_mode};
use serde::Serialize;
use tasklist_core::config::Config;
use tasklist_core::{JsonFileRepository, TaskService};

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct Session {
    pub output: OutputMode,
    pub quiet: bool,
    pub config: Config,
    /// Identity recorded as `created_by` on new tasks.
    pub creator: String,
}

impl Session {
    /// Opens the configured store, creating it empty if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be created.
    pub fn service(&self) -> anyhow::Result<TaskService<JsonFileRepository>> {
        let repo = JsonFileRepository::open(&self.config.store)?;
        tracing::debug!(store = %self.config.store.display(), "opened task store");
        Ok(TaskService::new(repo))
    }

    /// Report the outcome of a mutation: `value` in JSON mode, `message`
    /// otherwise. `--quiet` silences the human forms only.
    pub fn report<T: Serialize>(&self, value: &T, message: &str) -> anyhow::Result<()> {
        if self.quiet && !self.output.is_json() {
            return Ok(());
        }
        render_mode(
            self.output,
            value,
            |_, w| writeln!(w, "{message}"),
            |_, w| writeln!(w, "✓ {message}"),
        )
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::path::Path;

    pub fn session(store: &Path, output: OutputMode) -> Session {
        Session {
            output,
            quiet: false,
            config: Config {
                store: store.to_path_buf(),
                ..Config::default()
            },
            creator: "tester".to_string(),
        }
    }
}
