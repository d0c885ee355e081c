//! Creator identity resolution for new tasks.
//!
//! The resolution chain: `--as` flag > `TASKLIST_USER` env > `created_by`
//! from config > `"cli"`.

use std::env;

/// Identity recorded when nothing else is configured.
pub const DEFAULT_CREATOR: &str = "cli";

/// Environment reader trait for dependency injection in tests.
trait EnvReader {
    fn get(&self, key: &str) -> Option<String>;
}

struct RealEnv;

impl EnvReader for RealEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

fn resolve_creator_with(cli_flag: Option<&str>, configured: Option<&str>, env: &dyn EnvReader) -> String {
    if let Some(name) = cli_flag.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    if let Some(val) = env.get("TASKLIST_USER") {
        return val.trim().to_string();
    }

    if let Some(name) = configured.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    DEFAULT_CREATOR.to_string()
}

/// Resolve who is creating tasks in this invocation.
pub fn resolve_creator(cli_flag: Option<&str>, configured: Option<&str>) -> String {
    resolve_creator_with(cli_flag, configured, &RealEnv)
}
