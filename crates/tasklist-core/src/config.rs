use crate::query::SortKey;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "tasklist.toml";
pub const DEFAULT_STORE: &str = "tasks.json";
pub const DEFAULT_DUE_SOON_DAYS: u32 = 3;

/// One config file as written on disk. Every key is optional so project and
/// user files can be layered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub store: Option<PathBuf>,
    #[serde(default)]
    pub due_soon_days: Option<u32>,
    #[serde(default)]
    pub default_sort: Option<SortKey>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl ConfigFile {
    /// Keys set in `self` win; the rest fall through to `lower`.
    #[must_use]
    pub fn layered_over(self, lower: Self) -> Self {
        Self {
            store: self.store.or(lower.store),
            due_soon_days: self.due_soon_days.or(lower.due_soon_days),
            default_sort: self.default_sort.or(lower.default_sort),
            created_by: self.created_by.or(lower.created_by),
        }
    }
}

/// Values that beat every file, already resolved from CLI flags and
/// environment by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub store: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub store: PathBuf,
    pub due_soon_days: u32,
    pub default_sort: SortKey,
    pub created_by: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: PathBuf::from(DEFAULT_STORE),
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            default_sort: SortKey::default(),
            created_by: None,
        }
    }
}

/// Reads `tasklist.toml` from `project_root`; a missing file is an empty
/// layer.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ConfigFile> {
    load_file(&project_root.join(PROJECT_CONFIG_FILE))
}

/// Reads `<config_dir>/tasklist/config.toml`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigFile> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    load_file(&config_dir.join("tasklist/config.toml"))
}

fn load_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ConfigFile>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Loads both config files and resolves them against `overrides`.
///
/// # Errors
///
/// Returns an error if either config file is unreadable or malformed.
pub fn resolve_config(project_root: &Path, overrides: &Overrides) -> Result<Config> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;
    Ok(resolve(project_root, project, user, overrides))
}

fn resolve(project_root: &Path, project: ConfigFile, user: ConfigFile, overrides: &Overrides) -> Config {
    let defaults = Config::default();
    let merged = project.layered_over(user);

    // Relative paths from any source are anchored at the project root.
    let store = overrides
        .store
        .clone()
        .or(merged.store)
        .unwrap_or(defaults.store);
    let store = if store.is_relative() {
        project_root.join(store)
    } else {
        store
    };

    Config {
        store,
        due_soon_days: merged.due_soon_days.unwrap_or(defaults.due_soon_days),
        default_sort: merged.default_sort.unwrap_or(defaults.default_sort),
        created_by: merged.created_by,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layer(toml_src: &str) -> ConfigFile {
        toml::from_str(toml_src).expect("config should parse")
    }

    #[test]
    fn missing_project_config_is_empty_layer() {
        let dir = TempDir::new().expect("tempdir");
        let cfg = load_project_config(dir.path()).expect("load should succeed");
        assert_eq!(cfg, ConfigFile::default());
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let root = Path::new("/work");
        let cfg = resolve(root, ConfigFile::default(), ConfigFile::default(), &Overrides::default());
        assert_eq!(cfg.store, PathBuf::from("/work/tasks.json"));
        assert_eq!(cfg.due_soon_days, 3);
        assert_eq!(cfg.default_sort, SortKey::Position);
        assert!(cfg.created_by.is_none());
    }

    #[test]
    fn project_layer_beats_user_layer() {
        let project = layer("due_soon_days = 7\n");
        let user = layer("due_soon_days = 1\ndefault_sort = \"deadline\"\ncreated_by = \"ana\"\n");
        let cfg = resolve(Path::new("/w"), project, user, &Overrides::default());
        assert_eq!(cfg.due_soon_days, 7);
        assert_eq!(cfg.default_sort, SortKey::Deadline);
        assert_eq!(cfg.created_by.as_deref(), Some("ana"));
    }

    #[test]
    fn store_override_beats_files() {
        let project = layer("store = \"data/tasks.json\"\n");
        let overrides = Overrides {
            store: Some(PathBuf::from("/tmp/other.json")),
        };
        let cfg = resolve(Path::new("/w"), project, ConfigFile::default(), &overrides);
        assert_eq!(cfg.store, PathBuf::from("/tmp/other.json"));
    }

    #[test]
    fn relative_store_is_anchored_at_project_root() {
        let project = layer("store = \"data/tasks.json\"\n");
        let cfg = resolve(Path::new("/w"), project, ConfigFile::default(), &Overrides::default());
        assert_eq!(cfg.store, PathBuf::from("/w/data/tasks.json"));
    }

    #[test]
    fn project_file_is_read_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "default_sort = \"deadline\"\n",
        )
        .expect("write config");
        let cfg = load_project_config(dir.path()).expect("load should succeed");
        assert_eq!(cfg.default_sort, Some(SortKey::Deadline));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "due_soon_days = \"soon\"")
            .expect("write config");
        let err = load_project_config(dir.path()).expect_err("should fail");
        assert!(format!("{err}").contains("tasklist.toml"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ConfigFile>("colour = \"blue\"").is_err());
    }
}
