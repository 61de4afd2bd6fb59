use crate::api::ClassdeskApi;
use crate::commands::ClassdeskPaths;
use crate::config::ClassdeskConfig;
use crate::error::{ClassdeskError, Result};
use crate::preferences::Preferences;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that overrides the data directory (used heavily by tests).
pub const HOME_ENV: &str = "CLASSDESK_HOME";

pub struct ClassdeskContext {
    pub api: ClassdeskApi<FileStore>,
    pub config: ClassdeskConfig,
    pub preferences: Preferences,
}

/// The explicit override wins; otherwise the OS data directory for classdesk.
pub fn resolve_data_dir(override_dir: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "classdesk", "classdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ClassdeskError::Store("Could not determine data directory".to_string()))
}

pub fn initialize() -> Result<ClassdeskContext> {
    let data_dir = resolve_data_dir(std::env::var_os(HOME_ENV))?;
    initialize_at(data_dir)
}

pub fn initialize_at(data_dir: PathBuf) -> Result<ClassdeskContext> {
    let config = ClassdeskConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        ClassdeskConfig::default()
    });
    let store = FileStore::new(data_dir.clone());
    let preferences = Preferences::load(&store)?;
    let api = ClassdeskApi::new(store, ClassdeskPaths { data_dir });
    tracing::debug!(data_dir = %api.paths().data_dir.display(), "context initialized");

    Ok(ClassdeskContext {
        api,
        config,
        preferences,
    })
}
