use crate::api::{ShelfApi, ShelfPaths};
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOCAL_DIR: &str = ".shelf";

/// Where config and data live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `./.shelf/config.json`, data file relative to the working directory
    Local,
    /// The platform data directory for shelf
    Global,
}

pub struct ShelfContext {
    pub api: ShelfApi<FileStore>,
    pub scope: Scope,
    pub config: ShelfConfig,
}

fn global_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "shelf", "shelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ShelfError::Config("Could not determine data directory".to_string()))
}

/// Resolve config and data file locations for `scope`.
///
/// The data file comes from `file_override` when given, otherwise from the config's
/// `data_file`, taken relative to the scope's base directory.
pub fn resolve_paths(
    cwd: &Path,
    scope: Scope,
    config: &ShelfConfig,
    file_override: Option<&Path>,
) -> Result<ShelfPaths> {
    let (base_dir, config_dir) = match scope {
        Scope::Local => (cwd.to_path_buf(), cwd.join(LOCAL_DIR)),
        Scope::Global => {
            let dir = global_dir()?;
            (dir.clone(), dir)
        }
    };

    let data_file = match file_override {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => base_dir.join(&config.data_file),
    };

    Ok(ShelfPaths {
        config_dir,
        data_file,
    })
}

pub fn config_dir(cwd: &Path, scope: Scope) -> Result<PathBuf> {
    match scope {
        Scope::Local => Ok(cwd.join(LOCAL_DIR)),
        Scope::Global => global_dir(),
    }
}

pub fn initialize(
    cwd: &Path,
    use_global: bool,
    file_override: Option<&Path>,
) -> Result<ShelfContext> {
    let scope = if use_global {
        Scope::Global
    } else {
        Scope::Local
    };

    let config = ShelfConfig::load(config_dir(cwd, scope)?)?;
    let paths = resolve_paths(cwd, scope, &config, file_override)?;
    debug!(?scope, data_file = %paths.data_file.display(), "Resolved shelf paths");

    let store = FileStore::new(&paths.data_file);
    let api = ShelfApi::new(store, config.fine_policy(), paths);

    Ok(ShelfContext { api, scope, config })
}
