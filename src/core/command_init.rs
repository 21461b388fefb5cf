//! Centralized initialization for projj commands.
//!
//! Every command starts the same way: make sure the configuration exists, then
//! load the repository index. [`ProjjContext`] owns the results and is passed by
//! reference to the hook runner and the command logic.
//!
//! # Initialization Steps
//! 1. **Configuration**: create `<home>`, load or create `config.json`
//! 2. **Index**: read `cache.json` into memory

use crate::core::{
    config::{ensure_config, Config},
    dirs::ProjjHome,
    error::Result,
    index::RepoIndex,
    output::prompt_base_directory,
};
use std::path::{Path, PathBuf};

/// Everything a command needs for one invocation
#[derive(Debug)]
pub struct ProjjContext {
    pub home: ProjjHome,
    pub config: Config,
    pub index: RepoIndex,
}

impl ProjjContext {
    /// Initialize against `home`, asking `prompt` for a base directory on first run
    pub fn initialize<F>(home: ProjjHome, prompt: F) -> Result<Self>
    where
        F: FnOnce(&Path) -> Result<PathBuf>,
    {
        let config = ensure_config(&home, prompt)?;
        log::debug!("Base directory: {}", config.base.display());

        let mut index = RepoIndex::new(home.index_file());
        let count = index.entries()?.len();
        log::debug!("Index holds {count} repositories");

        Ok(Self {
            home,
            config,
            index,
        })
    }

    /// Initialize from `$PROJJ_HOME` (or `~/.projj`) with the interactive prompt
    pub fn from_env() -> Result<Self> {
        Self::initialize(ProjjHome::from_env()?, prompt_base_directory)
    }
}

#[cfg(test)]
impl ProjjContext {
    /// Context rooted at `dir/.projj` with `config` resolved against `dir`
    pub(crate) fn in_dir(dir: &Path, config: serde_json::Value) -> Self {
        use crate::core::config::{resolve_config, PartialConfig, ResolveContext};

        let home = ProjjHome::new(dir.join(".projj"));
        std::fs::create_dir_all(home.hooks_dir()).unwrap();
        let partial: PartialConfig = serde_json::from_value(config).unwrap();
        let resolve = ResolveContext {
            config_dir: home.root().to_path_buf(),
            home_dir: dir.to_path_buf(),
            cwd: dir.to_path_buf(),
        };
        let config = resolve_config(partial, PartialConfig::defaults(), &resolve);
        let index = RepoIndex::new(home.index_file());
        Self {
            home,
            config,
            index,
        }
    }
}
