use crate::core::error::{ProjjError, Result};
use std::path::{Path, PathBuf};

/// Environment variable that relocates the projj home directory.
pub const HOME_ENV: &str = "PROJJ_HOME";

/// Locations of every file projj reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjjHome {
    root: PathBuf,
}

impl ProjjHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$PROJJ_HOME` when set, otherwise `~/.projj`
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(HOME_ENV) {
            Some(root) if !root.is_empty() => Ok(Self::new(root)),
            _ => Ok(Self::new(get_home_directory()?.join(".projj"))),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn index_file(&self) -> PathBuf {
        self.root.join("cache.json")
    }

    pub fn hooks_dir(&self) -> PathBuf {
        self.root.join("hooks")
    }

    pub fn ssh_helper(&self) -> PathBuf {
        self.root.join("ssh.sh")
    }
}

pub fn get_home_directory() -> Result<PathBuf> {
    dirs::home_dir().ok_or(ProjjError::HomeDirectoryNotFound)
}
