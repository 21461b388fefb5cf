//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ProjjError`] which covers every failure mode of a projj
//! invocation. It uses `thiserror` for ergonomic error definitions and includes
//! constructors for the variants that carry context.
//!
//! # Public API
//! - [`ProjjError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ProjjError>`
//!
//! # Error Categories
//! - **Configuration**: unreadable or malformed `config.json`
//! - **Processes**: hooks or clones exiting with a non-zero status
//! - **Filesystem**: directory creation, index reads and writes
//! - **Repositories**: invalid URLs, duplicates, unknown hooks

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for projj
#[derive(Error, Debug)]
pub enum ProjjError {
    // Configuration errors
    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Could not determine the home directory")]
    HomeDirectoryNotFound,

    // Process errors
    #[error("Command `{command}` exited with {}", exit_label(.code))]
    ProcessFailed {
        command: String,
        code: Option<i32>,
        stderr: Vec<u8>,
    },

    #[error("Failed to spawn `{command}`: {source}")]
    ProcessSpawnFailed {
        command: String,
        source: std::io::Error,
    },

    #[error("Failed to forward output of `{command}`: {source}")]
    OutputSinkFailed {
        command: String,
        source: std::io::Error,
    },

    // Index errors
    #[error("Failed to read index file '{path}': {source}")]
    IndexReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse index file '{path}': {source}")]
    IndexParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write index file '{path}': {source}")]
    IndexWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Repository errors
    #[error("Invalid repository url: {url}")]
    InvalidRepoUrl { url: String },

    #[error("{key} already exists at {}", .path.display())]
    RepositoryExists { key: String, path: PathBuf },

    #[error("Hook \"{name}\" is not configured")]
    HookNotFound { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

/// Convenience type alias for Results using ProjjError
pub type Result<T> = std::result::Result<T, ProjjError>;

impl ProjjError {
    /// Create a config read error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a process failure carrying the captured standard error
    pub fn process_failed(command: impl Into<String>, code: Option<i32>, stderr: Vec<u8>) -> Self {
        Self::ProcessFailed {
            command: command.into(),
            code,
            stderr,
        }
    }

    pub fn process_spawn_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::ProcessSpawnFailed {
            command: command.into(),
            source,
        }
    }

    pub fn output_sink_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::OutputSinkFailed {
            command: command.into(),
            source,
        }
    }

    /// Create an index read error
    pub fn index_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IndexReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an index parse error
    pub fn index_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::IndexParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an index write error
    pub fn index_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IndexWriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl { url: url.into() }
    }

    pub fn repository_exists(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::RepositoryExists {
            key: key.into(),
            path: path.into(),
        }
    }

    pub fn hook_not_found(name: impl Into<String>) -> Self {
        Self::HookNotFound { name: name.into() }
    }

    /// Captured standard error of a failed subprocess, if this error has one
    pub fn captured_stderr(&self) -> Option<String> {
        match self {
            Self::ProcessFailed { stderr, .. } if !stderr.is_empty() => {
                Some(String::from_utf8_lossy(stderr).trim_end().to_string())
            }
            _ => None,
        }
    }
}
