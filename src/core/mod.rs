//! Core functionality for the projj tool.
//!
//! This module provides the building blocks every command is composed of:
//! configuration, the repository index, URL normalization, subprocess
//! execution and lifecycle hooks.

pub mod command_init;
pub mod config;
pub mod dirs;
pub mod error;
pub mod hooks;
pub mod index;
pub mod output;
pub mod process;
pub mod url;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{ProjjError, Result};

// === Configuration ===
// Typed config.json with defaults and base directory resolution
pub use config::{ensure_config, resolve_config, AliasTable, Config, PartialConfig, ResolveContext};

// === File locations ===
pub use self::dirs::ProjjHome;

// === Repository index ===
// Lazily loaded cache.json mapping cache keys to repository metadata
pub use index::{IndexEntry, RepoIndex};

// === URL normalization ===
pub use self::url::{cache_key, normalize_url};

// === Process execution ===
pub use process::{run, shell_quote, CommandOptions};

// === Hooks ===
pub use hooks::{prepare_hook, run_hook, PreparedHook};

// === Command initialization ===
pub use command_init::ProjjContext;

// === Output formatting ===
pub use output::{print_captured, print_error, print_info, print_success, prompt_base_directory};
