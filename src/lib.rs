//! Projj - manage a workspace of cloned repositories.
//!
//! Repositories are cloned under a single base directory at a path derived from
//! their URL (`https://github.com/org/repo` lives at `<base>/github.com/org/repo`),
//! recorded in a persisted index, and surrounded by user-defined shell hooks.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Configuration loading and resolution
//! - The repository index
//! - URL normalization
//! - Subprocess execution and lifecycle hooks
//!
//! The add workflow lives in [`commands::add`].

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use self::core::{
    cache_key,
    // Configuration
    ensure_config,
    normalize_url,
    resolve_config,
    // Hooks and processes
    run_hook,
    AliasTable,
    CommandOptions,
    Config,
    IndexEntry,
    PartialConfig,
    // Error handling
    ProjjError,
    // Command initialization
    ProjjContext,
    ProjjHome,
    // Repository index
    RepoIndex,
    ResolveContext,
    Result,
};
