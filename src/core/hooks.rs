//! Lifecycle hooks.
//!
//! A hook is a shell command configured under `hooks.<name>` in `config.json`.
//! It runs with:
//! - `PATH` prefixed with `<home>/hooks`, so scripts dropped there are callable by name
//! - `PROJJ_HOOK_NAME` set to the hook name
//! - `PROJJ_HOOK_CONFIG` set to the JSON text of the top-level `<name>` key, when present
//!
//! The working directory is `base/<key>` when the key is in the index, otherwise
//! the key itself taken as a path. If that directory does not exist the hook
//! inherits the current directory.

use crate::core::command_init::ProjjContext;
use crate::core::error::Result;
use crate::core::process::{self, CommandOptions};
use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HOOK_NAME_ENV: &str = "PROJJ_HOOK_NAME";
pub const HOOK_CONFIG_ENV: &str = "PROJJ_HOOK_CONFIG";

/// A hook resolved to a command line and its execution options.
#[derive(Debug, Clone)]
pub struct PreparedHook {
    pub name: String,
    pub command: String,
    pub options: CommandOptions,
}

/// Resolve `name` for `key`; `None` when no such hook is configured.
pub fn prepare_hook(ctx: &mut ProjjContext, name: &str, key: &str) -> Result<Option<PreparedHook>> {
    let command = match ctx.config.hook_command(name) {
        Some(command) => command.to_string(),
        None => return Ok(None),
    };

    let mut options = CommandOptions::default()
        .with_env("PATH", hook_path(&ctx.home.hooks_dir(), env::var_os("PATH"))?)
        .with_env(HOOK_NAME_ENV, name);

    if let Some(hook_config) = ctx.config.hook_config(name) {
        options = options.with_env(HOOK_CONFIG_ENV, serde_json::to_string(hook_config)?);
    }

    let cwd = if ctx.index.contains(key)? {
        ctx.config.repo_path(key)
    } else {
        PathBuf::from(key)
    };
    if cwd.is_dir() {
        options = options.with_cwd(cwd);
    } else {
        log::debug!("Hook {name} runs in the current directory, {} does not exist", cwd.display());
    }

    Ok(Some(PreparedHook {
        name: name.to_string(),
        command,
        options,
    }))
}

/// Run hook `name` for `key`. Unconfigured hooks succeed without doing anything.
pub fn run_hook(ctx: &mut ProjjContext, name: &str, key: &str, sink: &mut dyn Write) -> Result<()> {
    let hook = match prepare_hook(ctx, name, key)? {
        Some(hook) => hook,
        None => {
            log::debug!("No {name} hook configured");
            return Ok(());
        }
    };

    log::info!("Run hook {}: {}", hook.name, hook.command);
    process::run(&hook.command, &hook.options, sink)
}

/// `hooks_dir` followed by the non-empty entries of `ambient`.
fn hook_path(hooks_dir: &Path, ambient: Option<OsString>) -> Result<String> {
    let ambient = ambient.unwrap_or_default();
    let inherited = env::split_paths(&ambient).filter(|dir| !dir.as_os_str().is_empty());
    let joined = env::join_paths(std::iter::once(hooks_dir.to_path_buf()).chain(inherited))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    Ok(joined.to_string_lossy().into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::error::ProjjError;
    use crate::core::index::IndexEntry;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir, config: serde_json::Value) -> ProjjContext {
        ProjjContext::in_dir(temp_dir.path(), config)
    }

    #[test]
    fn test_unconfigured_hook_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir, json!({"base": "work"}));
        let mut sink: Vec<u8> = Vec::new();

        run_hook(&mut ctx, "preadd", "example.com/org/repo", &mut sink).unwrap();
        assert!(sink.is_empty());
        assert!(prepare_hook(&mut ctx, "preadd", "example.com/org/repo").unwrap().is_none());
    }

    #[test]
    fn test_hook_environment() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(
            &temp_dir,
            json!({
                "base": "work",
                "hooks": {"postadd": "echo \"$PROJJ_HOOK_NAME $PROJJ_HOOK_CONFIG\""},
                "postadd": {"level": 1}
            }),
        );
        let mut sink: Vec<u8> = Vec::new();

        run_hook(&mut ctx, "postadd", "nowhere", &mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "postadd {\"level\":1}\n");
    }

    #[test]
    fn test_hook_config_absent_without_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir, json!({"base": "work", "hooks": {"preadd": "true"}}));

        let hook = prepare_hook(&mut ctx, "preadd", "nowhere").unwrap().unwrap();
        assert!(!hook.options.env.contains_key(HOOK_CONFIG_ENV));
        assert_eq!(hook.options.env.get(HOOK_NAME_ENV).map(String::as_str), Some("preadd"));
        assert!(hook.options.cwd.is_none());
    }

    #[test]
    fn test_hooks_dir_on_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir, json!({"base": "work", "hooks": {"greet": "greet.sh"}}));

        let script = ctx.home.hooks_dir().join("greet.sh");
        fs::write(&script, "#!/bin/sh\necho hi from hooks\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        }

        let mut sink: Vec<u8> = Vec::new();
        run_hook(&mut ctx, "greet", "nowhere", &mut sink).unwrap();
        assert_eq!(sink, b"hi from hooks\n");
    }

    #[test]
    fn test_indexed_key_runs_in_repository() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir, json!({"base": "work", "hooks": {"postadd": "pwd -P"}}));
        let key = "example.com/org/repo";
        let repo_dir = ctx.config.repo_path(key);
        fs::create_dir_all(&repo_dir).unwrap();
        ctx.index
            .set(key, IndexEntry::new("https://example.com/org/repo"))
            .unwrap();

        let mut sink: Vec<u8> = Vec::new();
        run_hook(&mut ctx, "postadd", key, &mut sink).unwrap();
        assert_eq!(
            String::from_utf8(sink).unwrap().trim(),
            repo_dir.canonicalize().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn test_indexed_key_without_checkout_inherits_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir, json!({"base": "work", "hooks": {"postadd": "true"}}));
        let key = "example.com/org/gone";
        ctx.index
            .set(key, IndexEntry::new("https://example.com/org/gone"))
            .unwrap();
        assert!(!ctx.config.repo_path(key).exists());

        let hook = prepare_hook(&mut ctx, "postadd", key).unwrap().unwrap();
        assert!(hook.options.cwd.is_none());
        run_hook(&mut ctx, "postadd", key, &mut Vec::<u8>::new()).unwrap();
    }

    #[test]
    fn test_hook_path_without_ambient_path() {
        let hooks_dir = Path::new("/home/user/.projj/hooks");
        assert_eq!(hook_path(hooks_dir, None).unwrap(), "/home/user/.projj/hooks");
        assert_eq!(
            hook_path(hooks_dir, Some(OsString::new())).unwrap(),
            "/home/user/.projj/hooks"
        );
    }

    #[test]
    fn test_hook_path_skips_empty_entries() {
        let hooks_dir = Path::new("/home/user/.projj/hooks");
        let ambient = OsString::from("/usr/bin::/bin:");
        assert_eq!(
            hook_path(hooks_dir, Some(ambient)).unwrap(),
            "/home/user/.projj/hooks:/usr/bin:/bin"
        );
    }

    #[test]
    fn test_literal_path_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir, json!({"base": "work", "hooks": {"run": "true"}}));
        let dir = temp_dir.path().join("somewhere");
        fs::create_dir_all(&dir).unwrap();

        let hook = prepare_hook(&mut ctx, "run", &dir.to_string_lossy()).unwrap().unwrap();
        assert_eq!(hook.options.cwd, Some(dir));
    }

    #[test]
    fn test_failing_hook_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir, json!({"base": "work", "hooks": {"preadd": "exit 7"}}));

        let err = run_hook(&mut ctx, "preadd", "nowhere", &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, ProjjError::ProcessFailed { code: Some(7), .. }));
    }
}
