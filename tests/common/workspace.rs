//! Temporary projj environments for integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stub `git` that fakes `git clone <url> <dir>` without touching the network.
///
/// Set `FAKE_GIT_FAIL` to make the clone fail the way an unreachable remote does.
const FAKE_GIT: &str = r#"#!/bin/sh
if [ "$1" = "clone" ]; then
  if [ -n "$FAKE_GIT_FAIL" ]; then
    echo "fatal: could not read from remote repository" >&2
    exit 128
  fi
  mkdir -p "$3/.git"
  echo "$2" > "$3/.git/origin"
  echo "cloned $2"
  exit 0
fi
echo "unsupported: $*" >&2
exit 1
"#;

/// A projj home, base directory and stub git inside one temporary directory.
/// The TempDir must be kept alive for the duration of the test.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub home: PathBuf,
    pub base: PathBuf,
    pub bin: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        let home = root.join(".projj");
        let base = root.join("work");
        let bin = root.join("bin");

        fs::create_dir_all(&bin)?;
        write_executable(&bin.join("git"), FAKE_GIT)?;

        Ok(Self {
            temp_dir,
            root,
            home,
            base,
            bin,
        })
    }

    /// Workspace with `config.json` written; `base` is filled in when absent
    pub fn with_config(mut config: Value) -> anyhow::Result<Self> {
        let workspace = Self::new()?;
        if config.get("base").is_none() {
            config["base"] = Value::String(workspace.base.to_string_lossy().into_owned());
        }
        fs::create_dir_all(&workspace.home)?;
        fs::write(workspace.config_file(), serde_json::to_string_pretty(&config)?)?;
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.json")
    }

    pub fn index_file(&self) -> PathBuf {
        self.home.join("cache.json")
    }

    pub fn hooks_dir(&self) -> PathBuf {
        self.home.join("hooks")
    }

    /// Parsed `cache.json`, or `null` when it was never written
    pub fn index(&self) -> anyhow::Result<Value> {
        if !self.index_file().exists() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&fs::read_to_string(self.index_file())?)?)
    }

    /// `projj` configured to use this workspace, with a non-interactive stdin
    pub fn projj(&self) -> anyhow::Result<Command> {
        let path = std::env::var_os("PATH").unwrap_or_default();
        let dirs = std::iter::once(self.bin.clone()).chain(std::env::split_paths(&path));

        let mut cmd = Command::cargo_bin("projj")?;
        cmd.env("PROJJ_HOME", &self.home)
            .env("HOME", self.root())
            .env("PATH", std::env::join_paths(dirs)?)
            .env_remove("FAKE_GIT_FAIL")
            .env_remove("RUST_LOG")
            .current_dir(self.root())
            .write_stdin("");
        Ok(cmd)
    }

    pub fn write_hook_script(&self, name: &str, content: &str) -> anyhow::Result<()> {
        fs::create_dir_all(self.hooks_dir())?;
        write_executable(&self.hooks_dir().join(name), content)
    }
}

fn write_executable(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}
