//! Configuration loading, defaulting and persistence.
//!
//! The configuration lives in `<home>/config.json`:
//!
//! ```json
//! {
//!   "base": "~/projj",
//!   "alias": { "github://": "https://github.com/" },
//!   "hooks": { "postadd": "npm install" },
//!   "postadd": { "registry": "https://registry.npmjs.org" }
//! }
//! ```
//!
//! Top-level keys other than `base`, `alias` and `hooks` are kept as hook-specific
//! configuration, looked up by hook name.

use crate::core::dirs::{get_home_directory, ProjjHome};
use crate::core::error::{ProjjError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

const DEFAULT_BASE: &str = "~/projj";
const SSH_HELPER: &str = "#!/bin/sh\nexec ssh -o StrictHostKeyChecking=no \"$@\"\n";

/// URL prefix substitutions, kept in the order they appear in `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable(Vec<(String, String)>);

impl AliasTable {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter().map(|(prefix, replacement)| (prefix, replacement))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or replace an entry; a replaced entry keeps its position.
    pub fn insert(&mut self, prefix: String, replacement: String) {
        match self.0.iter_mut().find(|(existing, _)| *existing == prefix) {
            Some(entry) => entry.1 = replacement,
            None => self.0.push((prefix, replacement)),
        }
    }
}

impl From<Vec<(String, String)>> for AliasTable {
    fn from(entries: Vec<(String, String)>) -> Self {
        let mut table = AliasTable::default();
        for (prefix, replacement) in entries {
            table.insert(prefix, replacement);
        }
        table
    }
}

impl Serialize for AliasTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (prefix, replacement) in &self.0 {
            map.serialize_entry(prefix, replacement)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AliasVisitor;

        impl<'de> Visitor<'de> for AliasVisitor {
            type Value = AliasTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of url prefixes to replacements")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<AliasTable, A::Error> {
                let mut table = AliasTable::default();
                while let Some((prefix, replacement)) = access.next_entry::<String, String>()? {
                    table.insert(prefix, replacement);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(AliasVisitor)
    }
}

/// Configuration as written on disk; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<AliasTable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PartialConfig {
    pub fn defaults() -> Self {
        Self {
            base: Some(DEFAULT_BASE.to_string()),
            alias: Some(AliasTable::from(vec![(
                "github://".to_string(),
                "https://github.com/".to_string(),
            )])),
            hooks: Some(BTreeMap::new()),
            extra: Map::new(),
        }
    }
}

/// Fully resolved configuration with an absolute base directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base: PathBuf,
    pub alias: AliasTable,
    pub hooks: BTreeMap<String, String>,
    pub extra: Map<String, Value>,
}

impl Config {
    pub fn hook_command(&self, name: &str) -> Option<&str> {
        self.hooks.get(name).map(String::as_str)
    }

    /// Hook-specific configuration stored under the hook's name
    pub fn hook_config(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Working copy location of the repository identified by `key`
    pub fn repo_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }

    pub fn to_partial(&self) -> PartialConfig {
        PartialConfig {
            base: Some(self.base.to_string_lossy().into_owned()),
            alias: Some(self.alias.clone()),
            hooks: Some(self.hooks.clone()),
            extra: self.extra.clone(),
        }
    }
}

/// Directories that relative `base` values are resolved against.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub config_dir: PathBuf,
    pub home_dir: PathBuf,
    pub cwd: PathBuf,
}

impl ResolveContext {
    pub fn current(home: &ProjjHome) -> Result<Self> {
        Ok(Self {
            config_dir: home.root().to_path_buf(),
            home_dir: get_home_directory()?,
            cwd: std::env::current_dir()?,
        })
    }
}

/// Merge `partial` over `defaults` key by key and make `base` absolute.
pub fn resolve_config(partial: PartialConfig, defaults: PartialConfig, ctx: &ResolveContext) -> Config {
    let mut extra = defaults.extra;
    extra.extend(partial.extra);

    let base = partial.base.or(defaults.base).unwrap_or_default();

    Config {
        base: resolve_base(&base, ctx),
        alias: partial.alias.or(defaults.alias).unwrap_or_default(),
        hooks: partial.hooks.or(defaults.hooks).unwrap_or_default(),
        extra,
    }
}

/// `.` is relative to the config directory, `~` to the home directory, `/` is kept
/// and anything else is relative to the current directory.
pub fn resolve_base(base: &str, ctx: &ResolveContext) -> PathBuf {
    let resolved = if base.starts_with('.') {
        ctx.config_dir.join(base)
    } else if let Some(rest) = base.strip_prefix('~') {
        ctx.home_dir.join(rest.trim_start_matches(['/', '\\']))
    } else if base.starts_with('/') || Path::new(base).is_absolute() {
        PathBuf::from(base)
    } else {
        ctx.cwd.join(base)
    };
    normalize_path(&resolved)
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Read `config.json`; a missing file is `None`, anything unreadable is fatal.
pub fn load_partial(path: &Path) -> Result<Option<PartialConfig>> {
    if !path.exists() {
        log::debug!("Config file does not exist: {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| ProjjError::config_read_failed(path, e))?;
    let partial = serde_json::from_str(&content).map_err(|e| ProjjError::config_parse_failed(path, e))?;
    Ok(Some(partial))
}

pub fn save_partial(path: &Path, partial: &PartialConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(partial)?;
    fs::write(path, content)?;
    log::debug!("Wrote config file: {}", path.display());
    Ok(())
}

/// Make sure a configuration with a base directory exists and return it resolved.
///
/// `prompt` receives the default base directory and returns the one to use; it is
/// only called when `config.json` is missing or has no `base`.
pub fn ensure_config<F>(home: &ProjjHome, prompt: F) -> Result<Config>
where
    F: FnOnce(&Path) -> Result<PathBuf>,
{
    fs::create_dir_all(home.root())?;
    install_ssh_helper(home)?;

    let ctx = ResolveContext::current(home)?;
    let config_file = home.config_file();
    let partial = load_partial(&config_file)?;

    if let Some(partial) = &partial {
        if partial.base.is_some() {
            log::debug!("Using config from {}", config_file.display());
            return Ok(resolve_config(partial.clone(), PartialConfig::defaults(), &ctx));
        }
    }

    let default_base = resolve_base(DEFAULT_BASE, &ctx);
    let chosen = prompt(&default_base)?;
    log::info!("Base directory set to {}", chosen.display());

    let mut partial = partial.unwrap_or_default();
    partial.base = Some(chosen.to_string_lossy().into_owned());
    let config = resolve_config(partial, PartialConfig::defaults(), &ctx);
    save_partial(&config_file, &config.to_partial())?;

    Ok(config)
}

/// Write the default `GIT_SSH` helper unless one is already installed.
fn install_ssh_helper(home: &ProjjHome) -> Result<()> {
    let helper = home.ssh_helper();
    if helper.exists() {
        return Ok(());
    }

    fs::write(&helper, SSH_HELPER)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&helper, fs::Permissions::from_mode(0o755))?;
    }
    log::debug!("Installed ssh helper: {}", helper.display());
    Ok(())
}
