//! Repository URL normalization.
//!
//! Every repository is stored under `base/<key>`, where the key is derived from
//! its URL: aliases are expanded, the URL is brought into transport form and the
//! scheme, user info and `.git` suffix are dropped.
//!
//! ```text
//! github://org/repo              -> https://github.com/org/repo -> github.com/org/repo
//! git@github.com:org/repo.git    -> ssh://git@github.com/org/repo.git -> github.com/org/repo
//! github.com:org/repo.git        -> ssh://github.com/org/repo.git -> github.com/org/repo
//! https://example.com/org/repo   -> example.com/org/repo
//! ```

use crate::core::config::AliasTable;
use crate::core::error::{ProjjError, Result};
use percent_encoding::percent_decode_str;
use url::Url;

/// Replace the first alias prefix (in table order) that matches the start of `url`.
pub fn apply_alias(url: &str, alias: &AliasTable) -> String {
    for (prefix, replacement) in alias.iter() {
        if let Some(rest) = url.strip_prefix(prefix.as_str()) {
            return format!("{replacement}{rest}");
        }
    }
    url.to_string()
}

/// Bring a repository address into `scheme://` form.
pub fn to_transport_url(url: &str) -> String {
    if url.contains("://") {
        return url.to_string();
    }

    // scp-like syntax: [user@]host:path, no slash before the first colon
    if let Some((authority, path)) = url.split_once(':') {
        if !authority.is_empty() && !authority.contains('/') {
            return format!("ssh://{authority}/{}", path.trim_start_matches('/'));
        }
    }

    format!("https://{url}")
}

/// Alias-expanded transport URL, the form handed to `git clone`.
pub fn normalize_url(url: &str, alias: &AliasTable) -> String {
    to_transport_url(&apply_alias(url.trim(), alias))
}

/// Canonical path of a repository relative to the base directory.
pub fn cache_key(url: &str, alias: &AliasTable) -> Result<String> {
    let transport = normalize_url(url, alias);
    log::debug!("Normalized {url} to {transport}");

    let parsed = Url::parse(&transport).map_err(|_| ProjjError::invalid_repo_url(url))?;

    let path = parsed.path().trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path).trim_end_matches('/');
    if path.is_empty() {
        return Err(ProjjError::invalid_repo_url(url));
    }

    let mut segments = Vec::new();
    if let Some(host) = parsed.host_str().filter(|host| !host.is_empty()) {
        segments.push(host.to_string());
    }
    for segment in path.split('/') {
        let decoded = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|_| ProjjError::invalid_repo_url(url))?;
        if !is_plain_segment(&decoded) {
            return Err(ProjjError::invalid_repo_url(url));
        }
        segments.push(decoded.into_owned());
    }

    Ok(segments.join("/"))
}

fn is_plain_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..") && !segment.contains(['/', '\\'])
}
